//! # Error Types
//!
//! This module defines all error types for the cue sheet converter.
//!
//! Every input defect is fatal: the conversion is a single batch pass and either
//! produces the full timed lyric set or nothing. Errors raised while reading the
//! cue file carry the 1-based source line number (and section, where relevant)
//! so the offending line can be found quickly.
//!
//! ## Error Types
//! - `MalformedLine` - A data line has the wrong number of fields for its section
//! - `UnknownSection` - A `[header]` other than `tempo`, `signatures`, `events`
//! - `OrphanLine` - A data line appears before any section header
//! - `InvalidNumeric` - A numeric field failed to parse
//! - `DegenerateTempoOrMeter` - Tempo <= 0 or a zero meter component
//! - `ConfigError` - Invalid YAML configuration
//! - `OutputError` - Serialization of an output document failed
//!
//! ## Usage
//! ```rust
//! use cue_lyrics::{convert, CueError};
//!
//! match convert("[events]\n1 1 1 1\n") {
//!     Ok(_) => unreachable!(),
//!     Err(CueError::MalformedLine { line, section, .. }) => {
//!         assert_eq!(line, 2);
//!         assert_eq!(section, "events");
//!     }
//!     Err(e) => panic!("unexpected error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CueError {
    /// A data line does not split into the expected number of fields.
    ///
    /// # Example
    /// ```
    /// # use cue_lyrics::CueError;
    /// let err = CueError::MalformedLine {
    ///     line: 7,
    ///     section: "events".to_string(),
    ///     message: "expected 10 fields, found 4".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Malformed line 7 in [events]: expected 10 fields, found 4");
    /// ```
    #[error("Malformed line {line} in [{section}]: {message}")]
    MalformedLine {
        line: usize,
        section: String,
        message: String,
    },

    /// A bracketed header names a section the converter does not know.
    #[error("Unknown section [{name}] at line {line}")]
    UnknownSection { line: usize, name: String },

    /// Data appeared before the first section header.
    #[error("Line {line} is outside of any [section]")]
    OrphanLine { line: usize },

    /// A field expected to hold a number could not be converted.
    ///
    /// # Example
    /// ```
    /// # use cue_lyrics::CueError;
    /// let err = CueError::InvalidNumeric {
    ///     line: 3,
    ///     field: "tempo".to_string(),
    ///     value: "fast".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid tempo 'fast' at line 3");
    /// ```
    #[error("Invalid {field} '{value}' at line {line}")]
    InvalidNumeric {
        line: usize,
        field: String,
        value: String,
    },

    /// Tempo is not positive, or a meter component is zero.
    ///
    /// Rejected before any time computation; never clamped.
    #[error("Degenerate tempo or meter at line {line}: {message}")]
    DegenerateTempoOrMeter { line: usize, message: String },

    /// Invalid YAML configuration.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// An output document could not be rendered.
    #[error("Output error: {0}")]
    OutputError(String),
}

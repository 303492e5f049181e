//! # Output Documents
//!
//! Renders converted lyrics for the downstream lyric display client.
//!
//! ## Sub-modules
//! - `json` - Flat JSON array of `{text, time}` records
//! - `elm` - Elm source module with the lyrics as a data literal
//!
//! Both writers return the complete document as a `String`; nothing here touches
//! the filesystem, so a failing run never leaves partial output behind.

pub mod elm;
pub mod json;

use std::time::Duration;

pub use elm::to_elm_module;
pub use json::{to_json, FlatLyric};

/// Seconds since the start of the song, from a whole-microsecond duration.
pub fn seconds(time: Duration) -> f64 {
    time.as_micros() as f64 / 1_000_000.0
}

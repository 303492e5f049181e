//! # cue-lyrics
//!
//! Converts a sequencer cue sheet (tempo changes, meter changes and lyric events
//! at bar/beat/subdivision/tick positions) into wall-clock lyric timings, grouped
//! into pages and lines for a lyric display client.
//!
//! ## Pipeline
//! ```text
//! cue sheet text
//!   → parser      CueSheet (tempo, meter and payload records)
//!   → timeline    stable sort by position, one incremental pass → TimedPayload
//!   → lyrics      break classification, page/line grouping → LyricBook
//!   → output      JSON array / Elm module
//! ```
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//!
//! let source = "[tempo]\n1 1 1 1 60.0000\n[events]\n1 1 1 1 Hel• 1 0 0 1 0\n1 2 1 1 lo¬ 1 0 1 0 0\n";
//! let conversion = cue_lyrics::convert(source)?;
//!
//! assert_eq!(conversion.payloads[1].time, Duration::from_secs(1));
//! let book = conversion.lyric_book(cue_lyrics::EmptyGroups::Drop);
//! assert_eq!(book.pages[0][0][0].text, "Hel");
//! # Ok::<(), cue_lyrics::CueError>(())
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod lyrics;
pub mod output;
pub mod parser;
pub mod position;
pub mod timeline;
pub mod timing;

use tracing::info;

pub use config::{ElmLayout, OutputConfig};
pub use error::CueError;
pub use events::{CueSheet, MeterChange, Payload, TempoChange, TimelineEvent};
pub use lyrics::{classify, group_while, BreakKind, EmptyGroups, LyricBook, LyricToken};
pub use output::FlatLyric;
pub use parser::parse;
pub use position::{NoteLength, Position, PositionBase, TICKS_PER_BEAT};
pub use timeline::{Anchor, EventTimeline, TimedPayload};
pub use timing::{position_seconds, Meter, Tempo};

/// Every payload of a cue sheet with its absolute time, in ascending time order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversion {
    pub payloads: Vec<TimedPayload>,
}

impl Conversion {
    pub fn flat_lyrics(&self) -> Vec<FlatLyric> {
        self.payloads.iter().map(FlatLyric::from).collect()
    }

    pub fn tokens(&self) -> Vec<LyricToken> {
        self.payloads.iter().map(LyricToken::from).collect()
    }

    pub fn lyric_book(&self, empty_groups: EmptyGroups) -> LyricBook {
        LyricBook::build(self.payloads.iter().map(LyricToken::from), empty_groups)
    }

    /// Flat JSON document.
    pub fn to_json(&self) -> Result<String, CueError> {
        output::to_json(&self.flat_lyrics())
    }

    /// Elm module in the configured layout.
    pub fn to_elm(&self, config: &OutputConfig) -> String {
        match config.elm_layout {
            ElmLayout::Book => {
                output::to_elm_module(&self.lyric_book(config.empty_groups), config)
            }
            ElmLayout::Flat => output::elm::to_elm_flat_module(&self.tokens(), config),
        }
    }
}

/// Convert a cue sheet with 1-indexed positions.
/// This is the main entry point for the library.
pub fn convert(source: &str) -> Result<Conversion, CueError> {
    convert_with_base(source, PositionBase::One)
}

/// Convert a cue sheet whose positions use the given numbering convention.
pub fn convert_with_base(source: &str, base: PositionBase) -> Result<Conversion, CueError> {
    let sheet = parser::parse_with_base(source, base)?;
    let timeline = EventTimeline::from_cue_sheet(sheet);
    let event_count = timeline.events().len();
    let payloads: Vec<TimedPayload> = timeline.timed_payloads().collect();
    info!(
        "Timed {} lyric events from {} timeline events",
        payloads.len(),
        event_count
    );
    Ok(Conversion { payloads })
}

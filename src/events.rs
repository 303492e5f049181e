//! # Timeline Events
//!
//! The three kinds of record a cue sheet contributes to the timeline, and the
//! [`CueSheet`] that holds them as parsed, section by section.
//!
//! ## Type Hierarchy
//! ```text
//! CueSheet
//!   ├── tempo_changes: Vec<TempoChange>   ([tempo])
//!   ├── meter_changes: Vec<MeterChange>   ([signatures])
//!   └── payloads:      Vec<Payload>       ([events])
//!
//! TimelineEvent (enum)
//!   ├── TempoChange { position, tempo, reported_time }
//!   ├── MeterChange { position, meter }
//!   └── Payload     { position, text, track, length }
//! ```
//!
//! Tempo and meter changes together form the timeline map: a piecewise-constant
//! function from position to (tempo, meter), changing only at the positions of
//! those records.

use std::time::Duration;

use crate::position::{NoteLength, Position};
use crate::timing::{Meter, Tempo};

/// A new tempo taking effect at `position`.
#[derive(Debug, Clone, PartialEq)]
pub struct TempoChange {
    pub position: Position,
    pub tempo: Tempo,
    /// Wall-clock time written next to the tempo by the exporting tool, if any.
    /// Diagnostic only; times are always derived from positions.
    pub reported_time: Option<Duration>,
}

/// A new meter taking effect at `position`.
#[derive(Debug, Clone, PartialEq)]
pub struct MeterChange {
    pub position: Position,
    pub meter: Meter,
}

/// A lyric or note event.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    pub position: Position,
    /// Raw title text, break marker included.
    pub text: String,
    pub track: u32,
    pub length: NoteLength,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TimelineEvent {
    TempoChange(TempoChange),
    MeterChange(MeterChange),
    Payload(Payload),
}

impl TimelineEvent {
    pub fn position(&self) -> Position {
        match self {
            TimelineEvent::TempoChange(change) => change.position,
            TimelineEvent::MeterChange(change) => change.position,
            TimelineEvent::Payload(payload) => payload.position,
        }
    }
}

/// Parsed contents of a cue sheet, in source order within each section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CueSheet {
    pub tempo_changes: Vec<TempoChange>,
    pub meter_changes: Vec<MeterChange>,
    pub payloads: Vec<Payload>,
}

impl CueSheet {
    /// All records as one unsorted list: tempo changes, then meter changes, then
    /// payloads. A stable sort by position over this list keeps change events
    /// ahead of payloads that share their position.
    pub fn into_events(self) -> Vec<TimelineEvent> {
        self.tempo_changes
            .into_iter()
            .map(TimelineEvent::TempoChange)
            .chain(self.meter_changes.into_iter().map(TimelineEvent::MeterChange))
            .chain(self.payloads.into_iter().map(TimelineEvent::Payload))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::Rational;

    fn payload(text: &str, position: Position) -> Payload {
        Payload {
            position,
            text: text.to_string(),
            track: 1,
            length: NoteLength::default(),
        }
    }

    #[test]
    fn test_into_events_puts_changes_first() {
        let sheet = CueSheet {
            tempo_changes: vec![TempoChange {
                position: Position::new(2, 0, 0, 0),
                tempo: Tempo::new(Rational::from_integer(90)).unwrap(),
                reported_time: None,
            }],
            meter_changes: vec![MeterChange {
                position: Position::new(1, 0, 0, 0),
                meter: Meter::new(3, 4).unwrap(),
            }],
            payloads: vec![payload("la", Position::ZERO)],
        };

        let events = sheet.into_events();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], TimelineEvent::TempoChange(_)));
        assert!(matches!(events[1], TimelineEvent::MeterChange(_)));
        assert!(matches!(events[2], TimelineEvent::Payload(_)));
        assert_eq!(events[0].position(), Position::new(2, 0, 0, 0));
        assert_eq!(events[2].position(), Position::ZERO);
    }
}

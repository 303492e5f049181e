//! # Event Timeline
//!
//! Merges tempo changes, meter changes and payloads into one position-ordered
//! stream and walks it once, producing the absolute time of every payload.
//!
//! ## Incremental Conversion
//!
//! Tempo and meter are piecewise constant, changing only at the positions of
//! change events. Between two consecutive events the elapsed time is therefore
//! the difference of their [`position_micros`] *under the tempo and meter active
//! in that interval*. An [`Anchor`] remembers the last event's position and
//! absolute time together with the active tempo and meter; each step adds one
//! such difference:
//!
//! ```text
//! delta      = position_micros(event) - position_micros(anchor)   (anchor's tempo/meter)
//! new_micros = anchor.micros + delta
//! anchor     = (event.position, new_micros, tempo', meter')
//! ```
//!
//! The sum telescopes across any number of changes. Converting every position
//! against a single global origin and tempo would go wrong at the first change.
//!
//! Each endpoint is truncated to whole microseconds before subtracting, so the
//! anchor time is always an exact microsecond count. The delta is signed: a
//! position that sorts later can still lie fewer beats in, for example when a
//! subdivision is past the end of its beat. The anchor keeps that negative step
//! so every later event stays exact, and only emitted times become a `Duration`.
//!
//! ## Ordering
//! Events are stable-sorted by position before the walk. [`CueSheet::into_events`]
//! lists change events before payloads, so a payload sharing a position with a
//! tempo change is timed at that position with zero extra delay, and everything
//! after it uses the new tempo.

use std::time::Duration;

use tracing::debug;

use crate::events::{CueSheet, Payload, TimelineEvent};
use crate::position::Position;
use crate::timing::{micros_to_duration, position_micros, Meter, Tempo};

/// Reported tempo-change times further than this from the computed time are logged.
const REPORTED_TIME_TOLERANCE: Duration = Duration::from_millis(1);

/// Baseline for the next incremental conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub position: Position,
    /// Signed microseconds since the song start.
    pub micros: i128,
    pub tempo: Tempo,
    pub meter: Meter,
}

impl Default for Anchor {
    /// Song start: position zero, time zero, 120 BPM, 4/4.
    fn default() -> Self {
        Self {
            position: Position::ZERO,
            micros: 0,
            tempo: Tempo::default(),
            meter: Meter::default(),
        }
    }
}

impl Anchor {
    /// Absolute microseconds of `position` under this anchor's tempo and meter.
    pub fn micros_at(&self, position: &Position) -> i128 {
        let target = position_micros(position, &self.tempo, &self.meter);
        let origin = position_micros(&self.position, &self.tempo, &self.meter);
        self.micros.saturating_add(target - origin)
    }

    pub fn time(&self) -> Duration {
        micros_to_duration(self.micros)
    }

    /// Move the anchor to `event`, returning the new anchor and, for a
    /// payload, the payload with its absolute time.
    pub fn advance(self, event: TimelineEvent) -> (Anchor, Option<TimedPayload>) {
        let position = event.position();
        let mut next = Anchor {
            position,
            micros: self.micros_at(&position),
            ..self
        };
        let time = next.time();
        let emitted = match event {
            TimelineEvent::TempoChange(change) => {
                log_reported_drift(time, &change.position, change.reported_time);
                debug!("Tempo {} at {} ({:?})", change.tempo, change.position, time);
                next.tempo = change.tempo;
                None
            }
            TimelineEvent::MeterChange(change) => {
                debug!("Meter {} at {} ({:?})", change.meter, change.position, time);
                next.meter = change.meter;
                None
            }
            TimelineEvent::Payload(payload) => Some(TimedPayload { time, payload }),
        };
        (next, emitted)
    }
}

/// A payload with its absolute time since the start of the song.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedPayload {
    pub time: Duration,
    pub payload: Payload,
}

/// Position-ordered stream of all timeline events of one cue sheet.
#[derive(Debug, Clone)]
pub struct EventTimeline {
    events: Vec<TimelineEvent>,
}

impl EventTimeline {
    /// Stable-sort `events` by position. Ties keep their input order.
    pub fn new(mut events: Vec<TimelineEvent>) -> Self {
        events.sort_by_key(TimelineEvent::position);
        Self { events }
    }

    pub fn from_cue_sheet(sheet: CueSheet) -> Self {
        Self::new(sheet.into_events())
    }

    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    /// Walk the stream once, yielding every payload with its absolute time.
    ///
    /// Lazy and single-pass; restarting means building a new timeline.
    pub fn timed_payloads(self) -> impl Iterator<Item = TimedPayload> {
        self.events
            .into_iter()
            .scan(Anchor::default(), |anchor, event| {
                let (next, emitted) = anchor.advance(event);
                *anchor = next;
                Some(emitted)
            })
            .flatten()
    }
}

fn log_reported_drift(computed: Duration, position: &Position, reported: Option<Duration>) {
    let Some(reported) = reported else {
        return;
    };
    let drift = if computed > reported {
        computed - reported
    } else {
        reported - computed
    };
    if drift > REPORTED_TIME_TOLERANCE {
        debug!(
            "Tempo change at {} computed at {:?}, cue sheet reports {:?} (drift {:?})",
            position, computed, reported, drift
        );
    }
}

//! # Musical Positions
//!
//! A [`Position`] is a four-axis musical coordinate: bar, beat, subdivision and
//! tick. Positions are always zero-indexed inside the crate; the 1-indexed
//! numbering used by cue sheet exports is normalized once, at the parse
//! boundary, by [`Position::from_source`].
//!
//! ## Axes
//! ```text
//! bar          measure number, length given by the active meter
//! beat         beat within the bar
//! subdivision  notated subdivision, 1/beat_unit of a beat
//! tick         finest resolution, 1/960 of a beat (TICKS_PER_BEAT)
//! ```
//!
//! Ordering is lexicographic by (bar, beat, subdivision, tick), which is exactly
//! the derived `Ord` given the field order below.
//!
//! [`NoteLength`] carries the same four axes but describes a span, so it is
//! never index-normalized.

use serde::Deserialize;

use crate::error::CueError;

/// Tick resolution of the source tool. Constant; unrelated to the meter's beat unit.
pub const TICKS_PER_BEAT: u32 = 960;

/// Numbering convention of position fields in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionBase {
    /// Exports number every axis from 1 ("bar 1 beat 1" is the start of the song).
    #[default]
    One,
    /// Fields are already zero-indexed and pass through unchanged.
    Zero,
}

/// A zero-indexed position in musical time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub bar: u32,
    pub beat: u32,
    pub subdivision: u32,
    pub tick: u32,
}

impl Position {
    /// The start of the song.
    pub const ZERO: Position = Position {
        bar: 0,
        beat: 0,
        subdivision: 0,
        tick: 0,
    };

    pub fn new(bar: u32, beat: u32, subdivision: u32, tick: u32) -> Self {
        Self {
            bar,
            beat,
            subdivision,
            tick,
        }
    }

    /// Build a position from the four raw source fields.
    ///
    /// The tick field may end in a period (`"241."`), which is a formatting
    /// artifact of the exporting tool and is dropped. Under [`PositionBase::One`]
    /// every axis is shifted down by one; a raw `0` is rejected since it cannot
    /// be normalized.
    ///
    /// # Example
    /// ```
    /// use cue_lyrics::position::{Position, PositionBase};
    ///
    /// let pos = Position::from_source(["2", "1", "3", "241."], PositionBase::One, 1).unwrap();
    /// assert_eq!(pos, Position::new(1, 0, 2, 240));
    /// ```
    pub fn from_source(
        fields: [&str; 4],
        base: PositionBase,
        line: usize,
    ) -> Result<Self, CueError> {
        let [bar, beat, subdivision, tick] = fields;
        Ok(Self {
            bar: normalize_axis(parse_axis(bar, "bar", line)?, base, "bar", bar, line)?,
            beat: normalize_axis(parse_axis(beat, "beat", line)?, base, "beat", beat, line)?,
            subdivision: normalize_axis(
                parse_axis(subdivision, "subdivision", line)?,
                base,
                "subdivision",
                subdivision,
                line,
            )?,
            tick: normalize_axis(parse_tick(tick, line)?, base, "tick", tick, line)?,
        })
    }
}

impl std::fmt::Display for Position {
    /// Formats in the 1-indexed convention of the source tool.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.bar + 1,
            self.beat + 1,
            self.subdivision + 1,
            self.tick + 1
        )
    }
}

/// Length of a note or lyric event. A span, so no index normalization applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoteLength {
    pub measures: u32,
    pub beats: u32,
    pub subdivisions: u32,
    pub ticks: u32,
}

impl NoteLength {
    pub fn new(measures: u32, beats: u32, subdivisions: u32, ticks: u32) -> Self {
        Self {
            measures,
            beats,
            subdivisions,
            ticks,
        }
    }

    /// Parse the four raw length fields of an event line.
    pub fn from_source(fields: [&str; 4], line: usize) -> Result<Self, CueError> {
        let [measures, beats, subdivisions, ticks] = fields;
        Ok(Self {
            measures: parse_axis(measures, "length measures", line)?,
            beats: parse_axis(beats, "length beats", line)?,
            subdivisions: parse_axis(subdivisions, "length subdivisions", line)?,
            ticks: parse_tick(ticks, line)?,
        })
    }
}

fn parse_axis(value: &str, field: &str, line: usize) -> Result<u32, CueError> {
    value.parse().map_err(|_| CueError::InvalidNumeric {
        line,
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn parse_tick(value: &str, line: usize) -> Result<u32, CueError> {
    parse_axis(value.strip_suffix('.').unwrap_or(value), "tick", line)
}

fn normalize_axis(
    parsed: u32,
    base: PositionBase,
    field: &str,
    raw: &str,
    line: usize,
) -> Result<u32, CueError> {
    match base {
        PositionBase::Zero => Ok(parsed),
        PositionBase::One => parsed.checked_sub(1).ok_or_else(|| CueError::InvalidNumeric {
            line,
            field: field.to_string(),
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_indexed_normalization() {
        let pos = Position::from_source(["1", "1", "1", "1"], PositionBase::One, 1).unwrap();
        assert_eq!(pos, Position::ZERO);
    }

    #[test]
    fn test_zero_base_passthrough() {
        let pos = Position::from_source(["3", "0", "1", "0"], PositionBase::Zero, 1).unwrap();
        assert_eq!(pos, Position::new(3, 0, 1, 0));
    }

    #[test]
    fn test_tick_trailing_period_stripped() {
        let pos = Position::from_source(["1", "1", "1", "1."], PositionBase::One, 1).unwrap();
        assert_eq!(pos.tick, 0);
    }

    #[test]
    fn test_zero_under_one_base_rejected() {
        let result = Position::from_source(["0", "1", "1", "1"], PositionBase::One, 9);
        assert_eq!(
            result,
            Err(CueError::InvalidNumeric {
                line: 9,
                field: "bar".to_string(),
                value: "0".to_string(),
            })
        );
    }

    #[test]
    fn test_non_numeric_axis() {
        let result = Position::from_source(["1", "x", "1", "1"], PositionBase::One, 4);
        assert!(matches!(result, Err(CueError::InvalidNumeric { field, .. }) if field == "beat"));
    }

    #[test]
    fn test_lexicographic_ordering() {
        let a = Position::new(0, 3, 3, 959);
        let b = Position::new(1, 0, 0, 0);
        let c = Position::new(1, 0, 0, 1);
        assert!(a < b);
        assert!(b < c);
        assert!(Position::new(2, 0, 1, 0) > Position::new(2, 0, 0, 900));
    }

    #[test]
    fn test_display_is_one_indexed() {
        assert_eq!(Position::new(4, 0, 2, 239).to_string(), "5 1 3 240");
    }

    #[test]
    fn test_note_length_is_not_normalized() {
        let length = NoteLength::from_source(["0", "1", "0", "120."], 1).unwrap();
        assert_eq!(length, NoteLength::new(0, 1, 0, 120));
    }
}

//! # Position-to-Time Conversion
//!
//! Converts a [`Position`] to elapsed seconds under one fixed (tempo, meter) pair.
//!
//! ## Formula
//! ```text
//! seconds_per_beat = 60 / tempo
//! beats_elapsed    = bar * beats_per_measure + beat
//!                  + subdivision / beat_unit
//!                  + tick / TICKS_PER_BEAT
//! seconds          = seconds_per_beat * beats_elapsed
//! ```
//!
//! Tempo values are parsed into `Ratio<i128>`, but the conversion itself runs
//! on [`BigRational`], so no tempo or position can overflow it. Only
//! [`truncate_to_micros`] leaves the rational domain, and it truncates toward
//! zero to whole microseconds rather than rounding.
//!
//! The result is only meaningful as a *difference* between two positions under
//! the same tempo and meter; see the `timeline` module for how those differences
//! are chained across tempo and meter changes.

use std::fmt;
use std::time::Duration;

use num_rational::{BigRational, Ratio};
use num_traits::{Signed, ToPrimitive};
use tracing::warn;

use crate::position::{Position, TICKS_PER_BEAT};

/// Exact rational number used for all time arithmetic.
pub type Rational = Ratio<i128>;

const MICROS_PER_SECOND: i128 = 1_000_000;

fn big(value: i128) -> BigRational {
    BigRational::from_integer(value.into())
}


/// Tempo in beats per minute. Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tempo {
    bpm: Rational,
}

impl Tempo {
    /// Tempo in effect before the first tempo change.
    pub const DEFAULT_BPM: i128 = 120;

    /// Returns `None` unless `bpm > 0`.
    pub fn new(bpm: Rational) -> Option<Self> {
        (bpm > Rational::from_integer(0)).then_some(Self { bpm })
    }

    /// Parse a plain decimal number such as `"120"` or `"97.5000"` exactly.
    ///
    /// Returns `None` for anything that is not a decimal literal; the sign is
    /// accepted here so that non-positive tempos can be reported as degenerate
    /// rather than as unparseable.
    pub fn parse_bpm(text: &str) -> Option<Rational> {
        parse_decimal(text)
    }

    pub fn bpm(&self) -> Rational {
        self.bpm
    }

    pub fn seconds_per_beat(&self) -> BigRational {
        big(60) / BigRational::new((*self.bpm.numer()).into(), (*self.bpm.denom()).into())
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self {
            bpm: Rational::from_integer(Self::DEFAULT_BPM),
        }
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bpm.is_integer() {
            write!(f, "{}", self.bpm.to_integer())
        } else {
            write!(
                f,
                "{:.4}",
                *self.bpm.numer() as f64 / *self.bpm.denom() as f64
            )
        }
    }
}

/// Time signature, e.g. 4/4 or 6/8. Both components are strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Meter {
    beats_per_measure: u32,
    beat_unit: u32,
}

impl Meter {
    /// Returns `None` if either component is zero.
    pub fn new(beats_per_measure: u32, beat_unit: u32) -> Option<Self> {
        (beats_per_measure > 0 && beat_unit > 0).then_some(Self {
            beats_per_measure,
            beat_unit,
        })
    }

    pub fn beats_per_measure(&self) -> u32 {
        self.beats_per_measure
    }

    pub fn beat_unit(&self) -> u32 {
        self.beat_unit
    }
}

impl Default for Meter {
    fn default() -> Self {
        Self {
            beats_per_measure: 4,
            beat_unit: 4,
        }
    }
}

impl fmt::Display for Meter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.beats_per_measure, self.beat_unit)
    }
}

/// Number of beats from a measure-aligned origin to `position`.
pub fn beats_elapsed(position: &Position, meter: &Meter) -> BigRational {
    let whole_beats = i128::from(position.bar) * i128::from(meter.beats_per_measure)
        + i128::from(position.beat);
    big(whole_beats)
        + BigRational::new(
            i128::from(position.subdivision).into(),
            i128::from(meter.beat_unit).into(),
        )
        + BigRational::new(
            i128::from(position.tick).into(),
            i128::from(TICKS_PER_BEAT).into(),
        )
}

/// Exact seconds from the origin to `position` under a constant tempo and meter.
///
/// # Example
/// ```
/// use cue_lyrics::position::Position;
/// use cue_lyrics::timing::{position_seconds, Meter, Tempo};
/// use num_rational::BigRational;
///
/// // One bar of 4/4 at 120 BPM
/// let seconds = position_seconds(&Position::new(1, 0, 0, 0), &Tempo::default(), &Meter::default());
/// assert_eq!(seconds, BigRational::from_integer(2.into()));
/// ```
pub fn position_seconds(position: &Position, tempo: &Tempo, meter: &Meter) -> BigRational {
    tempo.seconds_per_beat() * beats_elapsed(position, meter)
}

/// Whole microseconds in `seconds`, truncated toward zero.
///
/// Values beyond `i128` saturate with a warning.
pub fn truncate_to_micros(seconds: &BigRational) -> i128 {
    let micros = (seconds * big(MICROS_PER_SECOND)).to_integer();
    micros.to_i128().unwrap_or_else(|| {
        warn!("{} us is out of range, saturating", micros);
        if micros.is_negative() {
            i128::MIN
        } else {
            i128::MAX
        }
    })
}

/// [`position_seconds`] as whole microseconds.
pub fn position_micros(position: &Position, tempo: &Tempo, meter: &Meter) -> i128 {
    truncate_to_micros(&position_seconds(position, tempo, meter))
}

/// Convert a signed microsecond count to a `Duration`.
///
/// Negative counts clamp to zero and counts beyond `u64` clamp to the maximum,
/// both with a warning.
pub fn micros_to_duration(micros: i128) -> Duration {
    match u64::try_from(micros) {
        Ok(micros) => Duration::from_micros(micros),
        Err(_) if micros < 0 => {
            warn!("Time {} us is before the song start, clamping to 0", micros);
            Duration::ZERO
        }
        Err(_) => {
            warn!("Time {} us is out of range, clamping", micros);
            Duration::from_micros(u64::MAX)
        }
    }
}

fn parse_decimal(text: &str) -> Option<Rational> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }

    let scale = 10i128.checked_pow(u32::try_from(frac_part.len()).ok()?)?;
    let int_value: i128 = if int_part.is_empty() { 0 } else { int_part.parse().ok()? };
    let frac_value: i128 = if frac_part.is_empty() { 0 } else { frac_part.parse().ok()? };
    let numer = int_value.checked_mul(scale)?.checked_add(frac_value)?;

    Some(Rational::new(if negative { -numer } else { numer }, scale))
}

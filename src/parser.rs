//! # Cue Sheet Parser
//!
//! Reads the plain-text cue sheet exported by the sequencer into a [`CueSheet`].
//!
//! ## Format
//! ```text
//! [tempo]
//! 1 1 1 1 120.0000 00:00:00:00.000000
//! 9 1 1 1 96.0000 00:00:00:16.000000
//!
//! [signatures]
//! 1 1 1 1 Time 4 / 4
//! 1 1 1 1 Key C major
//!
//! [events]
//! 1 1 1 1 Hel• 1 0 0 2 0
//! 1 1 3 1 lo¬ 1 0 1 0 0.
//! ```
//!
//! - A line starting with `[` is a section header; the name runs to the last `]`.
//! - Sections may appear in any order, and repeated sections accumulate.
//! - Data lines are whitespace-separated; blank lines are skipped.
//! - The first four fields of every data line are a position, 1-indexed by
//!   default (see [`PositionBase`]).
//!
//! ## Sections
//! - `tempo`: `bar beat subdivision tick tempo [clock-time]`
//! - `signatures`: only `Time` lines are meter changes, and must read
//!   `bar beat subdivision tick Time beats / division`; other kinds are skipped
//! - `events`: `bar beat subdivision tick title track measures beats subdivisions ticks`
//!
//! Any defect aborts the parse with a [`CueError`] naming the source line.

use std::time::Duration;

use tracing::{debug, info};

use crate::error::CueError;
use crate::events::{CueSheet, MeterChange, Payload, TempoChange};
use crate::position::{NoteLength, Position, PositionBase};
use crate::timing::{Meter, Tempo};

/// Marker in the 5th field of a signature line that denotes a meter change.
const TIME_SIGNATURE_MARKER: &str = "Time";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Tempo,
    Signatures,
    Events,
}

impl Section {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "tempo" => Some(Section::Tempo),
            "signatures" => Some(Section::Signatures),
            "events" => Some(Section::Events),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Section::Tempo => "tempo",
            Section::Signatures => "signatures",
            Section::Events => "events",
        }
    }
}

/// Parse a cue sheet with 1-indexed positions.
pub fn parse(source: &str) -> Result<CueSheet, CueError> {
    parse_with_base(source, PositionBase::One)
}

/// Parse a cue sheet whose positions use the given numbering convention.
pub fn parse_with_base(source: &str, base: PositionBase) -> Result<CueSheet, CueError> {
    let mut sheet = CueSheet::default();
    let mut section: Option<Section> = None;

    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;

        if let Some(name) = section_header(raw) {
            let parsed = Section::from_name(name).ok_or_else(|| CueError::UnknownSection {
                line,
                name: name.to_string(),
            })?;
            debug!("Entering [{}] at line {}", name, line);
            section = Some(parsed);
            continue;
        }

        let text = raw.trim();
        if text.is_empty() {
            continue;
        }
        let fields: Vec<&str> = text.split_whitespace().collect();

        match section.ok_or(CueError::OrphanLine { line })? {
            Section::Tempo => sheet
                .tempo_changes
                .push(parse_tempo_line(&fields, line, base)?),
            Section::Signatures => {
                if let Some(change) = parse_signature_line(&fields, line, base)? {
                    sheet.meter_changes.push(change);
                }
            }
            Section::Events => sheet.payloads.push(parse_event_line(&fields, line, base)?),
        }
    }

    info!(
        "Parsed {} tempo changes, {} meter changes, {} events",
        sheet.tempo_changes.len(),
        sheet.meter_changes.len(),
        sheet.payloads.len()
    );
    Ok(sheet)
}

fn section_header(raw: &str) -> Option<&str> {
    let rest = raw.strip_prefix('[')?;
    let end = rest.rfind(']')?;
    Some(&rest[..end])
}

fn malformed(section: Section, line: usize, message: String) -> CueError {
    CueError::MalformedLine {
        line,
        section: section.name().to_string(),
        message,
    }
}

fn position_of(fields: &[&str], line: usize, base: PositionBase) -> Result<Position, CueError> {
    Position::from_source([fields[0], fields[1], fields[2], fields[3]], base, line)
}

fn parse_tempo_line(
    fields: &[&str],
    line: usize,
    base: PositionBase,
) -> Result<TempoChange, CueError> {
    if !(5..=6).contains(&fields.len()) {
        return Err(malformed(
            Section::Tempo,
            line,
            format!(
                "expected 'bar beat subdivision tick tempo [time]' (5 or 6 fields), found {} fields",
                fields.len()
            ),
        ));
    }

    let position = position_of(fields, line, base)?;
    let bpm = Tempo::parse_bpm(fields[4]).ok_or_else(|| CueError::InvalidNumeric {
        line,
        field: "tempo".to_string(),
        value: fields[4].to_string(),
    })?;
    let tempo = Tempo::new(bpm).ok_or_else(|| CueError::DegenerateTempoOrMeter {
        line,
        message: format!("tempo must be positive, found {}", fields[4]),
    })?;
    let reported_time = fields
        .get(5)
        .map(|value| parse_clock_time(value, line))
        .transpose()?;

    Ok(TempoChange {
        position,
        tempo,
        reported_time,
    })
}

fn parse_signature_line(
    fields: &[&str],
    line: usize,
    base: PositionBase,
) -> Result<Option<MeterChange>, CueError> {
    if fields.len() < 5 {
        return Err(malformed(
            Section::Signatures,
            line,
            format!(
                "expected a signature kind in field 5, found {} fields",
                fields.len()
            ),
        ));
    }
    if fields[4] != TIME_SIGNATURE_MARKER {
        debug!("Skipping '{}' signature at line {}", fields[4], line);
        return Ok(None);
    }
    if fields.len() != 8 {
        return Err(malformed(
            Section::Signatures,
            line,
            format!(
                "expected 'bar beat subdivision tick Time beats / division' (8 fields), found {} fields",
                fields.len()
            ),
        ));
    }

    let position = position_of(fields, line, base)?;
    let beats = parse_u32(fields[5], "meter beats", line)?;
    let division = parse_u32(fields[7], "meter division", line)?;
    let meter = Meter::new(beats, division).ok_or_else(|| CueError::DegenerateTempoOrMeter {
        line,
        message: format!("meter {}/{} has a zero component", beats, division),
    })?;

    Ok(Some(MeterChange { position, meter }))
}

fn parse_event_line(fields: &[&str], line: usize, base: PositionBase) -> Result<Payload, CueError> {
    if fields.len() != 10 {
        return Err(malformed(
            Section::Events,
            line,
            format!(
                "expected 'bar beat subdivision tick title track measures beats subdivisions ticks' (10 fields), found {} fields",
                fields.len()
            ),
        ));
    }

    Ok(Payload {
        position: position_of(fields, line, base)?,
        text: fields[4].to_string(),
        track: parse_u32(fields[5], "track", line)?,
        length: NoteLength::from_source([fields[6], fields[7], fields[8], fields[9]], line)?,
    })
}

fn parse_u32(value: &str, field: &str, line: usize) -> Result<u32, CueError> {
    value.parse().map_err(|_| CueError::InvalidNumeric {
        line,
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Parse the clock time written next to a tempo: `[frames:]hh:mm:ss.ffffff`.
///
/// The leading field of the four-part form is ignored. Fractional seconds are
/// truncated to microseconds.
fn parse_clock_time(value: &str, line: usize) -> Result<Duration, CueError> {
    let invalid = || CueError::InvalidNumeric {
        line,
        field: "tempo time".to_string(),
        value: value.to_string(),
    };

    let parts: Vec<&str> = value.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [_, hours, minutes, seconds] | [hours, minutes, seconds] => (*hours, *minutes, *seconds),
        _ => return Err(invalid()),
    };
    let (whole, fraction) = seconds.split_once('.').unwrap_or((seconds, ""));
    if !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let hours: u64 = hours.parse().map_err(|_| invalid())?;
    let minutes: u64 = minutes.parse().map_err(|_| invalid())?;
    let whole: u64 = whole.parse().map_err(|_| invalid())?;
    let micros: u64 = format!("{:0<6}", &fraction[..fraction.len().min(6)])
        .parse()
        .map_err(|_| invalid())?;

    let total_seconds = hours
        .checked_mul(3600)
        .and_then(|secs| secs.checked_add(minutes.checked_mul(60)?))
        .and_then(|secs| secs.checked_add(whole))
        .ok_or_else(invalid)?;
    Duration::from_secs(total_seconds)
        .checked_add(Duration::from_micros(micros))
        .ok_or_else(invalid)
}

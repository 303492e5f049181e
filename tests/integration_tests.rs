//! Integration tests for the cue sheet converter
//!
//! Tests the full pipeline from cue sheet text to timed lyrics and output documents.

use std::time::Duration;

use cue_lyrics::{convert, BreakKind, CueError, ElmLayout, EmptyGroups, OutputConfig};

const TWINKLE: &str = include_str!("fixtures/twinkle.cue");

fn seconds(conversion: &cue_lyrics::Conversion) -> Vec<f64> {
    conversion.flat_lyrics().iter().map(|lyric| lyric.time).collect()
}

#[test]
fn test_tempo_and_meter_changes() {
    let conversion = convert(TWINKLE).unwrap();
    // 120 BPM 4/4 for two bars, 60 BPM 4/4 for two bars, then 60 BPM 3/4
    assert_eq!(
        seconds(&conversion),
        vec![0.0, 1.0, 2.0, 3.0, 4.0, 8.0, 12.0, 13.75, 15.0]
    );
}

#[test]
fn test_times_ascending() {
    let conversion = convert(TWINKLE).unwrap();
    let times: Vec<Duration> = conversion.payloads.iter().map(|p| p.time).collect();
    assert!(times.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn test_one_bar_at_default_tempo() {
    let source = "[events]\n1 1 1 1 a 1 0 0 1 0\n2 1 1 1 b 1 0 0 1 0\n";
    let conversion = convert(source).unwrap();
    assert_eq!(seconds(&conversion), vec![0.0, 2.0]);
}

#[test]
fn test_lyric_book_shape() {
    let conversion = convert(TWINKLE).unwrap();
    let book = conversion.lyric_book(EmptyGroups::Keep);

    assert_eq!(book.pages.len(), 2);
    assert_eq!(book.pages[0].len(), 2);
    assert_eq!(book.pages[1].len(), 2);
    assert!(book.pages[1][1].is_empty());

    let first_line: Vec<&str> = book.pages[0][0].iter().map(|t| t.text.as_str()).collect();
    assert_eq!(first_line, vec!["Twin", "kle"]);
    let page_end = book.pages[0][1].last().unwrap();
    assert_eq!(page_end.text, "star");
    assert_eq!(page_end.break_kind, BreakKind::Page);

    let dropped = conversion.lyric_book(EmptyGroups::Drop);
    assert_eq!(dropped.pages[1].len(), 1);
    assert_eq!(dropped.token_count(), 9);
}

#[test]
fn test_json_output() {
    let json = convert(TWINKLE).unwrap().to_json().unwrap();
    let value: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
    assert_eq!(value.len(), 9);
    assert_eq!(value[0]["text"], "Twin•");
    assert_eq!(value[7]["text"], "won•");
    assert_eq!(value[7]["time"], 13.75);
}

#[test]
fn test_elm_book_output() {
    let elm = convert(TWINKLE)
        .unwrap()
        .to_elm(&OutputConfig::default());
    assert!(elm.starts_with("module Lyrics exposing (..)"));
    assert!(elm.contains("lyricBaseFontName =\n    \"LeagueGothic\""));
    assert!(elm.contains("          Lyric \"Twin\" <| 0.0 * Time.second,\n"));
    assert!(elm.contains("          Lyric \"tle \" <| 3.0 * Time.second,\n"));
    assert!(elm.contains("          Lyric \"won\" <| 13.75 * Time.second,\n"));
}

#[test]
fn test_elm_flat_output() {
    let config = OutputConfig {
        elm_layout: ElmLayout::Flat,
        ..OutputConfig::default()
    };
    let elm = convert(TWINKLE).unwrap().to_elm(&config);
    assert!(elm.contains("lyrics : Array Lyric"));
    assert!(elm.contains("        [ Lyric \"Twin\" Syllable 0.0\n"));
    assert!(elm.contains("        , Lyric \"der\" Line 15.0\n"));
}

#[test]
fn test_tempo_change_and_payload_at_same_position() {
    let source = "[events]\n2 1 1 1 b 1 0 0 1 0\n3 1 1 1 c 1 0 0 1 0\n[tempo]\n2 1 1 1 240\n";
    let conversion = convert(source).unwrap();
    // b lands exactly on the change; the following bar runs at 240 BPM (1 s)
    assert_eq!(seconds(&conversion), vec![2.0, 3.0]);
}

#[test]
fn test_subdivision_past_beat_end_does_not_shift_later_lyrics() {
    let source = "[events]\n1 1 6 1 a 1 0 0 1 0\n1 2 1 1 b 1 0 0 1 0\n2 1 1 1 c 1 0 0 1 0\n";
    let conversion = convert(source).unwrap();
    assert_eq!(seconds(&conversion), vec![0.625, 0.5, 2.0]);
}

#[test]
fn test_long_fractional_tempo_converts() {
    let source = "[tempo]\n1 1 1 1 120.000000000000000000000000000001\n[events]\n11 1 1 1 a 1 0 0 1 0\n";
    let conversion = convert(source).unwrap();
    assert_eq!(conversion.payloads[0].time, Duration::from_micros(19_999_999));
}

#[test]
fn test_malformed_event_aborts() {
    let result = convert("[tempo]\n1 1 1 1 120\n[events]\n1 1 1 1\n");
    assert!(matches!(
        result,
        Err(CueError::MalformedLine { line: 4, ref section, .. }) if section == "events"
    ));
}

#[test]
fn test_unknown_section_aborts() {
    let result = convert("[markers]\n1 1 1 1 Chorus\n");
    assert!(matches!(result, Err(CueError::UnknownSection { line: 1, .. })));
}

#[test]
fn test_degenerate_tempo_aborts() {
    let result = convert("[tempo]\n1 1 1 1 0.0000\n[events]\n1 1 1 1 a 1 0 0 1 0\n");
    assert!(matches!(result, Err(CueError::DegenerateTempoOrMeter { .. })));
}

#[test]
fn test_empty_cue_sheet() {
    let conversion = convert("").unwrap();
    assert!(conversion.payloads.is_empty());
    assert_eq!(conversion.to_json().unwrap(), "[]");
}

//! Command-line tests: run the built binary against temporary directories.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const TWINKLE: &str = include_str!("fixtures/twinkle.cue");

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cue-lyrics"))
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_writes_json_and_default_elm() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("song.cue"), TWINKLE).unwrap();

    let output = run(dir.path(), &["song.cue", "--json", "song.json"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json = fs::read_to_string(dir.path().join("song.json")).unwrap();
    assert!(json.starts_with("[\n    {\n        \"text\": \"Twin•\""));
    let elm = fs::read_to_string(dir.path().join("lyrics.elm")).unwrap();
    assert!(elm.contains("lyrics : LyricBook"));
}

#[test]
fn test_config_and_flags() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("song.cue"), TWINKLE).unwrap();
    fs::write(
        dir.path().join("lyrics.yaml"),
        "module-name: Song.Lyrics\nfont-name: Oswald\n",
    )
    .unwrap();

    let output = run(
        dir.path(),
        &[
            "song.cue",
            "--config",
            "lyrics.yaml",
            "--elm",
            "Song.elm",
            "--elm-layout",
            "flat",
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let elm = fs::read_to_string(dir.path().join("Song.elm")).unwrap();
    assert!(elm.starts_with("module Song.Lyrics exposing (..)"));
    assert!(elm.contains("\"Oswald\""));
    assert!(elm.contains("lyrics : Array Lyric"));
    assert!(!dir.path().join("lyrics.elm").exists());
}

#[test]
fn test_no_elm() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("song.cue"), TWINKLE).unwrap();

    let output = run(dir.path(), &["song.cue", "--no-elm", "--json", "out.json"]);
    assert!(output.status.success());
    assert!(dir.path().join("out.json").exists());
    assert!(!dir.path().join("lyrics.elm").exists());
}

#[test]
fn test_malformed_line_writes_nothing() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.cue"), "[events]\n1 1 1 1\n").unwrap();

    let output = run(dir.path(), &["bad.cue", "--json", "bad.json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Malformed line 2 in [events]"));
    assert!(!dir.path().join("bad.json").exists());
    assert!(!dir.path().join("lyrics.elm").exists());
}

#[test]
fn test_unknown_section_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.cue"), "[lyrics]\nla la\n").unwrap();

    let output = run(dir.path(), &["bad.cue"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown section [lyrics]"));
}

#[test]
fn test_missing_cue_file_fails() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), &["missing.cue"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read cue file"));
}

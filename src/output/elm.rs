//! Elm source output.
//!
//! The generated module exposes the font constants and a `lyrics` value. In the
//! book layout that value is nested pages of lines:
//!
//! ```text
//! lyrics : LyricBook
//! lyrics =
//!     [
//!       [
//!         [
//!           Lyric "Hel" <| 0.0 * Time.second,
//!           Lyric "lo" <| 0.25 * Time.second
//!         ] ] ]
//! ```
//!
//! The flat layout is one `Array Lyric` with an explicit break kind per lyric.

use super::seconds;
use crate::config::OutputConfig;
use crate::lyrics::{LyricBook, LyricToken};

/// Render the nested `LyricBook` module.
pub fn to_elm_module(book: &LyricBook, config: &OutputConfig) -> String {
    let mut elm = String::new();

    elm.push_str(&format!("module {} exposing (..)\n\n", config.module_name));
    elm.push_str("import Time exposing (Time)\n\n\n");

    elm.push_str("type alias Lyric =\n");
    elm.push_str("    { text : String\n");
    elm.push_str("    , time : Time\n");
    elm.push_str("    }\n\n\n");

    elm.push_str("type alias LyricLine =\n    List Lyric\n\n\n");
    elm.push_str("type alias LyricPage =\n    List LyricLine\n\n\n");
    elm.push_str("type alias LyricBook =\n    List LyricPage\n\n\n");

    push_font_constants(&mut elm, config);

    elm.push_str("lyrics : LyricBook\n");
    elm.push_str("lyrics =\n");
    elm.push_str(&book_literal(book));
    elm.push('\n');

    elm
}

/// Render the flat `Array Lyric` module.
pub fn to_elm_flat_module(tokens: &[LyricToken], config: &OutputConfig) -> String {
    let mut elm = String::new();

    elm.push_str(&format!("module {} exposing (..)\n\n", config.module_name));
    elm.push_str("import Array exposing (Array)\n");
    elm.push_str("import Time exposing (Time)\n\n\n");

    elm.push_str("type LyricBreak\n");
    elm.push_str("    = Word\n");
    elm.push_str("    | Syllable\n");
    elm.push_str("    | Line\n");
    elm.push_str("    | Page\n\n\n");

    elm.push_str("type alias Lyric =\n");
    elm.push_str("    { text : String\n");
    elm.push_str("    , break : LyricBreak\n");
    elm.push_str("    , time : Time\n");
    elm.push_str("    }\n\n\n");

    push_font_constants(&mut elm, config);

    elm.push_str("lyrics : Array Lyric\n");
    elm.push_str("lyrics =\n");
    elm.push_str("    Array.fromList <|\n");
    if tokens.is_empty() {
        elm.push_str("        []\n");
        return elm;
    }
    for (i, token) in tokens.iter().enumerate() {
        let lead = if i == 0 { '[' } else { ',' };
        elm.push_str(&format!(
            "        {} Lyric \"{}\" {} {:?}\n",
            lead,
            escape_elm(&token.text),
            token.break_kind,
            seconds(token.time)
        ));
    }
    elm.push_str("        ]\n");

    elm
}

fn push_font_constants(elm: &mut String, config: &OutputConfig) {
    elm.push_str("lyricBaseFontTTF : String\n");
    elm.push_str("lyricBaseFontTTF =\n");
    elm.push_str(&format!("    \"{}\"\n\n\n", escape_elm(&config.font_path)));

    elm.push_str("lyricBaseFontName : String\n");
    elm.push_str("lyricBaseFontName =\n");
    elm.push_str(&format!("    \"{}\"\n\n\n", escape_elm(&config.font_name)));
}

fn book_literal(book: &LyricBook) -> String {
    let pages: Vec<String> = book
        .pages
        .iter()
        .map(|page| {
            let lines: Vec<String> = page
                .iter()
                .map(|line| {
                    let tokens: Vec<String> = line.iter().map(token_literal).collect();
                    format!("        [\n{}\n        ]", tokens.join(",\n"))
                })
                .collect();
            format!("      [\n{} ]", lines.join(",\n"))
        })
        .collect();
    format!("    [\n{} ]", pages.join(",\n"))
}

fn token_literal(token: &LyricToken) -> String {
    format!(
        "          Lyric \"{}\" <| {:?} * Time.second",
        escape_elm(&token.text),
        seconds(token.time)
    )
}

fn escape_elm(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

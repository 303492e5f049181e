//! # Lyric Hierarchy
//!
//! Classifies lyric tokens by their trailing break marker and regroups the flat,
//! timed token stream into pages of lines.
//!
//! ## Break Markers
//! ```text
//! •  (U+2022)  Syllable  token is part of a word continued by the next token
//! ¬  (U+00AC)  Line      token ends a line
//! ¶  (U+00B6)  Page      token ends a page
//!    (none)    Word      token ends a word
//! ```
//!
//! Classification strips the marker from Syllable, Line and Page tokens. Word
//! tokens instead get a trailing space so that concatenating a line's texts
//! yields readable, space-separated words.
//!
//! ## Grouping
//! ```text
//! LyricBook
//!   └── Vec<LyricPage>        split after each Page token
//!         └── Vec<LyricLine>  split after each Line token
//!               └── Vec<LyricToken>
//! ```
//!
//! [`group_while`] always yields a final group at end of input, even when it is
//! empty. A stream ending in a Line token thus ends with an empty line, and one
//! ending in a Page token ends with an empty page. [`EmptyGroups`] decides
//! whether those are kept.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::timeline::TimedPayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreakKind {
    Word,
    Syllable,
    Line,
    Page,
}

impl BreakKind {
    /// Marker character, or `None` for plain words.
    pub fn marker(&self) -> Option<char> {
        match self {
            BreakKind::Word => None,
            BreakKind::Syllable => Some('•'),
            BreakKind::Line => Some('¬'),
            BreakKind::Page => Some('¶'),
        }
    }
}

impl fmt::Display for BreakKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BreakKind::Word => "Word",
            BreakKind::Syllable => "Syllable",
            BreakKind::Line => "Line",
            BreakKind::Page => "Page",
        };
        f.write_str(name)
    }
}

/// Split raw token text into display text and break kind.
///
/// # Example
/// ```
/// use cue_lyrics::lyrics::{classify, BreakKind};
///
/// assert_eq!(classify("Hel•"), ("Hel".to_string(), BreakKind::Syllable));
/// assert_eq!(classify("world"), ("world ".to_string(), BreakKind::Word));
/// ```
pub fn classify(raw: &str) -> (String, BreakKind) {
    for kind in [BreakKind::Syllable, BreakKind::Line, BreakKind::Page] {
        if has_break(&[kind], raw) {
            let stripped = raw.char_indices().last().map_or(0, |(i, _)| i);
            return (raw[..stripped].to_string(), kind);
        }
    }
    (format!("{} ", raw), BreakKind::Word)
}

/// True if `raw` ends with the marker of any of `kinds`.
pub fn has_break(kinds: &[BreakKind], raw: &str) -> bool {
    kinds
        .iter()
        .filter_map(BreakKind::marker)
        .any(|marker| raw.ends_with(marker))
}

/// A classified lyric token with its absolute time.
#[derive(Debug, Clone, PartialEq)]
pub struct LyricToken {
    pub text: String,
    pub break_kind: BreakKind,
    pub time: Duration,
}

impl LyricToken {
    pub fn new(raw: &str, time: Duration) -> Self {
        let (text, break_kind) = classify(raw);
        Self {
            text,
            break_kind,
            time,
        }
    }
}

impl From<&TimedPayload> for LyricToken {
    fn from(timed: &TimedPayload) -> Self {
        LyricToken::new(&timed.payload.text, timed.time)
    }
}

/// Lazy iterator returned by [`group_while`].
pub struct GroupWhile<I, P> {
    items: I,
    predicate: P,
    finished: bool,
}

impl<I, P> Iterator for GroupWhile<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let mut group = Vec::new();
        for item in self.items.by_ref() {
            let continues = (self.predicate)(&item);
            group.push(item);
            if !continues {
                return Some(group);
            }
        }
        self.finished = true;
        Some(group)
    }
}

/// Partition `items` into groups, closing a group after each item that fails
/// `predicate` (the failing item is the last element of its group).
///
/// The remainder is yielded as a final group at end of input, even if empty.
///
/// # Example
/// ```
/// use cue_lyrics::lyrics::group_while;
///
/// let groups: Vec<Vec<i32>> = group_while(|n: &i32| *n != 0, vec![1, 0, 2, 3, 0]).collect();
/// assert_eq!(groups, vec![vec![1, 0], vec![2, 3, 0], vec![]]);
/// ```
pub fn group_while<I, P>(predicate: P, items: I) -> GroupWhile<I::IntoIter, P>
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    GroupWhile {
        items: items.into_iter(),
        predicate,
        finished: false,
    }
}

/// What to do with the empty trailing groups produced by [`group_while`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyGroups {
    /// Keep them; the output has the same shape the lyric client has always received.
    #[default]
    Keep,
    /// Remove empty lines, then pages left without lines.
    Drop,
}

pub type LyricLine = Vec<LyricToken>;
pub type LyricPage = Vec<LyricLine>;

/// Pages of lines of tokens, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LyricBook {
    pub pages: Vec<LyricPage>,
}

impl LyricBook {
    pub fn build<I>(tokens: I, empty_groups: EmptyGroups) -> Self
    where
        I: IntoIterator<Item = LyricToken>,
    {
        let pages = group_while(|token: &LyricToken| token.break_kind != BreakKind::Page, tokens)
            .map(|page| {
                group_while(|token: &LyricToken| token.break_kind != BreakKind::Line, page)
                    .filter(|line| empty_groups == EmptyGroups::Keep || !line.is_empty())
                    .collect::<LyricPage>()
            })
            .filter(|page| empty_groups == EmptyGroups::Keep || !page.is_empty())
            .collect();
        Self { pages }
    }

    pub fn line_count(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }

    pub fn token_count(&self) -> usize {
        self.pages.iter().flatten().map(Vec::len).sum()
    }
}

//! Whitespace normalization and the per-paragraph table pass.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::table;

static EXCESS_NEWLINES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("newline pattern compiles"));

static PARAGRAPH_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{2,}").expect("paragraph pattern compiles"));

/// Normalize whitespace and rewrite tables paragraph by paragraph.
///
/// In order: unify line endings to `\n`, collapse runs of three-or-more
/// newlines down to one blank line, right-trim every line, trim the
/// whole text. Paragraphs are then re-split on blank-line boundaries,
/// table rewriting is applied to each, empty results are dropped, and
/// the rest are rejoined with a single blank line.
pub fn normalize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let collapsed = EXCESS_NEWLINES_RE.replace_all(&unified, "\n\n");
    let trimmed = collapsed
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");

    let paragraphs: Vec<String> = PARAGRAPH_SPLIT_RE
        .split(trimmed.trim())
        .map(table::rewrite_if_table)
        .filter(|paragraph| !paragraph.trim().is_empty())
        .collect();
    paragraphs.join("\n\n")
}

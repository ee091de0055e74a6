//! Fence guard: lifts fenced code blocks out of the text before any
//! rewriting stage runs, and puts them back afterwards.
//!
//! Extracted blocks live in an ordered list and are referenced from the
//! guarded text by positional index, so no stage between extraction and
//! restoration can touch code content.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::html;

/// Control character used to build placeholder tokens.
///
/// Known limitation: input that already contains U+001A would collide
/// with the placeholders. Realistic chat/LLM text never does.
pub(crate) const SENTINEL: char = '\u{1A}';

/// Delimiter style of a fenced block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backtick,
    Tilde,
}

impl FenceKind {
    pub fn marker(self) -> &'static str {
        match self {
            FenceKind::Backtick => "```",
            FenceKind::Tilde => "~~~",
        }
    }
}

/// A code block lifted out of the text, identified later purely by its
/// position in the extraction order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceBlock {
    pub language: String,
    pub body: String,
    pub kind: FenceKind,
}

impl FenceBlock {
    /// Original fenced form: marker + language tag + body + marker.
    fn to_markdown(&self) -> String {
        let marker = self.kind.marker();
        if self.body.is_empty() {
            format!("{marker}{}\n{marker}", self.language)
        } else {
            format!("{marker}{}\n{}\n{marker}", self.language, self.body)
        }
    }

    /// Escaped `<pre><code>` form for HTML render mode.
    fn to_html(&self) -> String {
        let body = html::escape(&self.body);
        if self.language.is_empty() {
            format!("<pre><code>{body}</code></pre>")
        } else {
            format!(
                "<pre><code class=\"language-{}\">{body}</code></pre>",
                self.language
            )
        }
    }
}

// Two marker styles, optional bare-word language tag, non-greedy body up
// to the matching closer of the same style; trailing whitespace allowed
// before end-of-line/end-of-text. Blocks do not nest. An opening marker
// with no closer never matches and flows through as plain text.
static FENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ms)```([A-Za-z0-9_+-]*)[ \t]*\n(.*?)\n?```[ \t]*$|~~~([A-Za-z0-9_+-]*)[ \t]*\n(.*?)\n?~~~[ \t]*$",
    )
    .expect("fence pattern compiles")
});

pub(crate) fn placeholder(index: usize) -> String {
    format!("{SENTINEL}{index}{SENTINEL}")
}

/// Replace every fenced block with an indexed placeholder and return the
/// blocks in extraction order.
pub fn extract(text: &str) -> (String, Vec<FenceBlock>) {
    let mut blocks = Vec::new();
    let mut guarded = String::with_capacity(text.len());
    let mut last = 0;

    for caps in FENCE_RE.captures_iter(text) {
        let whole = caps.get(0).expect("group 0 is always present");
        let (kind, language, body) = if caps.get(2).is_some() {
            (FenceKind::Backtick, &caps[1], &caps[2])
        } else {
            (FenceKind::Tilde, &caps[3], &caps[4])
        };

        guarded.push_str(&text[last..whole.start()]);
        guarded.push_str(&placeholder(blocks.len()));
        last = whole.end();

        blocks.push(FenceBlock {
            language: language.to_string(),
            body: body.to_string(),
            kind,
        });
    }
    guarded.push_str(&text[last..]);

    (guarded, blocks)
}

/// Replace each placeholder with its block, either in the original
/// fenced form or rendered as an escaped HTML code element.
pub fn restore(guarded: &str, blocks: &[FenceBlock], render_as_code: bool) -> String {
    let mut text = guarded.to_string();
    for (index, block) in blocks.iter().enumerate() {
        let rendered = if render_as_code {
            block.to_html()
        } else {
            block.to_markdown()
        };
        text = text.replace(&placeholder(index), &rendered);
    }
    text
}

//! Conservative rendering of a deliberately narrow markdown subset into
//! the restricted HTML chat clients accept.
//!
//! Only headings (demoted to bold), `**bold**`, inline backtick code,
//! and fenced blocks are rewritten; everything else is escaped and
//! passed through as plain text. Italics are excluded on purpose so
//! identifiers like `foo_bar_baz` are never mis-rendered.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::fence;

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^##[ \t]+(.+)$").expect("heading pattern compiles"));

// Length-bounded so a stray `**` can never swallow the rest of the text.
static BOLD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*\n]{1,200})\*\*").expect("bold pattern compiles"));

static INLINE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`\n]+)`").expect("inline code pattern compiles"));

/// Escape the three HTML-significant characters.
pub(crate) fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render one chunk as restricted HTML.
///
/// Runs strictly after chunking: fences are re-extracted here because a
/// block may have been re-split at a text boundary and must end up as
/// escaped literal code, never as markup.
pub fn render(chunk: &str) -> String {
    let (guarded, blocks) = fence::extract(chunk);
    let escaped = escape(&guarded);
    let headed = HEADING_RE.replace_all(&escaped, "<b>$1</b>");
    let bolded = BOLD_RE.replace_all(&headed, "<b>$1</b>");
    let coded = convert_inline_code(&bolded);
    fence::restore(&coded, &blocks, true)
}

/// Convert single-backtick spans into `<code>`, skipping spans that sit
/// directly against a word character on either side. The regex crate
/// has no lookarounds, so the neighbor check is explicit.
fn convert_inline_code(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut last = 0;
    for caps in INLINE_CODE_RE.captures_iter(text) {
        let whole = caps.get(0).expect("group 0 is always present");
        let preceded = text[..whole.start()]
            .chars()
            .next_back()
            .is_some_and(is_word);
        let followed = text[whole.end()..].chars().next().is_some_and(is_word);

        output.push_str(&text[last..whole.start()]);
        if preceded || followed {
            output.push_str(whole.as_str());
        } else {
            output.push_str("<code>");
            output.push_str(&caps[1]);
            output.push_str("</code>");
        }
        last = whole.end();
    }
    output.push_str(&text[last..]);
    output
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

//! Boundary-safe splitting of long text into length-bounded chunks.
//!
//! Lengths are measured in characters, not bytes. A chunk boundary must
//! never fall inside an HTML entity reference, an HTML tag, or a whole
//! `<pre>...</pre>` element; when one of those straddles the cut, the
//! chunk is extended past the configured maximum instead (soft limit).

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters scanned beyond the window when looking for structural
/// units straddling the cut. Also the de-facto cap on how far a chunk
/// can overrun the maximum.
const LOOKAHEAD_SLACK: usize = 200;

// Whole <pre> elements first so they win over their own opening tag.
static STRUCTURAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<pre>.*?</pre>|<[^<>]+>|&#x?[0-9a-fA-F]+;|&[a-zA-Z][a-zA-Z0-9]*;")
        .expect("structural pattern compiles")
});

/// Split `text` into ordered chunks of at most `max_len` characters,
/// preferring paragraph and line boundaries and never bisecting a
/// structural unit. Chunks are trimmed and non-empty; concatenated in
/// order they reproduce the input modulo whitespace at the seams.
pub fn split(text: &str, max_len: usize) -> Vec<String> {
    let max_len = max_len.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;

    loop {
        rest = rest.trim_start_matches(|c: char| c == ' ' || c == '\n');
        if rest.is_empty() {
            break;
        }
        if rest.chars().count() <= max_len {
            let piece = rest.trim();
            if !piece.is_empty() {
                chunks.push(piece.to_string());
            }
            break;
        }

        let window_end = byte_at_char(rest, max_len);
        let mut breakpoint = window_end;

        // Structural units straddling the cut extend the chunk to their
        // end. Matches are ordered, so one extension can cascade into
        // the next straddling unit.
        let lookahead_end = byte_at_char(rest, max_len + LOOKAHEAD_SLACK);
        let mut structural = false;
        for unit in STRUCTURAL_RE.find_iter(&rest[..lookahead_end]) {
            if unit.start() >= breakpoint {
                break;
            }
            if unit.end() > breakpoint {
                breakpoint = unit.end();
                structural = true;
            }
        }

        // Otherwise prefer a paragraph break, then a line break, but
        // only past the window midpoint so chunks never degenerate.
        if !structural {
            let midpoint = byte_at_char(rest, max_len / 2);
            let window = &rest[..window_end];
            if let Some(index) = window.rfind("\n\n").filter(|&i| i > midpoint) {
                breakpoint = index;
            } else if let Some(index) = window.rfind('\n').filter(|&i| i > midpoint) {
                breakpoint = index;
            }
        }

        let piece = rest[..breakpoint].trim();
        if !piece.is_empty() {
            chunks.push(piece.to_string());
        }
        rest = &rest[breakpoint..];
    }

    chunks
}

/// Byte offset of the `n`-th character, saturating at the end of `s`.
fn byte_at_char(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn without_whitespace(text: &str) -> String {
        text.split_whitespace().collect()
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        assert_eq!(split("hello", 10), vec!["hello"]);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(split("", 10).is_empty());
        assert!(split("  \n ", 10).is_empty());
    }

    #[test]
    fn prefers_paragraph_break_past_midpoint() {
        let text = format!("{}\n\n{}", "a".repeat(60), "b".repeat(60));
        let chunks = split(&text, 100);
        assert_eq!(chunks, vec!["a".repeat(60), "b".repeat(60)]);
    }

    #[test]
    fn prefers_line_break_when_no_paragraph_break() {
        let text = format!("{}\n{}", "a".repeat(60), "b".repeat(60));
        let chunks = split(&text, 100);
        assert_eq!(chunks, vec!["a".repeat(60), "b".repeat(60)]);
    }

    #[test]
    fn ignores_breaks_before_the_midpoint() {
        let text = format!("ab\n{}", "c".repeat(120));
        let chunks = split(&text, 100);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 100);
        assert_eq!(chunks[1], "c".repeat(23));
    }

    #[test]
    fn never_cuts_inside_an_entity() {
        let text = format!("{}&amp;{}", "a".repeat(97), "b".repeat(20));
        let chunks = split(&text, 100);
        assert!(chunks[0].ends_with("&amp;"));
        assert_eq!(chunks[1], "b".repeat(20));
    }

    #[test]
    fn never_cuts_inside_a_tag() {
        let text = format!("{}<b>{}", "a".repeat(98), "c".repeat(10));
        let chunks = split(&text, 100);
        assert!(chunks[0].ends_with("<b>"));
    }

    #[test]
    fn whole_pre_element_is_kept_together() {
        let text = format!("{}<pre>xyz</pre>{}", "a".repeat(90), "d".repeat(30));
        let chunks = split(&text, 100);
        assert!(chunks[0].ends_with("</pre>"));
        assert!(chunks[0].chars().count() > 100);
        assert_eq!(chunks[1], "d".repeat(30));
    }

    #[test]
    fn entity_near_default_limit_is_never_truncated() {
        let text = format!("{} &amp; b", "a".repeat(4080));
        for max_len in [4085, 4096] {
            for chunk in split(&text, max_len) {
                assert!(!chunk.ends_with("&am"), "truncated entity in {chunk:?}");
                assert!(!chunk.ends_with("&"), "truncated entity in {chunk:?}");
            }
        }
    }

    #[test]
    fn chunks_never_start_with_whitespace() {
        let text = format!("{}\n\n  {}\n{}", "a".repeat(80), "b".repeat(80), "c".repeat(80));
        for chunk in split(&text, 100) {
            assert!(!chunk.starts_with([' ', '\n']));
            assert!(!chunk.ends_with([' ', '\n']));
        }
    }

    #[test]
    fn concatenation_reproduces_input_modulo_seam_whitespace() {
        let text = format!(
            "{}\n\n{}\n{} &amp; <i>x</i>",
            "a".repeat(70),
            "b".repeat(70),
            "c".repeat(70)
        );
        let chunks = split(&text, 90);
        assert!(chunks.len() > 1);
        assert_eq!(
            without_whitespace(&chunks.concat()),
            without_whitespace(&text)
        );
    }

    #[test]
    fn multibyte_text_is_measured_in_characters() {
        let text = format!("{}\n{}", "é".repeat(60), "ü".repeat(60));
        let chunks = split(&text, 100);
        assert_eq!(chunks, vec!["é".repeat(60), "ü".repeat(60)]);
    }
}

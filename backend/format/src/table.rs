//! Markdown table detection and bullet-list rewriting.
//!
//! Chat clients render `|`-delimited tables as soup. Every paragraph
//! that strictly looks like a markdown table (header row, separator row
//! directly beneath it, at least one data row) is rewritten into one
//! bullet line per data row; anything else passes through untouched.

use once_cell::sync::Lazy;
use regex::Regex;

/// Placeholder for a cell whose text is empty.
const EMPTY_CELL: &str = "—";

// Header-separator row: one-or-more pipe-delimited groups containing
// only spaces, hyphens, and colons, e.g. `|---|:---:|` or `--- | ---`.
static SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\|?[ \t:-]+(?:\|[ \t:-]+)*\|?$").expect("separator pattern compiles"));

/// Rewrite `paragraph` into bullet lines if it is a markdown table,
/// otherwise return it unchanged.
///
/// Detection is deliberately strict: the separator must sit at line
/// index 1, directly beneath the header. Searching further down would
/// turn arbitrary pipe-containing prose into false positives.
pub fn rewrite_if_table(paragraph: &str) -> String {
    let lines: Vec<&str> = paragraph.lines().collect();
    if lines.len() < 3 || !lines[0].contains('|') {
        return paragraph.to_string();
    }
    if !SEPARATOR_RE.is_match(lines[1].trim()) {
        return paragraph.to_string();
    }

    let header = parse_row(lines[0]);
    let bullets: Vec<String> = lines[2..]
        .iter()
        // Lines without a pipe are dropped from table output.
        .filter(|line| line.contains('|'))
        .map(|line| render_row(&header, &parse_row(line)))
        .collect();

    if bullets.is_empty() {
        return paragraph.to_string();
    }
    bullets.join("\n")
}

/// Split a pipe-delimited line into trimmed cells, stripping one leading
/// and one trailing pipe. Empty cells are preserved.
fn parse_row(line: &str) -> Vec<String> {
    let row = line.trim();
    let row = row.strip_prefix('|').unwrap_or(row);
    let row = row.strip_suffix('|').unwrap_or(row);
    row.split('|').map(|cell| cell.trim().to_string()).collect()
}

fn render_row(header: &[String], cells: &[String]) -> String {
    let parts: Vec<String> = if cells.len() == header.len() {
        header
            .iter()
            .zip(cells)
            .map(|(label, cell)| format!("{}: {}", text_or_dash(label), text_or_dash(cell)))
            .collect()
    } else {
        // Cell count mismatch: keep the values, drop the labels.
        cells.iter().map(|cell| text_or_dash(cell).to_string()).collect()
    };
    format!("• {}", parts.join(" · "))
}

fn text_or_dash(cell: &str) -> &str {
    if cell.is_empty() { EMPTY_CELL } else { cell }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_table_to_bullets() {
        let input = "| Name | Price |\n|---|---|\n| A | 1 |\n| B | 2 |";
        let output = rewrite_if_table(input);
        assert_eq!(output, "• Name: A · Price: 1\n• Name: B · Price: 2");
        assert!(!output.contains('|'));
    }

    #[test]
    fn alignment_colons_are_accepted_in_separator() {
        let input = "| A | B |\n|:---|---:|\n| 1 | 2 |";
        assert_eq!(rewrite_if_table(input), "• A: 1 · B: 2");
    }

    #[test]
    fn separator_must_sit_directly_beneath_header() {
        let input = "| A | B |\nsome prose\n|---|---|\n| 1 | 2 |";
        assert_eq!(rewrite_if_table(input), input);
    }

    #[test]
    fn short_paragraphs_are_untouched() {
        let input = "| A | B |\n|---|---|";
        assert_eq!(rewrite_if_table(input), input);
    }

    #[test]
    fn paragraph_without_leading_pipe_line_is_untouched() {
        let input = "no table here\njust\nlines";
        assert_eq!(rewrite_if_table(input), input);
    }

    #[test]
    fn empty_cells_render_as_em_dash() {
        let input = "| A | B |\n|---|---|\n| 1 |  |";
        assert_eq!(rewrite_if_table(input), "• A: 1 · B: —");
    }

    #[test]
    fn mismatched_cell_count_drops_header_labels() {
        let input = "| A | B |\n|---|---|\n| 1 | 2 | 3 |";
        assert_eq!(rewrite_if_table(input), "• 1 · 2 · 3");
    }

    #[test]
    fn pipeless_lines_inside_table_are_dropped() {
        let input = "| A | B |\n|---|---|\n| 1 | 2 |\nstray note";
        assert_eq!(rewrite_if_table(input), "• A: 1 · B: 2");
    }

    #[test]
    fn zero_data_rows_returns_paragraph_unchanged() {
        let input = "| A | B |\n|---|---|\nno pipes below";
        assert_eq!(rewrite_if_table(input), input);
    }
}

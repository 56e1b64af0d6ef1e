//! Backlog table runs to Markdown pipe tables.
//!
//! A table run is a maximal contiguous sequence of lines whose trimmed form
//! starts with `|`. Each run is rewritten as one Markdown table; everything
//! else passes through unchanged in its original position.

use std::sync::LazyLock;

use regex::Regex;

/// Trailing row header marker: `|h`, case-insensitive, optional whitespace.
static HEADER_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\|h\s*$").unwrap());

/// One parsed table row.
struct Row {
    /// Trimmed, escaped cell contents in source order.
    cells: Vec<String>,
    /// Row carried the trailing `|h` header marker.
    header: bool,
}

impl Row {
    /// Parse a raw table line into cells.
    ///
    /// Strips the header marker, one leading and one trailing pipe, then
    /// splits on pipe. Cells are trimmed and stripped of any leading tilde
    /// run (Backlog cell spans); splitting on pipe leaves no literal pipes
    /// to escape.
    fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let header = HEADER_MARKER_RE.is_match(trimmed);
        let body = if header {
            HEADER_MARKER_RE.replace(trimmed, "").into_owned()
        } else {
            trimmed.to_owned()
        };
        let body = body.strip_prefix('|').unwrap_or(&body);
        let body = body.strip_suffix('|').unwrap_or(body);
        let cells = body
            .split('|')
            .map(|cell| cell.trim().trim_start_matches('~').to_owned())
            .collect();
        Self { cells, header }
    }
}

/// Rewrite every table run in `text` as a Markdown pipe table.
pub(crate) fn transform_tables(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut run: Vec<Row> = Vec::new();
    for line in text.split('\n') {
        if line.trim().starts_with('|') {
            run.push(Row::parse(line));
        } else {
            flush_run(&mut run, &mut out);
            out.push(line.to_owned());
        }
    }
    flush_run(&mut run, &mut out);
    out.join("\n")
}

/// Emit a pending run as a Markdown table and clear it.
///
/// The first header-flagged row becomes the header; without one, an all-empty
/// header row is synthesized and every row stays data. A blank line precedes
/// the header so renderers detect the table even directly after other
/// content. Rows keep their original order; short rows are right-padded to
/// the widest row of the run.
fn flush_run(run: &mut Vec<Row>, out: &mut Vec<String>) {
    if run.is_empty() {
        return;
    }
    let width = run.iter().map(|row| row.cells.len()).max().unwrap_or(1).max(1);
    let header_index = run.iter().position(|row| row.header);

    out.push(String::new());
    match header_index {
        Some(i) => out.push(format_row(&run[i].cells, width)),
        None => out.push(format_row(&[], width)),
    }
    out.push(format!("|{}", " --- |".repeat(width)));
    for (i, row) in run.iter().enumerate() {
        if Some(i) == header_index {
            continue;
        }
        out.push(format_row(&row.cells, width));
    }
    run.clear();
}

/// Format one table row, right-padded with empty cells to `width`.
fn format_row(cells: &[String], width: usize) -> String {
    let mut padded: Vec<&str> = cells.iter().map(String::as_str).collect();
    padded.resize(width, "");
    format!("| {} |", padded.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_header_flagged_run() {
        let output = transform_tables("|a|b|h\n|1|2|");
        assert_eq!(output, "\n| a | b |\n| --- | --- |\n| 1 | 2 |");
    }

    #[test]
    fn test_header_marker_is_case_insensitive() {
        let output = transform_tables("|a|H\n|1|");
        assert_eq!(output, "\n| a |\n| --- |\n| 1 |");
    }

    #[test]
    fn test_unflagged_run_gets_empty_header() {
        let output = transform_tables("|1|2|\n|3|4|");
        assert_eq!(output, "\n|  |  |\n| --- | --- |\n| 1 | 2 |\n| 3 | 4 |");
    }

    #[test]
    fn test_single_line_run_is_a_full_table() {
        let output = transform_tables("|only|");
        assert_eq!(output, "\n|  |\n| --- |\n| only |");
    }

    #[test]
    fn test_short_rows_are_right_padded() {
        let output = transform_tables("|a|b|c|h\n|1|");
        assert_eq!(output, "\n| a | b | c |\n| --- | --- | --- |\n| 1 |  |  |");
    }

    #[test]
    fn test_leading_tilde_run_is_stripped() {
        let output = transform_tables("|~~a|b|h\n|1|2|");
        assert!(output.contains("| a | b |"));
    }

    #[test]
    fn test_non_table_lines_interleave_in_order() {
        let output = transform_tables("before\n|a|h\n|1|\nafter");
        assert_eq!(output, "before\n\n| a |\n| --- |\n| 1 |\nafter");
    }

    #[test]
    fn test_separate_runs_become_separate_tables() {
        let output = transform_tables("|a|h\n\n|b|h");
        assert_eq!(output, "\n| a |\n| --- |\n\n\n| b |\n| --- |");
    }

    #[test]
    fn test_indented_table_line_still_counts() {
        let output = transform_tables("  |a|h\n  |1|");
        assert_eq!(output, "\n| a |\n| --- |\n| 1 |");
    }

    #[test]
    fn test_no_tables_passes_through() {
        let text = "plain\ntext";
        assert_eq!(transform_tables(text), text);
    }

    #[test]
    fn test_later_header_rows_become_data() {
        let output = transform_tables("|a|h\n|b|h\n|1|");
        assert_eq!(output, "\n| a |\n| --- |\n| b |\n| 1 |");
    }
}

//! Backlog notation to Markdown conversion engine.
//!
//! Converts text written in the Backlog wiki markup dialect into equivalent
//! Markdown. The conversion is a strictly sequential pipeline:
//!
//! 1. **Normalize** line endings (`\r\n` and lone `\r` become `\n`).
//! 2. **Extract** protected regions (fenced code, inline code, quote blocks)
//!    into placeholder markers so later passes cannot touch them.
//! 3. **Transform** contiguous runs of `|`-prefixed lines into Markdown
//!    pipe tables.
//! 4. **Rewrite** every remaining line through an ordered rule list
//!    (headings, lists, inline styles, links, images).
//! 5. **Restore** the protected regions in their final rendered form.
//!
//! The engine is a total function over an in-memory string: it performs no
//! I/O, keeps no cross-call state, and degrades gracefully on malformed
//! markup (unmatched delimiters are left as literal text). Calls are
//! independent and safe to run concurrently.
//!
//! # Example
//!
//! ```
//! use backmark_convert::convert;
//!
//! assert_eq!(convert("** Title"), "## Title");
//! assert_eq!(convert("- item\n-- nested"), "- item\n    - nested");
//! ```

mod blocks;
mod line;
mod table;

use blocks::ProtectedBlocks;

/// Convert Backlog notation to Markdown.
///
/// Empty input produces an empty string. The result is deterministic for a
/// given input; malformed markup never fails, it passes through as literal
/// text.
#[must_use]
pub fn convert(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let normalized = normalize_line_endings(text);
    let (protected, blocks) = ProtectedBlocks::extract(&normalized);
    let converted = convert_block(&protected);
    blocks.restore(&converted)
}

/// Run the table and line passes over a block of text.
///
/// This is the pipeline minus extraction/restoration. Quote interiors are
/// converted through this entry point: by the time a quote body is captured,
/// code and quote regions inside it are already markers, so re-extraction is
/// unnecessary and the markers pass through both stages untouched.
pub(crate) fn convert_block(text: &str) -> String {
    let tabled = table::transform_tables(text);
    tabled
        .split('\n')
        .map(line::rewrite_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Unify line endings to a single `\n` convention.
fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

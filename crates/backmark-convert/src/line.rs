//! Ordered single-line rewrite rules.
//!
//! Each rule rewrites one line in place; later rules see the output of
//! earlier ones but a rule's own output is never re-scanned. The two list
//! rules run last and short-circuit the line when they match.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Spaces per list nesting level.
const INDENT_WIDTH: usize = 4;

/// Table-of-contents token: `#contents`.
static TOC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)#contents").unwrap());

/// Line-break macro: `&br;`.
static BR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)&br;").unwrap());

/// Image and thumbnail macros: `#image(arg)`, `#thumbnail(arg)`.
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)#(?:image|thumbnail)\(([^)]+)\)").unwrap());

/// Bracketed link: `[[Label>Target]]` or `[[Label:Target]]`.
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]>:]+)[>:]([^\]]+)\]\]").unwrap());

/// Strikethrough: `%%text%%`.
static STRIKE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%%([^%]+)%%").unwrap());

/// Italic emphasis: `'''text'''`. Must run before [`BOLD_RE`], which would
/// otherwise consume two of the three apostrophes and leave a stray one.
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'''(.*?)'''").unwrap());

/// Bold emphasis: `''text''`.
static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"''(.*?)''").unwrap());

/// Heading: the whole line is 1-6 asterisks, whitespace, then text.
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\*{1,6})\s+(.*)$").unwrap());

/// Unordered list item: a run of hyphens, whitespace, then text.
static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(-+)\s+(.*)$").unwrap());

/// Ordered list item: a run of plus signs, whitespace, then text.
static ORDERED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\++)\s+(.*)$").unwrap());

/// Apply the ordered rule list to one line.
pub(crate) fn rewrite_line(line: &str) -> String {
    let line = TOC_RE.replace_all(line, "[toc]");
    let line = BR_RE.replace_all(&line, "<br>");
    let line = IMAGE_RE.replace_all(&line, |caps: &Captures| image_markdown(&caps[1]));
    let line = LINK_RE.replace_all(&line, "[${1}](${2})");
    let line = STRIKE_RE.replace_all(&line, "~~${1}~~");
    let line = ITALIC_RE.replace_all(&line, "*${1}*");
    let line = BOLD_RE.replace_all(&line, "**${1}**");
    let line = HEADING_RE.replace(&line, |caps: &Captures| {
        let level = caps[1].len().min(6);
        format!("{} {}", "#".repeat(level), caps[2].trim())
    });

    if let Some(caps) = BULLET_RE.captures(&line) {
        return format!("{}- {}", indent(caps[1].len()), &caps[2]);
    }
    if let Some(caps) = ORDERED_RE.captures(&line) {
        // Renderers auto-number, so every depth emits `1.`.
        return format!("{}1. {}", indent(caps[1].len()), &caps[2]);
    }
    line.into_owned()
}

/// Indentation for a list marker of the given length (depth = length - 1).
fn indent(marker_len: usize) -> String {
    " ".repeat(marker_len.saturating_sub(1) * INDENT_WIDTH)
}

/// Render an image macro argument.
///
/// Absolute URLs become inline images. Anything else is a relative path or
/// bare filename and becomes a reference-style image; the reference target is
/// deliberately left unresolved.
fn image_markdown(arg: &str) -> String {
    let lower = arg.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        format!("![]({arg})")
    } else {
        format!("![][{arg}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_toc_marker() {
        assert_eq!(rewrite_line("#Contents"), "[toc]");
    }

    #[test]
    fn test_line_break_macro() {
        assert_eq!(rewrite_line("one&BR;two"), "one<br>two");
    }

    #[test]
    fn test_image_with_absolute_url() {
        assert_eq!(
            rewrite_line("#image(https://example.com/a.png)"),
            "![](https://example.com/a.png)"
        );
    }

    #[test]
    fn test_thumbnail_with_relative_path_stays_reference_style() {
        assert_eq!(rewrite_line("#thumbnail(shot.png)"), "![][shot.png]");
    }

    #[test]
    fn test_bracketed_link_with_gt_separator() {
        assert_eq!(
            rewrite_line("[[Backlog>https://backlog.com]]"),
            "[Backlog](https://backlog.com)"
        );
    }

    #[test]
    fn test_bracketed_link_with_colon_separator() {
        assert_eq!(rewrite_line("[[Home:index.html]]"), "[Home](index.html)");
    }

    #[test]
    fn test_strikethrough() {
        assert_eq!(rewrite_line("%%gone%%"), "~~gone~~");
    }

    #[test]
    fn test_triple_quote_emphasis_before_double() {
        assert_eq!(rewrite_line("'''italic'''"), "*italic*");
        assert_eq!(rewrite_line("''bold''"), "**bold**");
        assert_eq!(rewrite_line("a '''x''' and ''y''"), "a *x* and **y**");
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(rewrite_line("* One"), "# One");
        assert_eq!(rewrite_line("** Two"), "## Two");
        assert_eq!(rewrite_line("****** Six"), "###### Six");
    }

    #[test]
    fn test_seven_asterisks_is_not_a_heading() {
        assert_eq!(rewrite_line("******* Seven"), "******* Seven");
    }

    #[test]
    fn test_heading_trims_trailing_whitespace() {
        assert_eq!(rewrite_line("* Title  "), "# Title");
    }

    #[test]
    fn test_bullet_depths() {
        assert_eq!(rewrite_line("- item"), "- item");
        assert_eq!(rewrite_line("-- item"), "    - item");
        assert_eq!(rewrite_line("--- item"), "        - item");
    }

    #[test]
    fn test_ordered_list_always_emits_one() {
        assert_eq!(rewrite_line("+ first"), "1. first");
        assert_eq!(rewrite_line("++ nested"), "    1. nested");
    }

    #[test]
    fn test_list_item_keeps_earlier_rewrites() {
        assert_eq!(rewrite_line("- see [[Docs>guide]]"), "- see [Docs](guide)");
    }

    #[test]
    fn test_plain_line_unchanged() {
        assert_eq!(rewrite_line("nothing special"), "nothing special");
    }

    #[test]
    fn test_mid_line_hyphen_is_not_a_list() {
        assert_eq!(rewrite_line("a - b"), "a - b");
    }
}

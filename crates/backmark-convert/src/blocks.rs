//! Protected-region extraction and restoration.
//!
//! Fenced code, inline code, and quote blocks must not undergo table or line
//! rewriting. Each region is pulled out of the text and replaced by an opaque
//! marker holding an index into a side table; after the rewrite passes the
//! markers are substituted with the final rendered form.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::convert_block;

/// Marker delimiters from the Unicode private-use area. Nothing the table or
/// line passes match can collide with these, so markers survive both stages
/// untouched.
const MARKER_OPEN: char = '\u{E000}';
const MARKER_CLOSE: char = '\u{E001}';

/// Fenced code block: `{code}` followed immediately by a newline.
static CODE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\{code\}\n(.*?)\{/code\}").unwrap());

/// Inline code span. Only applied after all fenced blocks are gone, so any
/// remaining `{code}` pair is a genuine single-construct span.
static INLINE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\{code\}(.*?)\{/code\}").unwrap());

/// Quote opening tag followed by a newline.
static QUOTE_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\{quote\}\n").unwrap());

/// Quote closing tag.
static QUOTE_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\{/quote\}").unwrap());

static CODE_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x{E000}CODE_BLOCK_(\d+)\x{E001}").unwrap());

static INLINE_CODE_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x{E000}INLINE_CODE_BLOCK_(\d+)\x{E001}").unwrap());

static QUOTE_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x{E000}QUOTE_BLOCK_(\d+)\x{E001}").unwrap());

/// Side table of extracted regions, one insertion-ordered list per kind.
///
/// Created fresh per conversion and discarded when it returns; indices are
/// insertion positions and are never reused. Code entries hold raw captured
/// text; quote entries hold already-rendered Markdown (quote interiors get
/// their table/line conversion at extraction time).
pub(crate) struct ProtectedBlocks {
    code: Vec<String>,
    inline_code: Vec<String>,
    quotes: Vec<String>,
}

impl ProtectedBlocks {
    /// Extract all protected regions from `text`, replacing each with a marker.
    ///
    /// Extraction order matters: fenced code first (the opener requires an
    /// immediate newline), then inline code (whatever `{code}` pairs remain),
    /// then quotes. Quote markup inside a code block is therefore never
    /// mistaken for a real quote.
    pub(crate) fn extract(text: &str) -> (String, Self) {
        let mut blocks = Self {
            code: Vec::new(),
            inline_code: Vec::new(),
            quotes: Vec::new(),
        };
        let extracted = extract_with(&CODE_BLOCK_RE, text, "CODE_BLOCK", &mut blocks.code);
        let extracted = extract_with(
            &INLINE_CODE_RE,
            &extracted,
            "INLINE_CODE_BLOCK",
            &mut blocks.inline_code,
        );
        let extracted = extract_quotes(&extracted, &mut blocks.quotes);
        (extracted, blocks)
    }

    /// Replace every marker with its final rendered form.
    ///
    /// Fenced code becomes a backtick fence with a newline on each side and
    /// blank lines trimmed from the captured content; inline code becomes a
    /// trimmed backtick span; quotes are inserted as stored. A marker whose
    /// index is out of range resolves to empty content.
    pub(crate) fn restore(&self, text: &str) -> String {
        // Quotes expand first: their stored bodies may carry code markers and
        // the markers of quotes nested inside them, and those only enter the
        // text once the enclosing body is inserted. Substitution repeats
        // until no quote marker remains; each inserted body only references
        // lower indices, which bounds the pass count.
        let mut restored = text.to_owned();
        for _ in 0..=self.quotes.len() {
            if !QUOTE_MARKER_RE.is_match(&restored) {
                break;
            }
            restored = QUOTE_MARKER_RE
                .replace_all(&restored, |caps: &Captures| {
                    lookup(&self.quotes, &caps[1]).to_owned()
                })
                .into_owned();
        }
        let restored = CODE_MARKER_RE.replace_all(&restored, |caps: &Captures| {
            let body = lookup(&self.code, &caps[1]).trim_matches('\n');
            format!("\n```\n{body}\n```\n")
        });
        INLINE_CODE_MARKER_RE
            .replace_all(&restored, |caps: &Captures| {
                format!("`{}`", lookup(&self.inline_code, &caps[1]).trim())
            })
            .into_owned()
    }
}

/// Build the marker token for one extracted region.
fn marker(kind: &str, index: usize) -> String {
    format!("{MARKER_OPEN}{kind}_{index}{MARKER_CLOSE}")
}

/// Look up an extracted region by the decimal index captured from a marker.
fn lookup<'a>(table: &'a [String], index: &str) -> &'a str {
    index
        .parse::<usize>()
        .ok()
        .and_then(|i| table.get(i))
        .map_or("", String::as_str)
}

/// Replace every match of `re` with a marker, recording the capture in `table`.
fn extract_with(re: &Regex, text: &str, kind: &str, table: &mut Vec<String>) -> String {
    re.replace_all(text, |caps: &Captures| {
        table.push(caps[1].to_owned());
        marker(kind, table.len() - 1)
    })
    .into_owned()
}

/// Extract quote blocks, innermost first.
///
/// Each iteration pairs the first `{/quote}` with the last `{quote}\n` before
/// it, which is by construction an innermost pair. The loop consumes one
/// closing tag per extraction and skips past closing tags with no opener, so
/// it terminates on any input; unmatched tags stay as literal text.
fn extract_quotes(text: &str, quotes: &mut Vec<String>) -> String {
    let mut text = text.to_owned();
    let mut search_from = 0;
    while let Some(close) = QUOTE_CLOSE_RE.find_at(&text, search_from) {
        let Some(open) = QUOTE_OPEN_RE.find_iter(&text[..close.start()]).last() else {
            // Orphan closing tag: leave it and look for the next one.
            search_from = close.end();
            continue;
        };
        let inner = text[open.end()..close.start()].to_owned();
        quotes.push(quote_markdown(&convert_block(&inner)));
        let token = marker("QUOTE_BLOCK", quotes.len() - 1);
        text.replace_range(open.start()..close.end(), &token);
    }
    text
}

/// Prefix every line of a converted quote body with `> `.
///
/// Lines are trimmed before prefixing; blank lines get a bare `>` so the
/// quote stays contiguous in Markdown.
fn quote_markdown(body: &str) -> String {
    body.trim_end()
        .split('\n')
        .map(|line| {
            let line = line.trim();
            if line.is_empty() {
                ">".to_owned()
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

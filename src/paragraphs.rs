//! Plain text to HTML paragraphs.
//!
//! A paragraph ends at:
//!   • a newline followed by three or more whitespace characters (indented line),
//!   • two or more newlines with only whitespace between them,
//!   • a newline whose next non-whitespace character is a double quote,
//!   • a newline after a double quote (with only whitespace between).
//!
//! Inside a paragraph every whitespace run collapses to one space.

use crate::escape::{replace_reserved_characters, replace_reserved_in_html};
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RE: hardcoded regex is valid"));

const TAB_WIDTH: &str = "    ";

#[inline]
fn is_double_quote(c: char) -> bool {
    matches!(c, '"' | 'ʺ' | '“' | '”' | '＂')
}

/// End of the whitespace run starting at byte `i`.
fn whitespace_end(s: &str, i: usize) -> usize {
    s[i..]
        .char_indices()
        .find(|&(_, c)| !c.is_whitespace())
        .map_or(s.len(), |(off, _)| i + off)
}

/// Try each boundary rule at byte `i`, in priority order.
///
/// Rules only fire on a newline or right after a double quote; anywhere else
/// this returns before looking at the whitespace run, which keeps the scan
/// linear.
fn boundary_at(s: &str, i: usize) -> Option<usize> {
    let at_newline = s[i..].starts_with('\n');
    let after_quote = s[..i].chars().next_back().is_some_and(is_double_quote);
    if !at_newline && !after_quote {
        return None;
    }
    let ws_end = whitespace_end(s, i);

    if at_newline {
        let run = &s[i + 1..ws_end];
        // indented continuation
        if run.chars().nth(2).is_some() {
            return Some(ws_end);
        }
        // blank line(s)
        if run.contains('\n') {
            return Some(ws_end);
        }
        // next line opens with a quote
        if s[ws_end..].chars().next().is_some_and(is_double_quote) {
            return Some(ws_end);
        }
    }

    // line closed by a quote: consume up to the last newline of the run
    if after_quote {
        if let Some(nl) = s[i..ws_end].rfind('\n') {
            return Some(i + nl + 1);
        }
    }
    None
}

/// Byte ranges of every paragraph boundary, leftmost first, non-overlapping.
fn paragraph_boundaries(s: &str) -> Vec<Range<usize>> {
    let mut found = Vec::new();
    let mut i = 0usize;
    while i < s.len() {
        if let Some(end) = boundary_at(s, i) {
            found.push(i..end);
            i = end;
            continue;
        }
        i += s[i..].chars().next().map_or(1, char::len_utf8);
    }
    found
}

fn clean_paragraph(paragraph: &str) -> String {
    WHITESPACE_RE.replace_all(paragraph, " ").trim().to_string()
}

/// Split freeform text into `<p>` elements.
///
/// With `contains_html` the paragraph text is escaped tag-aware, so inline
/// markup in the source survives; otherwise every reserved character is
/// escaped. An empty input gives a single `<p></p>`.
pub fn text_to_paragraphs(text: &str, contains_html: bool) -> String {
    let normalized = text.replace('\r', "").replace('\t', TAB_WIDTH);

    let mut out = String::with_capacity(normalized.len() + 16);
    let mut start = 0usize;
    let mut push = |raw: &str| {
        let paragraph = clean_paragraph(raw);
        let escaped = if contains_html {
            replace_reserved_in_html(&paragraph, false)
        } else {
            replace_reserved_characters(&paragraph, false)
        };
        out.push_str("<p>");
        out.push_str(&escaped);
        out.push_str("</p>");
    };
    for boundary in paragraph_boundaries(&normalized) {
        push(&normalized[start..boundary.start]);
        start = boundary.end;
    }
    push(&normalized[start..]);
    out
}

/// Wrap converted text in a minimal HTML document.
pub fn text_to_html_document(text: &str, contains_html: bool) -> String {
    format!(
        "<!DOCTYPE html><html><body>{}</body></html>",
        text_to_paragraphs(text, contains_html)
    )
}

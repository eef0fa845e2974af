//! Pretty-printing of HTML: one tag (or one paragraph) per line, indented by
//! nesting depth.

use crate::tags::PARAGRAPH_ELEMENT;
use regex::Regex;
use std::sync::LazyLock;

/// Indent used when the caller has no preference.
pub const DEFAULT_INDENT: &str = "    ";

static BETWEEN_TAGS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">\s*<").expect("BETWEEN_TAGS_RE: hardcoded regex is valid"));

static UNSPLIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("{PARAGRAPH_ELEMENT}|<[^>]*>"))
        .expect("UNSPLIT_RE: hardcoded regex is valid")
});

static CLOSING_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:<\s*/[^>]+|<[^>]+/\s*)>$").expect("CLOSING_LINE_RE: hardcoded regex is valid")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct LineKind {
    opens: bool,
    closes: bool,
}

fn classify(line: &str) -> LineKind {
    LineKind {
        opens: line.starts_with('<') && !line.starts_with("</"),
        closes: CLOSING_LINE_RE.is_match(line),
    }
}

/// Put every tag on its own line and indent it by depth.
///
/// A `<p>` element stays on one line with its inline markup. Closing lines
/// dedent before they are written, opening lines indent what follows, and a
/// line that both opens and closes leaves the depth as it was. Unmatched
/// closing tags are tolerated; depth below zero renders as no indent.
pub fn make_human_readable(html: &str, indent: &str) -> String {
    let flat = html.replace('\n', "");
    let split = BETWEEN_TAGS_RE.replace_all(&flat, ">\n<");
    let split = UNSPLIT_RE.replace_all(&split, |caps: &regex::Captures| caps[0].replace('\n', ""));

    let mut out = String::with_capacity(split.len() * 2);
    let mut depth: isize = 0;
    for line in split.split('\n') {
        let kind = classify(line);
        if kind.closes && !kind.opens {
            depth -= 1;
            if depth < 0 {
                log::trace!("unmatched closing line {line:?}");
            }
        }
        out.push_str(&indent.repeat(depth.max(0) as usize));
        out.push_str(line);
        out.push('\n');
        if kind.opens && !kind.closes {
            depth += 1;
        }
    }
    out.trim().to_string()
}

//! Typographic ("smart") quotes for paragraph content.
//!
//! Straight quotes become `&ldquo;`/`&rdquo;` and `&lsquo;`/`&rsquo;`,
//! alternating left and right in document order. Apostrophes are told apart
//! from single quotes with a few English heuristics and always become
//! `&rsquo;`. An unpaired quote flips the alternation for the rest of the
//! paragraph.

use crate::entity::replace_entities_where;
use crate::escape::escape_text;
use crate::substitute::regex_replace;
use crate::tags::{map_segments, segments, Segment, PARAGRAPH_ELEMENT};
use regex::Regex;
use std::sync::LazyLock;

static PARAGRAPH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(PARAGRAPH_ELEMENT).expect("PARAGRAPH_RE: hardcoded regex is valid")
});

/// Words written with a leading apostrophe in place of dropped letters.
const ELIDED_STARTS: &[&str] = &[
    "bout", "cause", "cept", "em", "gainst", "n", "neath", "round", "til", "tis", "twas", "tween",
    "twere",
];

/// Words written with a trailing apostrophe.
const ELIDED_ENDS: &[&str] = &["ol", "n"];

fn straighten(c: char) -> char {
    match c {
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' | '\u{02BA}'
        | '\u{FF02}' => '"',
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' | '\u{02B9}'
        | '\u{02BC}' | '\u{FF07}' => '\'',
        c => c,
    }
}

fn is_quote_text(s: &str) -> bool {
    let mut chars = s.chars();
    matches!((chars.next().map(straighten), chars.next()), (Some('"' | '\''), None))
}

#[inline]
fn is_boundary(c: Option<&char>) -> bool {
    c.map_or(true, |c| !c.is_alphanumeric())
}

fn has_word_at(chars: &[char], at: usize, word: &str) -> bool {
    let len = word.len();
    at + len <= chars.len()
        && chars[at..at + len]
            .iter()
            .zip(word.chars())
            .all(|(a, b)| a.eq_ignore_ascii_case(&b))
}

fn is_apostrophe(chars: &[char], i: usize) -> bool {
    let prev = i.checked_sub(1).and_then(|p| chars.get(p));
    let next = chars.get(i + 1);

    // don't, it's
    if prev.is_some_and(char::is_ascii_lowercase) && next.is_some_and(char::is_ascii_lowercase) {
        return true;
    }
    // nothin', somethin'
    if i >= 3 && has_word_at(chars, i - 2, "in") && chars[i - 3].is_ascii_lowercase() {
        return true;
    }
    // 'bout, 'em, 'twas
    if is_boundary(prev)
        && ELIDED_STARTS
            .iter()
            .any(|w| has_word_at(chars, i + 1, w) && is_boundary(chars.get(i + 1 + w.len())))
    {
        return true;
    }
    // ol', n'
    is_boundary(next)
        && ELIDED_ENDS.iter().any(|w| {
            i >= w.len()
                && has_word_at(chars, i - w.len(), w)
                && is_boundary((i - w.len()).checked_sub(1).and_then(|p| chars.get(p)))
        })
}

/// Replace the quotes of one element (usually a whole `<p>...</p>`) with
/// directional entities, then escape the remaining text.
pub fn add_smart_quotes_to_element(element: &str) -> String {
    // quote entities and typographic quotes all become straight quotes first
    let straight = map_segments(
        element,
        |text| {
            replace_entities_where(text, is_quote_text)
                .chars()
                .map(straighten)
                .collect()
        },
        |tag| tag.chars().map(straighten).collect(),
    );

    let chars: Vec<char> = straight.chars().collect();
    let mut open_double = true;
    let mut open_single = true;
    let mut at = 0usize;
    let mut out = String::with_capacity(straight.len() + 32);
    for segment in segments(&straight) {
        let text = match segment {
            Segment::Tag(tag) => {
                out.push_str(tag);
                at += tag.chars().count();
                continue;
            }
            Segment::Text(text) => text,
        };
        let mut run = String::new();
        for c in text.chars() {
            let entity = match c {
                '"' => {
                    open_double = !open_double;
                    Some(if open_double { "&rdquo;" } else { "&ldquo;" })
                }
                '\'' if is_apostrophe(&chars, at) => Some("&rsquo;"),
                '\'' => {
                    open_single = !open_single;
                    Some(if open_single { "&rsquo;" } else { "&lsquo;" })
                }
                _ => None,
            };
            match entity {
                Some(entity) => {
                    out.push_str(&escape_text(&run, false));
                    out.push_str(entity);
                    run.clear();
                }
                None => run.push(c),
            }
            at += 1;
        }
        out.push_str(&escape_text(&run, false));
    }
    out
}

/// Apply [`add_smart_quotes_to_element`] to every `<p>` element in `html`.
/// Content outside paragraphs is left alone.
pub fn add_smart_quotes_to_paragraphs(html: &str) -> String {
    regex_replace(&PARAGRAPH_RE, html, add_smart_quotes_to_element)
}

//! Tag token scanning.
//!
//! A tag token is a `<`, at least one byte that is neither `<` nor `>`, and the
//! first following `>` (the grammar `<[^<>]+>`). Quotes carry no meaning here:
//! a `>` inside an attribute value ends the token.

use memchr::{memchr, memchr2};
use std::ops::Range;

/// A whole `<p>` element: the opening tag, any run of text and tags that are
/// not `</p...`, then `</p>`. Also matches `<pre>`, as any `<p`-prefixed tag
/// opens it.
pub(crate) const PARAGRAPH_ELEMENT: &str =
    r"<p[^>]*>(?:[^<]*<(?:[^/>][^>]*|/(?:[^p>][^>]*)?)?>)*[^<]*</p>";

/// Byte range of the first tag token starting at or after `from`.
pub fn find_tag(s: &str, from: usize) -> Option<Range<usize>> {
    let bytes = s.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        let lt = i + memchr(b'<', &bytes[i..])?;
        let off = memchr2(b'<', b'>', &bytes[lt + 1..])?;
        let j = lt + 1 + off;
        if bytes[j] == b'>' {
            if off > 0 {
                return Some(lt..j + 1);
            }
            // "<>" is not a tag; resume after it
            i = j + 1;
        } else {
            // a second '<' before any '>' restarts the token there
            i = j;
        }
    }
    None
}

/// A piece of a string split at tag boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Tag(&'a str),
}

/// Iterator over alternating text runs and tag tokens. Empty text runs are
/// skipped, so two adjacent tags yield two `Tag`s in a row.
pub struct Segments<'a> {
    src: &'a str,
    pos: usize,
    pending: Option<Range<usize>>,
}

pub fn segments(src: &str) -> Segments<'_> {
    Segments {
        src,
        pos: 0,
        pending: None,
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        if let Some(tag) = self.pending.take() {
            self.pos = tag.end;
            return Some(Segment::Tag(&self.src[tag]));
        }
        if self.pos >= self.src.len() {
            return None;
        }
        match find_tag(self.src, self.pos) {
            Some(tag) if tag.start == self.pos => {
                self.pos = tag.end;
                Some(Segment::Tag(&self.src[tag]))
            }
            Some(tag) => {
                let text = &self.src[self.pos..tag.start];
                self.pending = Some(tag);
                Some(Segment::Text(text))
            }
            None => {
                let text = &self.src[self.pos..];
                self.pos = self.src.len();
                Some(Segment::Text(text))
            }
        }
    }
}

/// Rebuild `src`, passing every text run through `text` and every tag token
/// through `tag`.
pub fn map_segments<T, G>(src: &str, mut text: T, mut tag: G) -> String
where
    T: FnMut(&str) -> String,
    G: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(src.len() + src.len() / 8);
    for seg in segments(src) {
        match seg {
            Segment::Text(t) => out.push_str(&text(t)),
            Segment::Tag(t) => out.push_str(&tag(t)),
        }
    }
    out
}

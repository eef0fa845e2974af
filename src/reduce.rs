//! HTML to plain text (or to a small subset of HTML).
//!
//! A fixed sequence of substitution passes; each pass sees the output of the
//! one before it, so the order below is load-bearing.

use crate::entity::replace_entities;
use crate::escape::replace_reserved_in_html;
use regex::{Captures, Regex};
use std::sync::LazyLock;

macro_rules! pass {
    ($name:ident, $re:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new($re).expect(concat!(stringify!($name), ": hardcoded regex is valid"))
        });
    };
}

pass!(SPACED_OPEN_RE, r"<\s+([^<>]*>)");
pass!(SPACED_CLOSE_RE, r"</\s+([A-Za-z][^<>]*>)");
pass!(BREAK_RE, r"<br\s*/?>");
pass!(COMMENT_RE, r"<!-- .* -->");
pass!(SCRIPT_RE, r"<script>[^<>]*</script>|<script\s[^<>]*>[^<>]*</script>");
pass!(BOLD_OPEN_RE, r"<strong>|<strong\s+[^<>]*>|<b\s+[^<>]*>");
pass!(ITALIC_OPEN_RE, r"<em>|<em\s+[^<>]*>|<i\s+[^<>]*>");
pass!(PARAGRAPH_RE, r"\s*<p>\s*|\s*<p\s+[^<>]*>\s*|\s*</p>\s*");
pass!(DIV_RE, r"\s*<div>\s*|\s*<div\s+[^<>]*>\s*|\s*</div>\s*");
pass!(OPEN_TAG_RE, r"<([^<>]*)>");
pass!(CLOSE_TAG_RE, r"</([^<>]*)>");
pass!(ANY_TAG_RE, r"<[^<>]*>");
pass!(BLANK_LINES_RE, r"\s*\n\s*\n\s*");

/// Tags that survive when markup is kept.
const KEPT_TAGS: &[&str] = &["img", "a", "i", "b", "hr"];

/// `inner` is the text between `<` and `>` of an opening tag. Kept when it is
/// a closing tag (handled separately) or names an allow-listed element
/// followed by `/`, whitespace or the end of the tag.
fn keeps_opening(inner: &str) -> bool {
    if inner.starts_with('/') {
        return true;
    }
    KEPT_TAGS.iter().any(|name| {
        inner.strip_prefix(*name).is_some_and(|rest| {
            rest.is_empty() || rest.starts_with('/') || rest.starts_with(char::is_whitespace)
        })
    })
}

/// `inner` is the text between `</` and `>`.
fn keeps_closing(inner: &str) -> bool {
    KEPT_TAGS.contains(&inner)
}

fn strip_unkept_tags(text: &str) -> String {
    let text = OPEN_TAG_RE.replace_all(text, |caps: &Captures| {
        if keeps_opening(&caps[1]) {
            caps[0].to_string()
        } else {
            String::new()
        }
    });
    CLOSE_TAG_RE
        .replace_all(&text, |caps: &Captures| {
            if keeps_closing(&caps[1]) {
                caps[0].to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}

/// Reduce HTML to plain text.
///
/// `<br>` becomes a newline, `<p>` and `<div>` become blank lines, comments and
/// `<script>` blocks are dropped. Without `keep_tags` every tag is removed and
/// entities are decoded for reading. With `keep_tags` the `<a>`, `<b>`, `<i>`,
/// `<hr>` and `<img>` tags stay (`<strong>`/`<em>` are folded into `<b>`/`<i>`)
/// and the text is escaped so it can be embedded in HTML again.
pub fn html_to_text(html: &str, keep_tags: bool) -> String {
    let text = html.replace('\r', "");
    let text = SPACED_OPEN_RE.replace_all(&text, "<$1");
    let text = SPACED_CLOSE_RE.replace_all(&text, "</$1");

    let text = BREAK_RE.replace_all(&text, "\n");

    let text = COMMENT_RE.replace_all(&text, "\n\n");
    let text = SCRIPT_RE.replace_all(&text, "\n\n");

    let text = BOLD_OPEN_RE.replace_all(&text, "<b>");
    let text = text.replace("</strong>", "</b>");
    let text = ITALIC_OPEN_RE.replace_all(&text, "<i>");
    let text = text.replace("</em>", "</i>");

    let text = PARAGRAPH_RE.replace_all(&text, "\n\n");
    let text = DIV_RE.replace_all(&text, "\n\n");

    let text = if keep_tags {
        strip_unkept_tags(&text)
    } else {
        ANY_TAG_RE.replace_all(&text, "").into_owned()
    };

    let text = BLANK_LINES_RE.replace_all(&text, "\n\n");
    let text = text.trim();

    if keep_tags {
        replace_reserved_in_html(text, false)
    } else {
        replace_entities(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::breaks("These are<br><br />some<br/>words!", "These are\n\nsome\nwords!")]
    #[case::preformatted(
        "<pre>\nThis should remain\n\tindented.</pre>",
        "This should remain\n\tindented."
    )]
    #[case::paragraphs_and_divs(
        "<p>Paragraph 1</p>Outside<div>Paragraph 2</div>",
        "Paragraph 1\n\nOutside\n\nParagraph 2"
    )]
    #[case::attributed_blocks(
        "First<div class='a'>Second</div>Third<p id='b'>Fourth</p>Fifth",
        "First\n\nSecond\n\nThird\n\nFourth\n\nFifth"
    )]
    #[case::strong_em("<strong>AAA</strong> <em>BBB</em>", "<b>AAA</b> <i>BBB</i>")]
    #[case::attributed_emphasis(
        "Thing <em id='a'>slanted</em> other <strong class='b'> Bold </strong>! ",
        "Thing <i>slanted</i> other <b> Bold </b>!"
    )]
    #[case::bare_emphasis(
        "<i id='thing'>Oblique</i> Nothing <b class='aa'>Other</b>",
        "<i>Oblique</i> Nothing <b>Other</b>"
    )]
    #[case::comment_and_script(
        "Two\n\n<!-- Comment --> Lines <script>this;is;ignored</script> Final",
        "Two\n\nLines\n\nFinal"
    )]
    #[case::attributed_script("<!-- Inside -->AAA<script id='a'> Inside </script>", "AAA")]
    #[case::allow_list(
        "<span id='aaa'>Word.</span> <a href='thing'><i>Link</i></a><svg thing='aaa'/>",
        "Word. <a href='thing'><i>Link</i></a>"
    )]
    #[case::image_kept(
        "<img src='link' /><b>Bold</b> Thing <span>Other.</span>",
        "<img src='link' /><b>Bold</b> Thing Other."
    )]
    #[case::escaped("<span>This &amp; That!</span>", "This &#38; That!")]
    #[case::spaced_tags("< b>Bold</ b> <abbr>x</abbr>", "<b>Bold</b> x")]
    fn keeps_basic_tags(#[case] html: &str, #[case] expected: &str) {
        assert_eq!(html_to_text(html, true), expected);
    }

    #[rstest]
    #[case::word("<span id='a'>Word.</span>", "Word.")]
    #[case::allow_list_removed(
        "<span id='aaa'>Word.</span> <a href='thing'><i>Link</i></a><svg thing='aaa'/>",
        "Word. Link"
    )]
    #[case::image_removed("<img src='link' /><b>Bold</b> Thing <span>Other.</span>", "Bold Thing Other.")]
    #[case::decoded("<span>&lt;3 &amp; Thing.</span>", "<3 & Thing.")]
    #[case::empty("", "")]
    fn strips_all_tags(#[case] html: &str, #[case] expected: &str) {
        assert_eq!(html_to_text(html, false), expected);
    }

    #[test]
    fn self_closing_allow_listed_image() {
        assert_eq!(
            html_to_text("<img src='x'/><b>Bold</b><span>Other.</span>", true),
            "<img src='x'/><b>Bold</b>Other."
        );
    }

    #[test]
    fn collapses_runs_of_blank_lines() {
        assert_eq!(
            html_to_text("<div>a</div>\n\n\n<div>\n \nb</div>", false),
            "a\n\nb"
        );
    }

    #[test]
    fn absent_html_propagates() {
        let html: Option<&str> = None;
        assert_eq!(html.map(|h| html_to_text(h, true)), None);
        assert_eq!(html.map(|h| html_to_text(h, false)), None);
    }
}

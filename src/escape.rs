//! Escaping of reserved HTML characters.
//!
//! Reserved characters are `< > / = ' " & ;`. Each one is written as a decimal
//! entity; with `escape_non_ascii` every character outside printable ASCII
//! (`0x20..=0x7E`) is escaped as well.

use crate::entity::{char_entity, replace_entities};
use crate::substitute::regex_replace;
use crate::tags::map_segments;
use regex::Regex;
use std::sync::LazyLock;

static RESERVED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>/='"&;]"#).expect("RESERVED_RE: hardcoded regex is valid"));

static RESERVED_OR_NON_ASCII_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[<>/='"&;]|[^ -~]"#).expect("RESERVED_OR_NON_ASCII_RE: hardcoded regex is valid")
});

fn encode_match(m: &str) -> String {
    m.chars().map(char_entity).collect()
}

/// Escape reserved characters (and optionally non-ASCII) in plain text.
pub fn replace_reserved_characters(string: &str, escape_non_ascii: bool) -> String {
    let re = if escape_non_ascii {
        &*RESERVED_OR_NON_ASCII_RE
    } else {
        &*RESERVED_RE
    };
    regex_replace(re, string, encode_match)
}

/// Escape text that already contains markup.
///
/// Tag tokens are copied untouched. Text between them has its existing
/// entities decoded first and is then escaped, so running this twice gives the
/// same result as running it once.
pub fn replace_reserved_in_html(html: &str, escape_non_ascii: bool) -> String {
    map_segments(html, |text| escape_text(text, escape_non_ascii), str::to_string)
}

/// Treatment of one text run between tags: decode, then escape.
pub(crate) fn escape_text(text: &str, escape_non_ascii: bool) -> String {
    replace_reserved_characters(&replace_entities(text), escape_non_ascii)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("<bláh~!>", false, "&#60;bláh~!&#62;")]
    #[case("<a href=\"thíng...\">", false, "&#60;a href&#61;&#34;thíng...&#34;&#62;")]
    #[case("<ímg src='Heh?'>", false, "&#60;ímg src&#61;&#39;Heh?&#39;&#62;")]
    #[case("&Éh;", false, "&#38;Éh&#59;")]
    #[case("<bláh~!>", true, "&#60;bl&#225;h~!&#62;")]
    #[case("<a href=\"thíng...\">", true, "&#60;a href&#61;&#34;th&#237;ng...&#34;&#62;")]
    #[case("<ímg src='Heh?'>", true, "&#60;&#237;mg src&#61;&#39;Heh?&#39;&#62;")]
    #[case("&Éh;", true, "&#38;&#201;h&#59;")]
    #[case("line\nbreak", true, "line&#10;break")]
    #[case("", false, "")]
    fn escapes_plain_text(#[case] input: &str, #[case] non_ascii: bool, #[case] expected: &str) {
        assert_eq!(replace_reserved_characters(input, non_ascii), expected);
    }

    #[rstest]
    #[case("<ímg>Bláh!</ímg>", true, "<ímg>Bl&#225;h!</ímg>")]
    #[case("<a href=\"bleh\">&thing;<b>", false, "<a href=\"bleh\">&#38;thing&#59;<b>")]
    #[case(">It's a thing!!<", false, "&#62;It&#39;s a thing!!&#60;")]
    #[case(";; <&thing!> &!", false, "&#59;&#59; <&thing!> &#38;!")]
    #[case("<a>Th&#237;ng!!</a>", true, "<a>Th&#237;ng!!</a>")]
    #[case("<a>Th&#237;ng!!</a>", false, "<a>Thíng!!</a>")]
    #[case("&#59; <&!> &#59;", false, "&#59; <&!> &#59;")]
    #[case("", false, "")]
    fn escapes_only_outside_tags(
        #[case] input: &str,
        #[case] non_ascii: bool,
        #[case] expected: &str,
    ) {
        assert_eq!(replace_reserved_in_html(input, non_ascii), expected);
    }

    #[rstest]
    #[case("<a>Th&#237;ng!!</a>", true)]
    #[case("Fish &amp; chips <i title=\"x\">'n'</i> &lt;3", false)]
    #[case("naïve → café", true)]
    fn html_escaping_is_idempotent(#[case] input: &str, #[case] non_ascii: bool) {
        let once = replace_reserved_in_html(input, non_ascii);
        assert_eq!(replace_reserved_in_html(&once, non_ascii), once);
    }

    #[test]
    fn absent_input_propagates() {
        let input: Option<&str> = None;
        assert_eq!(input.map(|s| replace_reserved_characters(s, true)), None);
        assert_eq!(input.map(|s| replace_reserved_in_html(s, false)), None);
    }
}

//! Pattern substitution: find every match of a pattern, run it through a
//! callback and splice the result back into the subject.

use regex::Regex;

/// Replace every non-overlapping match of `pattern` in `subject` with
/// `transform(match)`. Text between matches is copied verbatim.
///
/// Matches are visited left to right with their positions, so a match whose
/// text also appears earlier in the subject is never spliced at the wrong
/// offset.
pub fn regex_replace<F>(pattern: &Regex, subject: &str, mut transform: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(subject.len());
    let mut last = 0usize;
    for m in pattern.find_iter(subject) {
        out.push_str(&subject[last..m.start()]);
        out.push_str(&transform(m.as_str()));
        last = m.end();
    }
    out.push_str(&subject[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::get_extension;
    use pretty_assertions::assert_eq;

    #[test]
    fn replaces_each_match_through_callback() {
        let re = Regex::new(r"[a-z]+\.[a-z]+").unwrap();
        assert_eq!(
            regex_replace(&re, "eh, bl.ah th.ing not", get_extension),
            "eh, .ah .ing not"
        );
    }

    #[test]
    fn trims_whitespace_around_digits() {
        let re = Regex::new(r"\s*[0-9]+\s*").unwrap();
        let replaced = regex_replace(&re, "   Some random  2   text!  1234!  and rest ", |m| {
            m.trim().to_string()
        });
        assert_eq!(replaced, "   Some random2text!1234!  and rest ");
    }

    #[test]
    fn repeated_match_text_is_spliced_in_place() {
        let re = Regex::new(r"b").unwrap();
        let mut seen = 0;
        let replaced = regex_replace(&re, "abcabc", |_| {
            seen += 1;
            seen.to_string()
        });
        assert_eq!(replaced, "a1ca2c");
    }

    #[test]
    fn no_match_returns_subject() {
        let re = Regex::new("nope").unwrap();
        assert_eq!(regex_replace(&re, "got nothing", get_extension), "got nothing");
        assert_eq!(regex_replace(&re, "", get_extension), "");
    }

    #[test]
    fn absent_subject_propagates() {
        let re = Regex::new("pattern").unwrap();
        let subject: Option<&str> = None;
        assert_eq!(subject.map(|s| regex_replace(&re, s, get_extension)), None);
    }
}

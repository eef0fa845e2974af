//! File extension lookup for paths and direct file URLs.

use regex::Regex;
use std::sync::LazyLock;

// A dotted suffix of 1-5 alphanumerics, either before a query '?' or at the
// end. The end may be followed by one trailing newline.
static EXTENSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\.[a-zA-Z0-9]{1,5})(?:(\?)|\n?\z)")
        .expect("EXTENSION_RE: hardcoded regex is valid")
});

/// Extension of `path` including the dot (`"test.png"` gives `".png"`), or an
/// empty string when there is none.
///
/// For URLs carrying a query string the suffix right before a `?` is used;
/// when several qualify, the last one wins.
pub fn get_extension(path: &str) -> String {
    let mut first = None;
    let mut queried = None;
    for caps in EXTENSION_RE.captures_iter(path) {
        let extension = caps.get(1).map_or("", |m| m.as_str());
        first.get_or_insert(extension);
        if caps.get(2).is_some() {
            queried = Some(extension);
        }
    }
    queried.or(first).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("test.png", ".png")]
    #[case(".long", ".long")]
    #[case("test2.thing", ".thing")]
    #[case("blah.test.png", ".png")]
    #[case("test.mp4?extra_.thing", ".mp4")]
    #[case("thing.test.thing?", ".thing")]
    #[case("another.txt? test.png?extra.thing", ".png")]
    #[case("test.png\n", ".png")]
    fn finds_extensions(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(get_extension(path), expected);
    }

    #[rstest]
    #[case("test.tolong")]
    #[case("test.notextension")]
    #[case("asdfasdfasdfasdf")]
    #[case("test.tolong?extra")]
    #[case("none?")]
    #[case("test.png\n\n")]
    #[case("")]
    fn rejects_missing_or_long_extensions(#[case] path: &str) {
        assert_eq!(get_extension(path), "");
    }

    #[test]
    fn absent_path_has_no_extension() {
        let path: Option<&str> = None;
        assert_eq!(path.map(get_extension).unwrap_or_default(), "");
    }
}

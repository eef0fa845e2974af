//! Character entity codec.

use crate::substitute::regex_replace;
use encoding_rs::WINDOWS_1252;
use htmlentity::entity::{decode, ICodedDataTrait};
use regex::Regex;
use std::sync::LazyLock;

static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&[^&;]+;").expect("ENTITY_RE: hardcoded regex is valid"));

/// Encode a single character as a decimal entity (`<` becomes `&#60;`).
///
/// Anything other than exactly one character yields an empty string.
pub fn character_to_entity(character: &str) -> String {
    let mut chars = character.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => char_entity(c),
        _ => String::new(),
    }
}

pub(crate) fn char_entity(c: char) -> String {
    format!("&#{};", u32::from(c))
}

/// Decode one entity reference (`&amp;`, `&#60;`, `&#x3C;`) into its text.
///
/// The whole input must be a single `&...;` reference. Anything else, and any
/// reference the HTML5 table does not know, is returned unchanged.
pub fn entity_to_character(entity: &str) -> String {
    let Some(body) = entity_body(entity) else {
        return entity.to_string();
    };
    if body.starts_with('#') {
        return decode_numeric(body).unwrap_or_else(|| entity.to_string());
    }
    match decode(entity.as_bytes()).to_string() {
        Ok(decoded) if !decoded.is_empty() => decoded,
        _ => entity.to_string(),
    }
}

// ^&([^&;]+);$
fn entity_body(s: &str) -> Option<&str> {
    let body = s.strip_prefix('&')?.strip_suffix(';')?;
    (!body.is_empty() && !body.contains(['&', ';'])).then_some(body)
}

/// `#60` / `#x3C` to text, with the HTML5 character reference fixups: NUL,
/// surrogates and anything past U+10FFFF become U+FFFD, and 0x80..=0x9F are
/// read as Windows-1252 bytes.
fn decode_numeric(body: &str) -> Option<String> {
    let number = body.strip_prefix('#')?;
    let (digits, radix) = match number.strip_prefix(['x', 'X']) {
        Some(hex) => (hex, 16),
        None => (number, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    // only overflow can fail here, and that is out of range anyway
    let code = u32::from_str_radix(digits, radix).unwrap_or(u32::MAX);
    let decoded = match code {
        0x80..=0x9F => WINDOWS_1252
            .decode_without_bom_handling(&[code as u8])
            .0
            .into_owned(),
        _ => char::from_u32(code)
            .filter(|&c| c != '\0')
            .unwrap_or(char::REPLACEMENT_CHARACTER)
            .to_string(),
    };
    Some(decoded)
}

/// Decode every entity reference found anywhere in `string`.
pub fn replace_entities(string: &str) -> String {
    if !string.contains('&') {
        return string.to_string();
    }
    regex_replace(&ENTITY_RE, string, entity_to_character)
}

/// Decode only the entity references whose decoded text satisfies `keep`.
pub(crate) fn replace_entities_where<P>(string: &str, keep: P) -> String
where
    P: Fn(&str) -> bool,
{
    regex_replace(&ENTITY_RE, string, |entity| {
        let decoded = entity_to_character(entity);
        if keep(&decoded) {
            decoded
        } else {
            entity.to_string()
        }
    })
}

//! html-string-tools — tag-aware string transforms for HTML content.
//!
//! - Entity codec: single characters to/from `&#NNN;` and named entities.
//! - Reserved-character escaping, plain or only outside tag syntax.
//! - Plain text to `<p>` paragraphs, and HTML back to plain text.
//! - Smart quotes inside paragraphs.
//! - Pretty-printing with one tag per line.
//!
//! Every transform is a pure `&str -> String` function. Markup is never parsed
//! into a tree; tags are recognized as `<[^<>]+>` tokens and everything else is
//! text.

mod error;
mod files;
mod paragraphs;
mod readable;
mod reduce;
mod smart_quotes;
mod substitute;

pub mod entity;
pub mod escape;
pub mod extension;
pub mod tags;

pub use entity::{character_to_entity, entity_to_character, replace_entities};
pub use error::{Error, Result};
pub use escape::{replace_reserved_characters, replace_reserved_in_html};
pub use extension::get_extension;
pub use files::{
    convert_html_file, convert_text_file, decode_text, format_html_file, read_text_file,
    TextEncoding,
};
pub use paragraphs::{text_to_html_document, text_to_paragraphs};
pub use readable::{make_human_readable, DEFAULT_INDENT};
pub use reduce::html_to_text;
pub use smart_quotes::{add_smart_quotes_to_element, add_smart_quotes_to_paragraphs};
pub use substitute::regex_replace;

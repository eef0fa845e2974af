//! File-level conversions: read with an encoding fallback, transform in
//! memory, write UTF-8.

use crate::error::{Error, Result};
use crate::paragraphs::text_to_html_document;
use crate::readable::make_human_readable;
use crate::reduce::html_to_text;
use encoding_rs::{mem, UTF_8};
use std::fs;
use std::path::Path;

/// Encodings tried, in order, when reading an input file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
}

impl TextEncoding {
    /// ASCII input is already valid UTF-8 and Latin-1 maps every byte, so no
    /// other encoding could ever be reached.
    pub const FALLBACK_ORDER: [TextEncoding; 2] = [TextEncoding::Utf8, TextEncoding::Latin1];

    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "latin-1",
        }
    }

    /// Strict decode: `None` when `bytes` are not valid in this encoding.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => UTF_8
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned()),
            TextEncoding::Latin1 => Some(mem::decode_latin1(bytes).into_owned()),
        }
    }
}

/// Decode with the first encoding in [`TextEncoding::FALLBACK_ORDER`] that
/// accepts the bytes.
pub fn decode_text(bytes: &[u8]) -> Option<(String, TextEncoding)> {
    TextEncoding::FALLBACK_ORDER
        .iter()
        .find_map(|&enc| enc.decode(bytes).map(|text| (text, enc)))
}

/// Read a text file, trying each fallback encoding, and trim surrounding
/// whitespace.
pub fn read_text_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let Some((text, encoding)) = decode_text(&bytes) else {
        return Err(Error::Undecodable(path.to_path_buf()));
    };
    if encoding != TextEncoding::Utf8 {
        log::warn!("{} is not UTF-8; decoded as {}", path.display(), encoding.name());
    }
    log::debug!("read {} bytes from {} as {}", bytes.len(), path.display(), encoding.name());
    Ok(text.trim().to_string())
}

fn check_output(path: &Path) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    if parent.is_dir() {
        Ok(())
    } else {
        Err(Error::InvalidOutput(path.to_path_buf()))
    }
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// Plain text file to an HTML document of paragraphs.
pub fn convert_text_file(input: &Path, output: &Path, contains_html: bool) -> Result<()> {
    check_output(output)?;
    let text = read_text_file(input)?;
    write_output(output, &text_to_html_document(&text, contains_html))
}

/// HTML file to plain text, optionally keeping basic markup.
pub fn convert_html_file(input: &Path, output: &Path, keep_tags: bool) -> Result<()> {
    check_output(output)?;
    let html = read_text_file(input)?;
    write_output(output, &html_to_text(&html, keep_tags))
}

/// Re-indent an HTML file.
pub fn format_html_file(input: &Path, output: &Path, indent: &str) -> Result<()> {
    check_output(output)?;
    let html = read_text_file(input)?;
    write_output(output, &make_human_readable(&html, indent))
}

//! Markup serialization and fragment parsing.
//!
//! Covers the HTML subset the grid emits for its table shell and rows. The
//! parser is strict about structure: a stray or mismatched closing tag is an
//! error instead of being repaired the way a browser would.

mod parse;
mod serialize;

pub use parse::parse_fragment;

use thiserror::Error;

/// Elements that never have children or a closing tag.
pub const VOID_TAGS: &[&str] = &["area", "br", "col", "hr", "img", "input", "meta", "wbr"];

pub fn is_void(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

/// Errors from parsing a markup fragment. Offsets are byte positions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("closing tag </{tag}> at offset {offset} has no open element")]
    UnexpectedClose { tag: String, offset: usize },
    #[error("closing tag </{found}> at offset {offset} does not match open <{expected}>")]
    MismatchedClose {
        expected: String,
        found: String,
        offset: usize,
    },
    #[error("element <{0}> is never closed")]
    Unclosed(String),
    #[error("unterminated tag starting at offset {0}")]
    UnterminatedTag(usize),
    #[error("unterminated comment starting at offset {0}")]
    UnterminatedComment(usize),
}

/// Escapes a string for use in a double-quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escapes a string for use as text content.
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub(crate) fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];

        let decoded = rest.find(';').and_then(|end| {
            let ch = match &rest[1..end] {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                entity => decode_numeric(entity),
            }?;
            Some((ch, end))
        });

        match decoded {
            Some((ch, end)) => {
                out.push(ch);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_numeric(entity: &str) -> Option<char> {
    let digits = entity.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    char::from_u32(code)
}

//! HTML/XML character entity decoding
//!
//! Texts handed to the lexer may have been entity-encoded on their way in
//! (form posts, HTML mail bodies). They are decoded back to literal UTF-8
//! before tokenizing so `caf&eacute;` and `café` produce the same token.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;

fn entity_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"&(?:#([0-9]+)|#[xX]([0-9A-Fa-f]+)|([A-Za-z][A-Za-z0-9]*));")
            .expect("entity pattern is valid")
    })
}

/// Decode decimal, hexadecimal and named entities (the full HTML5 table).
///
/// Unknown names and invalid code points are left untouched.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    entity_regex().replace_all(text, |caps: &Captures| {
        let decoded = if let Some(decimal) = caps.get(1) {
            decimal
                .as_str()
                .parse::<u32>()
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
        } else if let Some(hex) = caps.get(2) {
            u32::from_str_radix(hex.as_str(), 16)
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
        } else {
            named_entity(&caps[0])
        };

        decoded.unwrap_or_else(|| caps[0].to_string())
    })
}

fn named_entity(entity: &str) -> Option<String> {
    match html_escape::decode_html_entities(entity) {
        Cow::Owned(decoded) if decoded != entity => Some(decoded),
        _ => None,
    }
}

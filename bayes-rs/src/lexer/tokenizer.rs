//! Text to token multiset splitting

use indexmap::IndexMap;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, trace};

use super::entities::decode_entities;
use crate::config::LexerConfig;
use crate::error::LexError;

/// Prefix reserved for internal bookkeeping entries, never a valid token
pub const RESERVED_PREFIX: &str = "b8*";

/// Token -> number of occurrences, in order of first occurrence
pub type TokenMultiset = IndexMap<String, u32>;

struct Patterns {
    raw_split: Regex,
    uris: Regex,
    html: Regex,
    bbcode: Regex,
    tag_name: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        raw_split: Regex::new(r#"[\s,./":;|<>\-_\[\]{}+=)(*\&^%!?]+"#)
            .expect("raw split pattern is valid"),
        uris: Regex::new(r"(?:[A-Za-z][A-Za-z0-9+\-]*://)?[A-Za-z0-9_\-]*\.[A-Za-z0-9_\-.]+")
            .expect("uri pattern is valid"),
        html: Regex::new(r"<.+?>").expect("html pattern is valid"),
        bbcode: Regex::new(r"\[.+?\]").expect("bbcode pattern is valid"),
        tag_name: Regex::new(r"^(.+?)\s").expect("tag name pattern is valid"),
    })
}

/// Split a text into tokens.
///
/// Entities are decoded first. URIs, HTML tags and BBCode tags are then pulled
/// out as whole tokens (depending on `config`) and whatever text remains is
/// split on punctuation and whitespace. A text without any valid token yields
/// an empty multiset.
///
/// Fails with [`LexError::EmptyText`] when the text has zero length after
/// decoding.
pub fn tokenize(text: &str, config: &LexerConfig) -> Result<TokenMultiset, LexError> {
    let mut remaining = decode_entities(text).into_owned();
    if remaining.is_empty() {
        return Err(LexError::EmptyText);
    }

    let mut tokens = TokenMultiset::new();

    if config.get_uris {
        extract_uris(&mut remaining, &mut tokens, config);
    }

    if config.get_html {
        extract_markup(&mut remaining, &patterns().html, &mut tokens, config);
    }

    if config.get_bbcode {
        extract_markup(&mut remaining, &patterns().bbcode, &mut tokens, config);
    }

    raw_split(&remaining, &mut tokens, config);

    debug!(
        "Tokenized {} bytes into {} distinct tokens",
        text.len(),
        tokens.len()
    );

    Ok(tokens)
}

/// Tokenize raw bytes coming from a loosely typed boundary.
///
/// Fails with [`LexError::NotAString`] when the bytes are not UTF-8.
pub fn tokenize_bytes(bytes: &[u8], config: &LexerConfig) -> Result<TokenMultiset, LexError> {
    let text = std::str::from_utf8(bytes).map_err(|_| LexError::NotAString)?;
    tokenize(text, config)
}

/// Check whether a candidate may be used as a token
pub fn is_valid_token(token: &str, config: &LexerConfig) -> bool {
    if token.is_empty() || token.starts_with(RESERVED_PREFIX) {
        return false;
    }

    let len = token.len();
    if len < config.min_size || len > config.max_size {
        return false;
    }

    if !config.allow_numbers && token.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    true
}

/// Count a token if it is valid. Returns whether it was counted.
fn add_token(tokens: &mut TokenMultiset, token: &str, config: &LexerConfig) -> bool {
    if !is_valid_token(token, config) {
        trace!("Rejected token candidate {:?}", token);
        return false;
    }

    *tokens.entry(token.to_string()).or_insert(0) += 1;
    true
}

fn extract_uris(text: &mut String, tokens: &mut TokenMultiset, config: &LexerConfig) {
    let found: Vec<String> = patterns()
        .uris
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches('.').to_string())
        .collect();

    for uri in found {
        if add_token(tokens, &uri, config) {
            *text = text.replace(&uri, "");
        }

        // "sale.example.com" also counts "sale", "example" and "com"
        raw_split(&uri, tokens, config);
    }
}

fn extract_markup(
    text: &mut String,
    pattern: &Regex,
    tokens: &mut TokenMultiset,
    config: &LexerConfig,
) {
    let found: Vec<String> = pattern
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();

    for tag in found {
        // Tags with attributes collapse to "<name...>", only the name is removed
        let (token, to_remove) = match patterns().tag_name.captures(&tag) {
            Some(caps) => {
                let name = caps[1].to_string();
                (format!("{}...{}", name, &tag[tag.len() - 1..]), name)
            }
            None => (tag.clone(), tag),
        };

        if add_token(tokens, &token, config) {
            *text = text.replace(&to_remove, "");
        }
    }
}

fn raw_split(text: &str, tokens: &mut TokenMultiset, config: &LexerConfig) {
    for word in patterns().raw_split.split(text) {
        add_token(tokens, word, config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LexerConfig {
        LexerConfig::default()
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(tokenize("", &config()), Err(LexError::EmptyText));
        // decodes to a single no-break space, so not empty
        assert_eq!(tokenize("&nbsp;", &config()), Ok(TokenMultiset::new()));
    }

    #[test]
    fn test_not_a_string() {
        assert_eq!(
            tokenize_bytes(&[0xff, 0xfe, 0x41], &config()),
            Err(LexError::NotAString)
        );
        assert_eq!(tokenize_bytes(b"", &config()), Err(LexError::EmptyText));
        assert!(tokenize_bytes(b"hello world", &config()).is_ok());
    }

    #[test]
    fn test_raw_split_counts_occurrences() {
        let tokens = tokenize("spam, spam; eggs and spam", &config()).unwrap();
        assert_eq!(tokens.get("spam"), Some(&3));
        assert_eq!(tokens.get("eggs"), Some(&1));
        assert_eq!(tokens.get("and"), Some(&1));
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_insertion_order() {
        let tokens = tokenize("zebra apple mango apple", &config()).unwrap();
        let order: Vec<&str> = tokens.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_case_sensitive() {
        let tokens = tokenize("Hello hello HELLO", &config()).unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens.get("Hello"), Some(&1));
    }

    #[test]
    fn test_size_bounds() {
        let tokens = tokenize("a ab abc abcdefghijklmnopqrstuvwxyz0123456", &config()).unwrap();
        assert_eq!(tokens.len(), 1);
        assert!(tokens.contains_key("abc"));
    }

    #[test]
    fn test_numbers() {
        let tokens = tokenize("call 5551234 now", &config()).unwrap();
        assert!(!tokens.contains_key("5551234"));

        let mut allow = config();
        allow.allow_numbers = true;
        let tokens = tokenize("call 5551234 now", &allow).unwrap();
        assert_eq!(tokens.get("5551234"), Some(&1));

        // mixed tokens are never "purely numeric"
        let tokens = tokenize("win 100k", &config()).unwrap();
        assert!(tokens.contains_key("100k"));
    }

    #[test]
    fn test_reserved_prefix_rejected() {
        let mut cfg = config();
        cfg.min_size = 0;
        cfg.max_size = 100;
        cfg.allow_numbers = true;
        assert!(!is_valid_token("b8*texts", &cfg));
        assert!(!is_valid_token("b8*", &cfg));
        assert!(is_valid_token("b8texts", &cfg));
    }

    #[test]
    fn test_no_valid_tokens_is_empty() {
        let tokens = tokenize("a b c !! ??", &config()).unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_uri_extraction() {
        let tokens = tokenize("Visit sale.example.com. Today", &config()).unwrap();
        assert_eq!(tokens.get("sale.example.com"), Some(&1));
        assert_eq!(tokens.get("sale"), Some(&1));
        assert_eq!(tokens.get("example"), Some(&1));
        assert_eq!(tokens.get("com"), Some(&1));
        assert_eq!(tokens.get("Visit"), Some(&1));
        assert_eq!(tokens.get("Today"), Some(&1));
    }

    #[test]
    fn test_uri_with_scheme() {
        let text = "Buy cheap meds at http://spam-deals.example.com now!!";
        let tokens = tokenize(text, &config()).unwrap();

        for expected in [
            "http://spam-deals.example.com",
            "http",
            "spam",
            "deals",
            "example",
            "com",
            "Buy",
            "cheap",
            "meds",
            "now",
        ] {
            assert_eq!(tokens.get(expected), Some(&1), "missing {}", expected);
        }
        assert!(!tokens.contains_key("at"));
        assert_eq!(tokens.len(), 10);
    }

    #[test]
    fn test_uris_disabled() {
        let mut cfg = config();
        cfg.get_uris = false;
        let tokens = tokenize("Visit sale.example.com today", &cfg).unwrap();
        assert!(!tokens.contains_key("sale.example.com"));
        assert_eq!(tokens.get("sale"), Some(&1));
    }

    #[test]
    fn test_html_extraction() {
        let mut cfg = config();
        cfg.get_html = true;

        let tokens = tokenize("<b>bold</b> <a href=\"x\">link</a>", &cfg).unwrap();
        assert_eq!(tokens.get("<b>"), Some(&1));
        assert_eq!(tokens.get("</b>"), Some(&1));
        assert_eq!(tokens.get("<a...>"), Some(&1));
        assert_eq!(tokens.get("</a>"), Some(&1));
        assert_eq!(tokens.get("bold"), Some(&1));
        assert_eq!(tokens.get("link"), Some(&1));
        // attribute text survives the tag name removal
        assert_eq!(tokens.get("href"), Some(&1));
    }

    #[test]
    fn test_html_disabled_by_default() {
        let tokens = tokenize("<b>bold</b>", &config()).unwrap();
        assert!(!tokens.contains_key("<b>"));
        assert_eq!(tokens.get("bold"), Some(&1));
    }

    #[test]
    fn test_bbcode_extraction() {
        let mut cfg = config();
        cfg.get_bbcode = true;

        let tokens = tokenize("[url target=new]click[/url]", &cfg).unwrap();
        assert_eq!(tokens.get("[url...]"), Some(&1));
        assert_eq!(tokens.get("[/url]"), Some(&1));
        assert_eq!(tokens.get("click"), Some(&1));
    }

    #[test]
    fn test_entities_decoded() {
        let mut cfg = config();
        cfg.get_html = true;
        let tokens = tokenize("&lt;b&gt;caf&eacute;&lt;/b&gt;", &cfg).unwrap();
        assert_eq!(tokens.get("<b>"), Some(&1));
        assert_eq!(tokens.get("café"), Some(&1));
    }

    #[test]
    fn test_entities_outside_latin1_decoded() {
        let tokens = tokenize(
            "caf&eacute; na&iuml;ve &Scaron;koda &alpha;&beta;&gamma;",
            &config(),
        )
        .unwrap();
        let order: Vec<&str> = tokens.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["café", "naïve", "Škoda", "αβγ"]);
    }

    #[test]
    fn test_length_is_measured_in_bytes() {
        let mut cfg = config();
        cfg.min_size = 4;
        // two chars, four bytes
        let tokens = tokenize("éé ab", &cfg).unwrap();
        assert_eq!(tokens.get("éé"), Some(&1));
        assert!(!tokens.contains_key("ab"));
    }
}

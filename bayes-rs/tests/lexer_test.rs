//! Integration tests for the lexer

use bayes_rs::lexer::{is_valid_token, tokenize_bytes, RESERVED_PREFIX};
use bayes_rs::{tokenize, LexError, LexerConfig};
use proptest::prelude::*;

#[test]
fn test_spam_sample_tokens() {
    let tokens = tokenize(
        "Buy cheap meds at http://spam-deals.example.com now!!",
        &LexerConfig::default(),
    )
    .unwrap();

    for expected in [
        "http://spam-deals.example.com",
        "Buy",
        "cheap",
        "meds",
        "now",
        "http",
        "spam",
        "deals",
        "example",
        "com",
    ] {
        assert_eq!(tokens.get(expected), Some(&1), "missing {}", expected);
    }
    assert_eq!(tokens.len(), 10);
}

#[test]
fn test_empty_text_is_an_error() {
    assert_eq!(
        tokenize("", &LexerConfig::default()),
        Err(LexError::EmptyText)
    );
}

#[test]
fn test_invalid_utf8_is_not_a_string() {
    assert_eq!(
        tokenize_bytes(&[0x66, 0x6f, 0xff, 0x6f], &LexerConfig::default()),
        Err(LexError::NotAString)
    );
}

#[test]
fn test_html_and_bbcode_enabled() {
    let config = LexerConfig {
        get_html: true,
        get_bbcode: true,
        ..LexerConfig::default()
    };
    let tokens = tokenize(
        "<p>hello</p> [b]world[/b] &lt;em&gt;entity&lt;/em&gt;",
        &config,
    )
    .unwrap();

    assert_eq!(tokens.get("<p>"), Some(&1));
    assert_eq!(tokens.get("</p>"), Some(&1));
    assert_eq!(tokens.get("[/b]"), Some(&1));
    assert_eq!(tokens.get("<em>"), Some(&1));
    assert_eq!(tokens.get("hello"), Some(&1));
    assert_eq!(tokens.get("world"), Some(&1));
    assert_eq!(tokens.get("entity"), Some(&1));
}

#[test]
fn test_text_without_tokens_is_empty() {
    let tokens = tokenize("a b, c! 12 ...", &LexerConfig::default()).unwrap();
    assert!(tokens.is_empty());
}

proptest! {
    #[test]
    fn prop_reserved_prefix_always_rejected(suffix in "[a-z*_]{0,24}") {
        let token = format!("{}{}", RESERVED_PREFIX, suffix);
        let config = LexerConfig {
            min_size: 1,
            max_size: 1000,
            allow_numbers: true,
            ..LexerConfig::default()
        };
        prop_assert!(!is_valid_token(&token, &config));
    }

    #[test]
    fn prop_tokens_are_valid_and_counted(text in "\\PC{1,200}") {
        let config = LexerConfig::default();
        let tokens = tokenize(&text, &config).unwrap();

        for (token, &count) in &tokens {
            prop_assert!(count >= 1);
            prop_assert!(!token.starts_with(RESERVED_PREFIX));
            prop_assert!(is_valid_token(token, &config));
        }
    }
}

//! Tokenizer module
//!
//! Turns raw text into a multiset of tokens for the classifier.

pub mod entities;
pub mod tokenizer;

pub use entities::decode_entities;
pub use tokenizer::{is_valid_token, tokenize, tokenize_bytes, TokenMultiset, RESERVED_PREFIX};

use thiserror::Error;

/// Errors raised while splitting a text into tokens
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("Text is not a valid UTF-8 string")]
    NotAString,

    #[error("Text is empty")]
    EmptyText,
}

/// Errors raised by learn/unlearn requests
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Lexer error: {0}")]
    Lex(#[from] LexError),
}

#[derive(Error, Debug)]
pub enum BayesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Lexer error: {0}")]
    Lex(#[from] LexError),

    #[error("Classifier error: {0}")]
    Classify(#[from] ClassifyError),
}

pub type Result<T> = std::result::Result<T, BayesError>;

//! bayes-rs: Bayesian spam/ham text classifier
//!
//! A statistical text classifier in the Graham/Robinson-Fisher family: texts
//! are split into tokens, every token gets a spam probability from how often
//! it was seen in learned ham and spam texts, and the most telling tokens are
//! combined into a single rating.
//!
//! # Features
//!
//! - **Lexer**: entity decoding, URI/HTML/BBCode aware token extraction
//! - **Scoring**: Robinson smoothing and Fisher-style combination
//! - **Training**: learn and unlearn with counters clamped at zero
//! - **Degenerator**: case and punctuation variants for unknown tokens
//!
//! The lexer and classifier are plain functions over explicit inputs and keep
//! no state between calls. [`BayesFilter`] ties them to a [`TokenStore`].
//!
//! # Example
//!
//! ```
//! use bayes_rs::{BayesConfig, BayesFilter, Category, MemoryStore};
//! use std::sync::Arc;
//!
//! let filter = BayesFilter::new(BayesConfig::default(), Arc::new(MemoryStore::new()))?;
//!
//! filter.learn("Cheap meds, buy now!", Category::Spam)?;
//! filter.learn("Minutes of the budget meeting", Category::Ham)?;
//!
//! let rating = filter.classify("buy cheap meds")?;
//! assert!(rating > 0.5);
//! # Ok::<(), bayes_rs::BayesError>(())
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling
//! - [`lexer`]: Text to token multiset
//! - [`classifier`]: Scoring and learn/unlearn
//! - [`degenerator`]: Variants for unknown tokens
//! - [`storage`]: Token statistics backends
//! - [`filter`]: Store-backed filter service

pub mod classifier;
pub mod config;
pub mod degenerator;
pub mod error;
pub mod filter;
pub mod lexer;
pub mod storage;

// Re-export commonly used types
pub use classifier::{Category, CorpusTotals, StatsSnapshot, TokenData, TokenStats};
pub use config::{BayesConfig, ClassifierConfig, DegeneratorConfig, LexerConfig};
pub use degenerator::{CaseDegenerator, Degenerator, NoDegenerator};
pub use error::{BayesError, ClassifyError, LexError, Result};
pub use filter::BayesFilter;
pub use lexer::{tokenize, TokenMultiset};
pub use storage::{MemoryStore, TokenStore};

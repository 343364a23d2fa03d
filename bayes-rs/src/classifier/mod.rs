//! Classifier module
//!
//! Robinson-Fisher scoring of token multisets and incremental maintenance of
//! the per-token statistics.

pub mod scorer;
pub mod trainer;
pub mod types;

pub use scorer::{calc_probability, classify, combine, importance, relevant_ratings, token_probability};
pub use trainer::{apply, learn, learn_str, process, unlearn, unlearn_str};
pub use types::*;

//! Degenerator module
//!
//! When a token has no statistics of its own, nearby spellings of it (other
//! case, fewer exclamation marks, ...) may still say something about it.
//! A [`Degenerator`] produces those variants together with their stats.

pub mod case;

pub use case::CaseDegenerator;

use std::collections::BTreeSet;

use crate::classifier::DegenerateMap;
use crate::error::Result;

/// Source of known variants for unknown tokens
#[cfg_attr(test, mockall::automock)]
pub trait Degenerator: Send + Sync {
    /// Map each token to its known variants. Tokens without any known
    /// variant are left out.
    fn degenerate(&self, tokens: &BTreeSet<String>) -> Result<DegenerateMap>;
}

/// Degenerator that never finds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDegenerator;

impl Degenerator for NoDegenerator {
    fn degenerate(&self, _tokens: &BTreeSet<String>) -> Result<DegenerateMap> {
        Ok(DegenerateMap::new())
    }
}

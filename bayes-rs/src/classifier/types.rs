//! Classifier types and data structures

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ClassifyError;

/// Per-token counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenStats {
    /// Occurrences in learned ham texts
    pub count_ham: u64,
    /// Occurrences in learned spam texts
    pub count_spam: u64,
}

impl TokenStats {
    pub fn new(count_ham: u64, count_spam: u64) -> Self {
        Self {
            count_ham,
            count_spam,
        }
    }

    /// Total occurrences in both categories
    pub fn total(&self) -> u64 {
        self.count_ham.saturating_add(self.count_spam)
    }
}

/// Number of learned texts per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusTotals {
    pub texts_ham: u64,
    pub texts_spam: u64,
}

impl CorpusTotals {
    pub fn new(texts_ham: u64, texts_spam: u64) -> Self {
        Self {
            texts_ham,
            texts_spam,
        }
    }
}

/// Token -> (variant -> stats), variants in the order they were generated
pub type DegenerateMap = HashMap<String, IndexMap<String, TokenStats>>;

/// Everything known about the tokens of a text being rated
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenData {
    /// Stats of tokens found as-is
    pub tokens: HashMap<String, TokenStats>,
    /// Stats of known variants of tokens that were not found
    pub degenerates: DegenerateMap,
}

/// Statistics snapshot consumed and returned by learn/unlearn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub tokens: HashMap<String, TokenStats>,
    pub totals: CorpusTotals,
}

impl StatsSnapshot {
    pub fn new(tokens: HashMap<String, TokenStats>, totals: CorpusTotals) -> Self {
        Self { tokens, totals }
    }
}

/// Text category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Ham,
    Spam,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Ham => write!(f, "ham"),
            Category::Spam => write!(f, "spam"),
        }
    }
}

impl FromStr for Category {
    type Err = ClassifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ham" => Ok(Category::Ham),
            "spam" => Ok(Category::Spam),
            _ => Err(ClassifyError::InvalidCategory(s.to_string())),
        }
    }
}

/// Training direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Learn,
    Unlearn,
}

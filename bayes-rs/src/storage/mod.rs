//! Token statistics storage
//!
//! The classifier itself never persists anything. A [`TokenStore`] hands out
//! the statistics of the tokens a request needs and takes back the updated
//! ones.
//!
//! - [`memory`]: in-memory store guarded by a read/write lock

pub mod memory;

pub use memory::MemoryStore;

use std::collections::{BTreeSet, HashMap};

use crate::classifier::{CorpusTotals, TokenStats};
use crate::error::Result;

/// Backend holding per-token statistics and corpus totals
#[cfg_attr(test, mockall::automock)]
pub trait TokenStore: Send + Sync {
    /// Fetch the stats of the given tokens. Unknown tokens are left out.
    fn load(&self, tokens: &BTreeSet<String>) -> Result<HashMap<String, TokenStats>>;

    /// Fetch the number of learned texts per category
    fn load_totals(&self) -> Result<CorpusTotals>;

    /// Insert or replace the given token stats and the totals
    fn save(&self, tokens: &HashMap<String, TokenStats>, totals: CorpusTotals) -> Result<()>;
}

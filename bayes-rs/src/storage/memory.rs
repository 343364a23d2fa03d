use std::collections::{BTreeSet, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use super::TokenStore;
use crate::classifier::{CorpusTotals, StatsSnapshot, TokenStats};
use crate::error::{BayesError, Result};

/// Token statistics kept in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<StatsSnapshot>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with a snapshot
    pub fn from_snapshot(snapshot: StatsSnapshot) -> Self {
        Self {
            inner: RwLock::new(snapshot),
        }
    }

    /// Copy of everything currently stored
    pub fn snapshot(&self) -> Result<StatsSnapshot> {
        Ok(self.read()?.clone())
    }

    /// Number of distinct tokens stored
    pub fn token_count(&self) -> Result<usize> {
        Ok(self.read()?.tokens.len())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StatsSnapshot>> {
        self.inner
            .read()
            .map_err(|e| BayesError::Storage(format!("Store lock poisoned: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StatsSnapshot>> {
        self.inner
            .write()
            .map_err(|e| BayesError::Storage(format!("Store lock poisoned: {}", e)))
    }
}

impl TokenStore for MemoryStore {
    fn load(&self, tokens: &BTreeSet<String>) -> Result<HashMap<String, TokenStats>> {
        let inner = self.read()?;
        Ok(tokens
            .iter()
            .filter_map(|token| inner.tokens.get(token).map(|stats| (token.clone(), *stats)))
            .collect())
    }

    fn load_totals(&self) -> Result<CorpusTotals> {
        Ok(self.read()?.totals)
    }

    fn save(&self, tokens: &HashMap<String, TokenStats>, totals: CorpusTotals) -> Result<()> {
        let mut inner = self.write()?;
        for (token, stats) in tokens {
            inner.tokens.insert(token.clone(), *stats);
        }
        inner.totals = totals;

        debug!(
            "Saved {} tokens, store now holds {}",
            tokens.len(),
            inner.tokens.len()
        );
        Ok(())
    }
}

//! Filter service wiring configuration, storage and degenerator
//!
//! Provides text level classify/learn/unlearn on top of the pure classifier
//! functions.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use crate::classifier::{
    self, Action, Category, DegenerateMap, StatsSnapshot, TokenData,
};
use crate::config::BayesConfig;
use crate::degenerator::{CaseDegenerator, Degenerator};
use crate::error::{BayesError, Result};
use crate::lexer::{tokenize, TokenMultiset};
use crate::storage::TokenStore;

/// Bayesian spam filter bound to a statistics store
pub struct BayesFilter<S: TokenStore + ?Sized, D: Degenerator = CaseDegenerator<S>> {
    config: BayesConfig,
    store: Arc<S>,
    degenerator: D,
    /// Serializes load/apply/save cycles against the store
    training: Mutex<()>,
}

impl<S: TokenStore + ?Sized> BayesFilter<S, CaseDegenerator<S>> {
    /// Create a filter using the case degenerator on the same store
    pub fn new(config: BayesConfig, store: Arc<S>) -> Result<Self> {
        let degenerator = CaseDegenerator::new(Arc::clone(&store), config.degenerator.clone());
        Self::with_degenerator(config, store, degenerator)
    }
}

impl<S: TokenStore + ?Sized, D: Degenerator> BayesFilter<S, D> {
    /// Create a filter with a custom degenerator
    pub fn with_degenerator(config: BayesConfig, store: Arc<S>, degenerator: D) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            store,
            degenerator,
            training: Mutex::new(()),
        })
    }

    /// Get current config
    pub fn config(&self) -> &BayesConfig {
        &self.config
    }

    /// Get the underlying store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Split a text into tokens using the configured lexer settings
    pub fn tokenize(&self, text: &str) -> Result<TokenMultiset> {
        Ok(tokenize(text, &self.config.lexer)?)
    }

    /// Rate a text between 0 (ham) and 1 (spam)
    pub fn classify(&self, text: &str) -> Result<f64> {
        let tokens = self.tokenize(text)?;
        self.classify_tokens(&tokens)
    }

    /// Rate an already tokenized text
    pub fn classify_tokens(&self, tokens: &TokenMultiset) -> Result<f64> {
        let data = self.token_data(tokens)?;
        let totals = self.store.load_totals().map_err(store_failed)?;

        Ok(classifier::classify(
            tokens,
            &data,
            totals,
            &self.config.classifier,
        ))
    }

    /// Collect stats for the tokens, plus variants of those the store lacks
    pub fn token_data(&self, tokens: &TokenMultiset) -> Result<TokenData> {
        let wanted: BTreeSet<String> = tokens.keys().cloned().collect();
        let known = self.store.load(&wanted).map_err(store_failed)?;

        let missing: BTreeSet<String> = wanted
            .into_iter()
            .filter(|token| !known.contains_key(token))
            .collect();

        let degenerates = if missing.is_empty() {
            DegenerateMap::new()
        } else {
            self.degenerator.degenerate(&missing)?
        };

        debug!(
            "{} tokens known, {} unknown, {} with variants",
            known.len(),
            missing.len(),
            degenerates.len()
        );

        Ok(TokenData {
            tokens: known,
            degenerates,
        })
    }

    /// Learn a reference text
    pub fn learn(&self, text: &str, category: Category) -> Result<()> {
        self.train(text, category, Action::Learn)
    }

    /// Unlearn a previously learned reference text
    pub fn unlearn(&self, text: &str, category: Category) -> Result<()> {
        self.train(text, category, Action::Unlearn)
    }

    /// Learn a text, category given as "ham" or "spam"
    pub fn learn_str(&self, text: &str, category: &str) -> Result<()> {
        let category: Category = category.parse()?;
        self.learn(text, category)
    }

    /// Unlearn a text, category given as "ham" or "spam"
    pub fn unlearn_str(&self, text: &str, category: &str) -> Result<()> {
        let category: Category = category.parse()?;
        self.unlearn(text, category)
    }

    fn train(&self, text: &str, category: Category, action: Action) -> Result<()> {
        // Tokenize before touching the store so a bad text changes nothing
        let tokens = self.tokenize(text)?;

        let _guard = self
            .training
            .lock()
            .map_err(|e| BayesError::Storage(format!("Training lock poisoned: {}", e)))?;

        let wanted: BTreeSet<String> = tokens.keys().cloned().collect();
        let snapshot = StatsSnapshot::new(
            self.store.load(&wanted).map_err(store_failed)?,
            self.store.load_totals().map_err(store_failed)?,
        );

        let updated = classifier::apply(&tokens, category, action, snapshot);
        self.store
            .save(&updated.tokens, updated.totals)
            .map_err(store_failed)?;

        info!(
            "{:?} {} text with {} distinct tokens (ham texts: {}, spam texts: {})",
            action,
            category,
            tokens.len(),
            updated.totals.texts_ham,
            updated.totals.texts_spam
        );

        Ok(())
    }
}

fn store_failed(e: BayesError) -> BayesError {
    warn!("Token store request failed: {}", e);
    e
}

//! Case and trailing punctuation variants

use indexmap::{IndexMap, IndexSet};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

use super::Degenerator;
use crate::classifier::DegenerateMap;
use crate::config::DegeneratorConfig;
use crate::error::Result;
use crate::storage::TokenStore;

const TRAILING_MARKS: [char; 3] = ['!', '?', '.'];

/// Looks up lower case, upper case and capitalized spellings of a token, and
/// versions with trailing `!`, `?` or `.` collapsed or removed.
///
/// The built-in lexer splits on those marks, so the punctuation variants only
/// matter for multisets built elsewhere and rated through
/// [`BayesFilter::classify_tokens`](crate::BayesFilter::classify_tokens).
pub struct CaseDegenerator<S: TokenStore + ?Sized> {
    store: Arc<S>,
    config: DegeneratorConfig,
}

impl<S: TokenStore + ?Sized> CaseDegenerator<S> {
    pub fn new(store: Arc<S>, config: DegeneratorConfig) -> Self {
        Self { store, config }
    }

    /// All variants of a word, the word itself excluded
    pub fn variants(&self, word: &str) -> Vec<String> {
        let mut bases: IndexSet<String> = IndexSet::new();
        bases.insert(word.to_string());
        bases.insert(self.lower(word));
        bases.insert(self.upper(word));
        bases.insert(self.capitalized(word));

        let mut variants: IndexSet<String> = IndexSet::new();
        for base in &bases {
            variants.insert(base.clone());

            let stripped = base.trim_end_matches(&TRAILING_MARKS[..]);
            if stripped.len() == base.len() || stripped.is_empty() {
                continue;
            }

            // "now!!!" -> "now!" and "now"
            let mark = &base[stripped.len()..stripped.len() + 1];
            variants.insert(format!("{}{}", stripped, mark));
            variants.insert(stripped.to_string());
        }

        variants.shift_remove(word);
        variants.into_iter().collect()
    }

    fn lower(&self, word: &str) -> String {
        if self.config.multibyte {
            word.to_lowercase()
        } else {
            word.to_ascii_lowercase()
        }
    }

    fn upper(&self, word: &str) -> String {
        if self.config.multibyte {
            word.to_uppercase()
        } else {
            word.to_ascii_uppercase()
        }
    }

    fn capitalized(&self, word: &str) -> String {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => {
                let rest = self.lower(chars.as_str());
                if self.config.multibyte {
                    first.to_uppercase().chain(rest.chars()).collect()
                } else {
                    let mut out = String::with_capacity(word.len());
                    out.push(first.to_ascii_uppercase());
                    out.push_str(&rest);
                    out
                }
            }
            None => String::new(),
        }
    }
}

impl<S: TokenStore + ?Sized> Degenerator for CaseDegenerator<S> {
    fn degenerate(&self, tokens: &BTreeSet<String>) -> Result<DegenerateMap> {
        if tokens.is_empty() {
            return Ok(DegenerateMap::new());
        }

        let candidates: Vec<(&String, Vec<String>)> = tokens
            .iter()
            .map(|token| (token, self.variants(token)))
            .collect();

        let wanted: BTreeSet<String> = candidates
            .iter()
            .flat_map(|(_, variants)| variants.iter().cloned())
            .collect();
        let known = self.store.load(&wanted)?;

        let mut degenerates = DegenerateMap::new();
        for (token, variants) in candidates {
            let found: IndexMap<String, _> = variants
                .into_iter()
                .filter_map(|variant| known.get(&variant).map(|stats| (variant, *stats)))
                .collect();

            if !found.is_empty() {
                degenerates.insert(token.clone(), found);
            }
        }

        debug!(
            "Found variants for {} of {} unknown tokens",
            degenerates.len(),
            tokens.len()
        );

        Ok(degenerates)
    }
}

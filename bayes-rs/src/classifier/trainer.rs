//! Learning and unlearning of reference texts
//!
//! All functions take a statistics snapshot by value and hand back the
//! updated one. Nothing is kept between calls.

use tracing::debug;

use super::types::{Action, Category, StatsSnapshot, TokenStats};
use crate::config::LexerConfig;
use crate::error::ClassifyError;
use crate::lexer::{tokenize, TokenMultiset};

/// Learn a reference text
pub fn learn(
    text: &str,
    category: Category,
    snapshot: StatsSnapshot,
    lexer: &LexerConfig,
) -> Result<StatsSnapshot, ClassifyError> {
    process(text, category, Action::Learn, snapshot, lexer)
}

/// Unlearn a previously learned reference text
pub fn unlearn(
    text: &str,
    category: Category,
    snapshot: StatsSnapshot,
    lexer: &LexerConfig,
) -> Result<StatsSnapshot, ClassifyError> {
    process(text, category, Action::Unlearn, snapshot, lexer)
}

/// Learn a text with the category given as a string ("ham" or "spam")
pub fn learn_str(
    text: &str,
    category: &str,
    snapshot: StatsSnapshot,
    lexer: &LexerConfig,
) -> Result<StatsSnapshot, ClassifyError> {
    let category: Category = category.parse()?;
    learn(text, category, snapshot, lexer)
}

/// Unlearn a text with the category given as a string ("ham" or "spam")
pub fn unlearn_str(
    text: &str,
    category: &str,
    snapshot: StatsSnapshot,
    lexer: &LexerConfig,
) -> Result<StatsSnapshot, ClassifyError> {
    let category: Category = category.parse()?;
    unlearn(text, category, snapshot, lexer)
}

/// Tokenize and apply. A lexer failure leaves the snapshot untouched.
pub fn process(
    text: &str,
    category: Category,
    action: Action,
    snapshot: StatsSnapshot,
    lexer: &LexerConfig,
) -> Result<StatsSnapshot, ClassifyError> {
    let tokens = tokenize(text, lexer)?;
    Ok(apply(&tokens, category, action, snapshot))
}

/// Add or remove a token multiset to/from the given category.
///
/// Counters never drop below zero. Unlearning a token that was never seen
/// does nothing. The text counter of the category moves by one.
pub fn apply(
    tokens: &TokenMultiset,
    category: Category,
    action: Action,
    mut snapshot: StatsSnapshot,
) -> StatsSnapshot {
    for (token, &count) in tokens {
        let count = u64::from(count);

        match (snapshot.tokens.get_mut(token), action) {
            (Some(stats), Action::Learn) => {
                let counter = counter_mut(stats, category);
                *counter = counter.saturating_add(count);
            }
            (Some(stats), Action::Unlearn) => {
                let counter = counter_mut(stats, category);
                *counter = counter.saturating_sub(count);
            }
            (None, Action::Learn) => {
                let mut stats = TokenStats::default();
                *counter_mut(&mut stats, category) = count;
                snapshot.tokens.insert(token.clone(), stats);
            }
            // nothing to remove
            (None, Action::Unlearn) => {}
        }
    }

    let totals = &mut snapshot.totals;
    let texts = match category {
        Category::Ham => &mut totals.texts_ham,
        Category::Spam => &mut totals.texts_spam,
    };
    *texts = match action {
        Action::Learn => texts.saturating_add(1),
        Action::Unlearn => texts.saturating_sub(1),
    };

    debug!(
        "{:?} {} text with {} distinct tokens, totals now ham={} spam={}",
        action,
        category,
        tokens.len(),
        snapshot.totals.texts_ham,
        snapshot.totals.texts_spam
    );

    snapshot
}

fn counter_mut(stats: &mut TokenStats, category: Category) -> &mut u64 {
    match category {
        Category::Ham => &mut stats.count_ham,
        Category::Spam => &mut stats.count_spam,
    }
}

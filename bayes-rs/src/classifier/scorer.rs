//! Robinson-Fisher scoring
//!
//! Each token gets a spam probability from its counters (Graham's ratio,
//! smoothed towards a prior as proposed by Gary Robinson). The most telling
//! tokens are then combined with Fisher's inverse chi-square style product
//! into a single rating between 0 (ham) and 1 (spam).

use tracing::{debug, trace};

use super::types::{CorpusTotals, TokenData, TokenStats};
use crate::config::ClassifierConfig;
use crate::lexer::TokenMultiset;

/// Rating returned when nothing can be said about a text
pub const NEUTRAL: f64 = 0.5;

/// Rate a token multiset, returns a value between 0 (ham) and 1 (spam)
pub fn classify(
    tokens: &TokenMultiset,
    data: &TokenData,
    totals: CorpusTotals,
    config: &ClassifierConfig,
) -> f64 {
    let relevant = relevant_ratings(tokens, data, totals, config);
    let probability = combine(&relevant);

    debug!(
        "Rated {} tokens using {} relevant values: {:.4}",
        tokens.len(),
        relevant.len(),
        probability
    );

    probability
}

/// Spam probability of a single token, falling back to its degenerated
/// versions and finally to `rob_x` when it is unknown
pub fn token_probability(
    token: &str,
    data: &TokenData,
    totals: CorpusTotals,
    config: &ClassifierConfig,
) -> f64 {
    if let Some(stats) = data.tokens.get(token) {
        return calc_probability(
            *stats,
            totals.texts_ham,
            totals.texts_spam,
            config.rob_s,
            config.rob_x,
        );
    }

    if let Some(variants) = data.degenerates.get(token) {
        // Keep the most telling variant, 0.5 says nothing
        let mut rating = NEUTRAL;

        for (variant, stats) in variants {
            let candidate = calc_probability(
                *stats,
                totals.texts_ham,
                totals.texts_spam,
                config.rob_s,
                config.rob_x,
            );
            trace!("Variant {:?} of {:?} rated {:.4}", variant, token, candidate);

            if importance(candidate) > importance(rating) {
                rating = candidate;
            }
        }

        return rating;
    }

    config.rob_x
}

/// Robinson-smoothed spam probability of a token.
///
/// Counts are related to the number of learned texts, since a token is
/// counted as often as it appears and not once per text.
pub fn calc_probability(
    stats: TokenStats,
    texts_ham: u64,
    texts_spam: u64,
    rob_s: f64,
    rob_x: f64,
) -> f64 {
    let mut rel_ham = stats.count_ham as f64;
    let mut rel_spam = stats.count_spam as f64;

    if texts_ham > 0 {
        rel_ham /= texts_ham as f64;
    }

    if texts_spam > 0 {
        rel_spam /= texts_spam as f64;
    }

    let rating = if rel_ham + rel_spam > 0.0 {
        rel_spam / (rel_ham + rel_spam)
    } else {
        0.0
    };

    let all = stats.total() as f64;
    let weight = rob_s + all;
    if weight <= 0.0 {
        return rob_x;
    }

    ((rob_s * rob_x) + (all * rating)) / weight
}

/// Deviation of a probability from the neutral 0.5
pub fn importance(probability: f64) -> f64 {
    (NEUTRAL - probability).abs()
}

/// Pick the probabilities that take part in the rating.
///
/// Tokens are ranked by importance with a stable sort, so tokens of equal
/// importance keep the order they first appeared in. At most `use_relevant`
/// tokens are looked at, and only those deviating more than `min_dev` count.
/// A token seen `n` times contributes its probability `n` times.
pub fn relevant_ratings(
    tokens: &TokenMultiset,
    data: &TokenData,
    totals: CorpusTotals,
    config: &ClassifierConfig,
) -> Vec<f64> {
    let mut ranked: Vec<(u32, f64, f64)> = tokens
        .iter()
        .map(|(token, &count)| {
            let probability = token_probability(token, data, totals, config);
            (count, probability, importance(probability))
        })
        .collect();

    ranked.sort_by(|a, b| b.2.total_cmp(&a.2));

    let mut relevant = Vec::new();
    for &(count, probability, importance) in ranked.iter().take(config.use_relevant) {
        if importance <= config.min_dev {
            // everything further down is even less telling
            break;
        }
        relevant.extend(std::iter::repeat(probability).take(count as usize));
    }

    relevant
}

/// Combine token probabilities into a single rating
pub fn combine(ratings: &[f64]) -> f64 {
    if ratings.is_empty() {
        return NEUTRAL;
    }

    let n = ratings.len() as f64;
    let (hamminess, spamminess) = ratings
        .iter()
        .fold((1.0_f64, 1.0_f64), |(h, s), &p| (h * (1.0 - p), s * p));

    let hamminess = 1.0 - hamminess.powf(1.0 / n);
    let spamminess = 1.0 - spamminess.powf(1.0 / n);

    let sum = hamminess + spamminess;
    if sum <= 0.0 || !sum.is_finite() {
        return NEUTRAL;
    }

    let indicator = (hamminess - spamminess) / sum;
    ((1.0 + indicator) / 2.0).clamp(0.0, 1.0)
}

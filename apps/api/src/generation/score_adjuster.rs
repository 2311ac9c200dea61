//! Draft Score Adjuster: turns the model's preliminary Yap score into the final,
//! bounded score using fixed business rules.
//!
//! Algorithm:
//! 1. start from the raw score
//! 2. +1.5 (15% of the scale) per boost keyword found in the draft, case-insensitive
//! 3. × 1.2 for positive sentiment, × 0.8 for negative, × 1.0 otherwise
//! 4. clamp to [0, 10]
//! 5. round to one decimal place

use serde::{Deserialize, Serialize};

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 10.0;

/// Projects whose mention earns a boost.
pub const DEFAULT_BOOST_KEYWORDS: [&str; 5] = ["GRID", "ROMA", "zkSync", "Kaia", "Sophon"];

/// 15% of the maximum score.
pub const KEYWORD_INCREMENT: f64 = 0.15 * SCORE_MAX;

const POSITIVE_MULTIPLIER: f64 = 1.2;
const NEGATIVE_MULTIPLIER: f64 = 0.8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    /// Case-insensitive parse. Anything unrecognised is neutral.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "positive" => Sentiment::Positive,
            "negative" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            Sentiment::Positive => POSITIVE_MULTIPLIER,
            Sentiment::Negative => NEGATIVE_MULTIPLIER,
            Sentiment::Neutral => 1.0,
        }
    }
}

/// Keywords from `boost_keywords` that appear in `draft`, ignoring case.
pub fn matched_keywords<'a, S: AsRef<str>>(draft: &str, boost_keywords: &'a [S]) -> Vec<&'a str> {
    let haystack = draft.to_lowercase();
    boost_keywords
        .iter()
        .map(|k| k.as_ref())
        .filter(|k| !k.is_empty() && haystack.contains(&k.to_lowercase()))
        .collect()
}

/// Computes the final Yap score.
pub fn adjust_score<S: AsRef<str>>(
    raw_score: f64,
    sentiment: Sentiment,
    draft: &str,
    boost_keywords: &[S],
) -> f64 {
    let boost = matched_keywords(draft, boost_keywords).len() as f64 * KEYWORD_INCREMENT;
    let score = (raw_score + boost) * sentiment.multiplier();
    round_one_decimal(clamp_score(score))
}

/// Clamps any score to [0, 10]. NaN maps to 0.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return SCORE_MIN;
    }
    score.clamp(SCORE_MIN, SCORE_MAX)
}

/// Clamp then round, for scores that get no business-rule adjustment.
pub fn normalize_score(score: f64) -> f64 {
    round_one_decimal(clamp_score(score))
}

fn round_one_decimal(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}

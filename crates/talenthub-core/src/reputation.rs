//! Reputation levels and the score-derived rating statistics.
//!
//! The raw score is a single integer in `0..=1000`. Everything shown to a
//! viewer (level, rating count, average) is recomputed from it on every read.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Ceiling for a reputation score. Reaching it means platinum.
pub const MAX_SCORE: u32 = 1000;

/// Points added to the target's score per rating star.
pub const POINTS_PER_STAR: u32 = 10;

/// Score span treated as one rating when approximating the rating count.
const SCORE_PER_RATING: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Level {
    /// Inclusive lower bound of the level.
    #[must_use]
    pub fn min_score(self) -> u32 {
        match self {
            Level::Bronze => 0,
            Level::Silver => 100,
            Level::Gold => 500,
            Level::Platinum => 1000,
        }
    }

    /// Highest level whose threshold `score` reaches.
    #[must_use]
    pub fn for_score(score: u32) -> Self {
        [Level::Platinum, Level::Gold, Level::Silver]
            .into_iter()
            .find(|level| score >= level.min_score())
            .unwrap_or(Level::Bronze)
    }

    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Level::Bronze => Some(Level::Silver),
            Level::Silver => Some(Level::Gold),
            Level::Gold => Some(Level::Platinum),
            Level::Platinum => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Level::Bronze => "Bronze",
            Level::Silver => "Silver",
            Level::Gold => "Gold",
            Level::Platinum => "Platinum",
        }
    }

    #[must_use]
    pub fn benefits(self) -> &'static [&'static str] {
        match self {
            Level::Bronze => &["Basic profile", "Can receive ratings"],
            Level::Silver => &["Enhanced visibility", "Can rate others", "Silver badge"],
            Level::Gold => &["Priority in search", "Gold badge", "Featured profile"],
            Level::Platinum => &[
                "Top tier visibility",
                "Platinum badge",
                "Premium features",
            ],
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Bronze => write!(f, "bronze"),
            Level::Silver => write!(f, "silver"),
            Level::Gold => write!(f, "gold"),
            Level::Platinum => write!(f, "platinum"),
        }
    }
}

/// Derived view of a creator's reputation. Never stored; rebuild it with
/// [`derive_reputation`] whenever the raw score changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReputationSummary {
    pub total_score: u32,
    /// Approximation from the score, not a count of stored ratings.
    pub ratings_count: u32,
    /// In `[1.0, 5.0]`, one decimal place.
    pub average_rating: f64,
    pub level: Level,
    /// Passed through from the badge ledger as-is.
    pub badges: Vec<String>,
}

impl ReputationSummary {
    /// Percentage of the way to the next level's threshold, capped at 100.
    /// `None` once the top level is reached.
    #[must_use]
    pub fn progress_to_next_level(&self) -> Option<f64> {
        let next = self.level.next()?;
        let pct = f64::from(self.total_score) / f64::from(next.min_score()) * 100.0;
        Some(pct.min(100.0))
    }
}

/// Build a [`ReputationSummary`] from a raw ledger score and badge names.
///
/// Scores above [`MAX_SCORE`] are clamped. The rating count is
/// `score / 50` (at least 1) and the average is `score / (count * 10)`
/// clamped to `[1.0, 5.0]` and rounded half-up to one decimal.
#[must_use]
pub fn derive_reputation(raw_score: u32, badges: Vec<String>) -> ReputationSummary {
    let total_score = raw_score.min(MAX_SCORE);
    let ratings_count = (total_score / SCORE_PER_RATING).max(1);
    let average = f64::from(total_score) / f64::from(ratings_count * POINTS_PER_STAR);
    let average_rating = (average.clamp(1.0, 5.0) * 10.0).round() / 10.0;

    ReputationSummary {
        total_score,
        ratings_count,
        average_rating,
        level: Level::for_score(total_score),
        badges,
    }
}

/// New score after a rating of `new_rating` stars lands on `current_score`.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] if `new_rating` is outside `1..=5`.
pub fn apply_rating_submission(current_score: u32, new_rating: u8) -> Result<u32, CoreError> {
    if !(1..=5).contains(&new_rating) {
        return Err(CoreError::Validation(format!(
            "rating must be between 1 and 5, got {new_rating}"
        )));
    }
    let gained = u32::from(new_rating) * POINTS_PER_STAR;
    Ok(current_score.saturating_add(gained).min(MAX_SCORE))
}

/// Whether `rater` may rate `target`. Only self-rating is refused; there is
/// no rate limiting between distinct identities.
#[must_use]
pub fn can_rate(rater: &str, target: &str) -> bool {
    rater != target
}

/// [`can_rate`] as a policy check.
///
/// # Errors
///
/// Returns [`CoreError::Permission`] when `rater` and `target` are the same
/// identity.
pub fn ensure_can_rate(rater: &str, target: &str) -> Result<(), CoreError> {
    if can_rate(rater, target) {
        Ok(())
    } else {
        Err(CoreError::Permission("cannot rate yourself".to_string()))
    }
}

#[cfg(test)]
#[path = "reputation_test.rs"]
mod tests;

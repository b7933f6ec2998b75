use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::reputation::ensure_can_rate;
use crate::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingCategory {
    Quality,
    Communication,
    Timeliness,
    Professionalism,
}

impl std::fmt::Display for RatingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatingCategory::Quality => write!(f, "quality"),
            RatingCategory::Communication => write!(f, "communication"),
            RatingCategory::Timeliness => write!(f, "timeliness"),
            RatingCategory::Professionalism => write!(f, "professionalism"),
        }
    }
}

/// A single rating left by one identity for another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub id: Uuid,
    pub from_user: String,
    pub to_user: String,
    /// Stars, `1..=5`.
    pub rating: u8,
    pub category: RatingCategory,
    pub project_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RatingRecord {
    /// Build a rating after the self-rating and range checks.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Permission`] if `from_user == to_user`, or
    /// [`CoreError::Validation`] if `rating` is outside `1..=5`.
    pub fn new(
        from_user: &str,
        to_user: &str,
        rating: u8,
        category: RatingCategory,
        project_id: Option<String>,
    ) -> Result<Self, CoreError> {
        ensure_can_rate(from_user, to_user)?;
        if !(1..=5).contains(&rating) {
            return Err(CoreError::Validation(format!(
                "rating must be between 1 and 5, got {rating}"
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            from_user: from_user.to_string(),
            to_user: to_user.to_string(),
            rating,
            category,
            project_id,
            created_at: Utc::now(),
        })
    }
}

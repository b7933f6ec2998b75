//! Per-identity key/value entries standing in for on-ledger account data.
//!
//! Entry keys:
//! - `USER_PROFILE`: hash of the registered profile
//! - `USER_REGISTERED`: registration time, unix millis
//! - `REP_SCORE`: reputation score as decimal text
//! - `BADGE_<NAME>`: badge record JSON
//! - `RATING_<uuid>`: rating record JSON, on the rater's entries

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use talenthub_core::{apply_rating_submission, BadgeRecord, CoreError, RatingRecord};
use tokio::sync::Mutex;

use crate::traits::ReputationLedger;
use crate::{json_file, StoreError};

const PROFILE_KEY: &str = "USER_PROFILE";
const REGISTERED_KEY: &str = "USER_REGISTERED";
const SCORE_KEY: &str = "REP_SCORE";
const BADGE_PREFIX: &str = "BADGE_";
const RATING_PREFIX: &str = "RATING_";

type Entries = BTreeMap<String, String>;

#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    accounts: Mutex<BTreeMap<String, Entries>>,
}

impl Ledger {
    /// Open the ledger at `path`. A missing file is an empty ledger.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file exists but cannot be read or parsed.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let accounts = json_file::load(&path).await?;
        Ok(Self {
            path,
            accounts: Mutex::new(accounts),
        })
    }

    #[must_use]
    pub async fn is_registered(&self, public_key: &str) -> bool {
        self.accounts
            .lock()
            .await
            .get(public_key)
            .is_some_and(|entries| entries.contains_key(PROFILE_KEY))
    }

    /// Record a new identity with its profile hash and a zero score.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyRegistered`] if the identity already has a
    /// profile entry, or an I/O error if the ledger cannot be written.
    pub async fn register(&self, public_key: &str, profile_hash: &str) -> Result<(), StoreError> {
        self.mutate(public_key, |entries| {
            if entries.contains_key(PROFILE_KEY) {
                return Err(StoreError::AlreadyRegistered(public_key.to_string()));
            }
            entries.insert(PROFILE_KEY.to_string(), profile_hash.to_string());
            entries.insert(SCORE_KEY.to_string(), "0".to_string());
            entries.insert(
                REGISTERED_KEY.to_string(),
                Utc::now().timestamp_millis().to_string(),
            );
            Ok(())
        })
        .await
    }

    /// # Errors
    ///
    /// Returns [`StoreError::NotRegistered`] for an unknown identity, or an
    /// I/O error if the ledger cannot be written.
    pub async fn set_profile_hash(
        &self,
        public_key: &str,
        profile_hash: &str,
    ) -> Result<(), StoreError> {
        self.mutate(public_key, |entries| {
            if !entries.contains_key(PROFILE_KEY) {
                return Err(StoreError::NotRegistered(public_key.to_string()));
            }
            entries.insert(PROFILE_KEY.to_string(), profile_hash.to_string());
            Ok(())
        })
        .await
    }

    #[must_use]
    pub async fn profile_hash(&self, public_key: &str) -> Option<String> {
        self.accounts
            .lock()
            .await
            .get(public_key)
            .and_then(|entries| entries.get(PROFILE_KEY).cloned())
    }

    /// Registration time from `USER_REGISTERED`. `None` for unknown
    /// identities or an unreadable timestamp.
    #[must_use]
    pub async fn registered_at(&self, public_key: &str) -> Option<DateTime<Utc>> {
        self.accounts
            .lock()
            .await
            .get(public_key)
            .and_then(|entries| entries.get(REGISTERED_KEY))
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .and_then(DateTime::from_timestamp_millis)
    }

    /// Overwrite the stored score.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the ledger cannot be written.
    pub async fn set_score(&self, public_key: &str, score: u32) -> Result<(), StoreError> {
        self.mutate(public_key, |entries| {
            entries.insert(SCORE_KEY.to_string(), score.to_string());
            Ok(())
        })
        .await
    }

    /// Apply a validated rating to the target's score and file the record
    /// under the rater's entries, in one write. Returns the new score.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Core`] if the record's star value is out of
    /// range, or an I/O error if the ledger cannot be written.
    pub async fn apply_rating(&self, record: &RatingRecord) -> Result<u32, StoreError> {
        let record_json = serde_json::to_string(record)?;
        let mut accounts = self.accounts.lock().await;
        let mut next = accounts.clone();

        let current = next.get(&record.to_user).map_or(0, score_of);
        let new_score = apply_rating_submission(current, record.rating)?;

        next.entry(record.to_user.clone())
            .or_default()
            .insert(SCORE_KEY.to_string(), new_score.to_string());
        next.entry(record.from_user.clone())
            .or_default()
            .insert(format!("{RATING_PREFIX}{}", record.id), record_json);

        json_file::save(&self.path, &next).await?;
        *accounts = next;

        tracing::info!(
            target_key = %record.to_user,
            rating = record.rating,
            new_score,
            "reputation updated"
        );
        Ok(new_score)
    }

    /// Attach a badge to `public_key`. Badge keys are upper-cased, so awarding
    /// the same name twice replaces the earlier record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Core`] for a blank badge name, or an I/O error if
    /// the ledger cannot be written.
    pub async fn award_badge(
        &self,
        awarded_by: &str,
        public_key: &str,
        name: &str,
        description: &str,
    ) -> Result<BadgeRecord, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("badge name is required".to_string()).into());
        }

        let badge = BadgeRecord {
            name: name.to_string(),
            description: description.to_string(),
            awarded_by: Some(awarded_by.to_string()),
            awarded_to: Some(public_key.to_string()),
            timestamp: Some(Utc::now().timestamp_millis()),
        };
        let badge_json = serde_json::to_string(&badge)?;

        self.mutate(public_key, |entries| {
            entries.insert(
                format!("{BADGE_PREFIX}{}", name.to_uppercase()),
                badge_json,
            );
            Ok(())
        })
        .await?;

        Ok(badge)
    }

    /// Rating records filed by `public_key`. Entries that fail to parse are
    /// skipped.
    #[must_use]
    pub async fn ratings_by(&self, public_key: &str) -> Vec<RatingRecord> {
        let accounts = self.accounts.lock().await;
        let Some(entries) = accounts.get(public_key) else {
            return Vec::new();
        };
        entries
            .iter()
            .filter(|(key, _)| key.starts_with(RATING_PREFIX))
            .filter_map(|(key, raw)| match serde_json::from_str(raw) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(public_key, entry = %key, error = %e, "skipping unparsable rating entry");
                    None
                }
            })
            .collect()
    }

    /// Write a raw entry as-is. Used for importing ledger data.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the ledger cannot be written.
    pub async fn put_entry(&self, public_key: &str, key: &str, value: &str) -> Result<(), StoreError> {
        self.mutate(public_key, |entries| {
            entries.insert(key.to_string(), value.to_string());
            Ok(())
        })
        .await
    }

    async fn mutate<F>(&self, public_key: &str, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Entries) -> Result<(), StoreError>,
    {
        let mut accounts = self.accounts.lock().await;
        let mut next = accounts.clone();
        f(next.entry(public_key.to_string()).or_default())?;
        json_file::save(&self.path, &next).await?;
        *accounts = next;
        Ok(())
    }
}

// Missing or unparsable scores read as 0.
fn score_of(entries: &Entries) -> u32 {
    entries
        .get(SCORE_KEY)
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(0)
}

impl ReputationLedger for Ledger {
    async fn raw_score(&self, public_key: &str) -> Result<u32, StoreError> {
        Ok(self
            .accounts
            .lock()
            .await
            .get(public_key)
            .map_or(0, score_of))
    }

    async fn badge_records(&self, public_key: &str) -> Result<Vec<String>, StoreError> {
        let accounts = self.accounts.lock().await;
        Ok(accounts
            .get(public_key)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|(key, _)| key.starts_with(BADGE_PREFIX))
                    .map(|(_, raw)| raw.clone())
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;

//! Composition root for the creator directory.

use std::path::Path;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use talenthub_core::{
    badge_names, derive_reputation, list_creators, load_seed, validate_profile, AppConfig,
    Creator, CreatorFilters, CreatorProfile, RatingCategory, RatingRecord, ReputationSummary,
    SeedFile,
};

use crate::hash::profile_hash;
use crate::ledger::Ledger;
use crate::profiles::ProfileStore;
use crate::traits::{ProfileSource, ReputationLedger};
use crate::StoreError;

/// Result of a rating submission.
#[derive(Debug, Clone)]
pub struct RatingOutcome {
    pub record: RatingRecord,
    pub new_score: u32,
}

/// Read one identity's score and badges and derive its summary.
///
/// Badge entries that fail to parse are logged and left out of the summary.
///
/// # Errors
///
/// Propagates any [`StoreError`] from the ledger.
pub async fn load_reputation<L>(ledger: &L, public_key: &str) -> Result<ReputationSummary, StoreError>
where
    L: ReputationLedger,
{
    let raw_score = ledger.raw_score(public_key).await?;
    let records = ledger.badge_records(public_key).await?;

    let badges = badge_names(records.iter().map(String::as_str), |_, e| {
        tracing::warn!(public_key, error = %e, "dropping unparsable badge record");
    });

    Ok(derive_reputation(raw_score, badges))
}

/// Join every stored profile with its reputation.
///
/// Reputation loads run concurrently, at most `max_concurrent` at a time, and
/// results come back in profile order. A creator whose reputation fails to
/// load is kept with `reputation: None`.
///
/// # Errors
///
/// Returns [`StoreError`] only if the profile listing itself fails.
pub async fn collect_creators<P, L>(
    profiles: &P,
    ledger: &L,
    max_concurrent: usize,
) -> Result<Vec<Creator>, StoreError>
where
    P: ProfileSource,
    L: ReputationLedger,
{
    let entries = profiles.get_all().await?;

    let creators: Vec<Creator> = stream::iter(entries)
        .map(|(public_key, profile)| async move {
            let reputation = match load_reputation(ledger, &public_key).await {
                Ok(summary) => Some(summary),
                Err(e) => {
                    tracing::warn!(
                        public_key = %public_key,
                        error = %e,
                        "failed to load reputation"
                    );
                    None
                }
            };
            Creator {
                public_key,
                profile,
                reputation,
            }
        })
        .buffered(max_concurrent.max(1))
        .collect()
        .await;

    Ok(creators)
}

/// Profile store and ledger behind one handle. Writes go through here so the
/// two stay consistent; reads fan out and then run the core pipeline.
#[derive(Debug)]
pub struct Directory {
    profiles: ProfileStore,
    ledger: Ledger,
    max_concurrent: usize,
}

impl Directory {
    #[must_use]
    pub fn new(profiles: ProfileStore, ledger: Ledger, max_concurrent: usize) -> Self {
        Self {
            profiles,
            ledger,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Open both stores under `config.data_dir` and apply the seed file if
    /// one is configured.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if either store cannot be opened or the seed
    /// file is invalid.
    pub async fn open(config: &AppConfig) -> Result<Self, StoreError> {
        let profiles = ProfileStore::open(config.profiles_path()).await?;
        let ledger = Ledger::open(config.ledger_path()).await?;
        let directory = Self::new(profiles, ledger, config.max_concurrent_reputation_loads);

        if let Some(seed_path) = &config.seed_path {
            let registered = directory.seed_from_yaml(seed_path).await?;
            tracing::info!(registered, path = %seed_path.display(), "applied creator seed");
        }

        Ok(directory)
    }

    #[must_use]
    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Register `caller` with `profile`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Core`] for an invalid profile,
    /// [`StoreError::AlreadyRegistered`] if `caller` is already registered,
    /// or an I/O error.
    pub async fn register_creator(
        &self,
        caller: &str,
        profile: CreatorProfile,
    ) -> Result<(), StoreError> {
        validate_profile(&profile)?;
        let hash = profile_hash(&profile)?;
        self.ledger.register(caller, &hash).await?;
        self.profiles.put(caller, profile).await?;
        tracing::info!(public_key = caller, "creator registered");
        Ok(())
    }

    /// Replace the profile of an already registered `caller`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Core`] for an invalid profile,
    /// [`StoreError::NotRegistered`] for an unknown caller, or an I/O error.
    pub async fn update_profile(
        &self,
        caller: &str,
        profile: CreatorProfile,
    ) -> Result<(), StoreError> {
        validate_profile(&profile)?;
        let hash = profile_hash(&profile)?;
        self.ledger.set_profile_hash(caller, &hash).await?;
        self.profiles.put(caller, profile).await?;
        tracing::info!(public_key = caller, "creator profile updated");
        Ok(())
    }

    /// When `public_key` was registered, if it is.
    #[must_use]
    pub async fn registered_at(&self, public_key: &str) -> Option<DateTime<Utc>> {
        self.ledger.registered_at(public_key).await
    }

    /// # Errors
    ///
    /// Propagates any [`StoreError`] from the ledger.
    pub async fn reputation(&self, public_key: &str) -> Result<ReputationSummary, StoreError> {
        load_reputation(&self.ledger, public_key).await
    }

    /// Filtered directory listing, highest score first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the profile listing fails.
    pub async fn load_creators(&self, filters: &CreatorFilters) -> Result<Vec<Creator>, StoreError> {
        let creators = collect_creators(&self.profiles, &self.ledger, self.max_concurrent).await?;
        Ok(list_creators(creators, filters))
    }

    /// One creator by identity; `None` when no profile is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the profile lookup fails.
    pub async fn load_creator(&self, public_key: &str) -> Result<Option<Creator>, StoreError> {
        let Some(profile) = self.profiles.get(public_key).await? else {
            return Ok(None);
        };

        let reputation = match self.reputation(public_key).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::warn!(public_key, error = %e, "failed to load reputation");
                None
            }
        };

        Ok(Some(Creator {
            public_key: public_key.to_string(),
            profile,
            reputation,
        }))
    }

    /// Rate `target` as `rater`. The rater is the caller's own identity; the
    /// target must be registered.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Core`] with a permission error for self-rating or
    /// a validation error for stars outside `1..=5`,
    /// [`StoreError::NotRegistered`] for an unknown target, or an I/O error.
    pub async fn submit_rating(
        &self,
        rater: &str,
        target: &str,
        rating: u8,
        category: RatingCategory,
        project_id: Option<String>,
    ) -> Result<RatingOutcome, StoreError> {
        let record = RatingRecord::new(rater, target, rating, category, project_id)?;
        if !self.ledger.is_registered(target).await {
            return Err(StoreError::NotRegistered(target.to_string()));
        }

        let new_score = self.ledger.apply_rating(&record).await?;
        Ok(RatingOutcome { record, new_score })
    }

    /// # Errors
    ///
    /// Returns [`StoreError::NotRegistered`] for an unknown target,
    /// [`StoreError::Core`] for a blank name, or an I/O error.
    pub async fn award_badge(
        &self,
        admin: &str,
        target: &str,
        name: &str,
        description: &str,
    ) -> Result<(), StoreError> {
        if !self.ledger.is_registered(target).await {
            return Err(StoreError::NotRegistered(target.to_string()));
        }
        let badge = self
            .ledger
            .award_badge(admin, target, name, description)
            .await?;
        tracing::info!(public_key = target, badge = %badge.name, "badge awarded");
        Ok(())
    }

    /// Register every seeded creator not registered yet. Returns how many
    /// were registered.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on the first failed registration.
    pub async fn seed(&self, seed: &SeedFile) -> Result<usize, StoreError> {
        let mut registered = 0usize;
        for creator in &seed.creators {
            if self.ledger.is_registered(&creator.public_key).await {
                tracing::debug!(public_key = %creator.public_key, "seed creator already registered");
                continue;
            }
            self.register_creator(&creator.public_key, creator.profile.clone())
                .await?;
            registered += 1;
        }
        Ok(registered)
    }

    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the seed file is unreadable or
    /// invalid, or any error from [`Directory::seed`].
    pub async fn seed_from_yaml(&self, path: &Path) -> Result<usize, StoreError> {
        let seed = load_seed(path)?;
        self.seed(&seed).await
    }
}

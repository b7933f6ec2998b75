use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use talenthub_core::CreatorProfile;
use tokio::sync::Mutex;

use crate::traits::ProfileSource;
use crate::{json_file, StoreError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredProfile {
    #[serde(flatten)]
    pub profile: CreatorProfile,
    pub updated_at: DateTime<Utc>,
}

/// Profiles keyed by identity, persisted as one JSON object.
#[derive(Debug)]
pub struct ProfileStore {
    path: PathBuf,
    profiles: Mutex<BTreeMap<String, StoredProfile>>,
}

impl ProfileStore {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file exists but cannot be read or parsed.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let profiles = json_file::load(&path).await?;
        Ok(Self {
            path,
            profiles: Mutex::new(profiles),
        })
    }

    /// Insert or replace the profile for `public_key` and persist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be written. The in-memory
    /// copy is left untouched in that case.
    pub async fn put(&self, public_key: &str, profile: CreatorProfile) -> Result<(), StoreError> {
        let mut profiles = self.profiles.lock().await;
        let mut next = profiles.clone();
        next.insert(
            public_key.to_string(),
            StoredProfile {
                profile,
                updated_at: Utc::now(),
            },
        );
        json_file::save(&self.path, &next).await?;
        *profiles = next;
        Ok(())
    }

    #[must_use]
    pub async fn updated_at(&self, public_key: &str) -> Option<DateTime<Utc>> {
        self.profiles
            .lock()
            .await
            .get(public_key)
            .map(|p| p.updated_at)
    }
}

impl ProfileSource for ProfileStore {
    async fn get_all(&self) -> Result<Vec<(String, CreatorProfile)>, StoreError> {
        let profiles = self.profiles.lock().await;
        Ok(profiles
            .iter()
            .map(|(key, stored)| (key.clone(), stored.profile.clone()))
            .collect())
    }

    async fn get(&self, public_key: &str) -> Result<Option<CreatorProfile>, StoreError> {
        let profiles = self.profiles.lock().await;
        Ok(profiles.get(public_key).map(|stored| stored.profile.clone()))
    }
}

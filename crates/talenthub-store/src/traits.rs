//! Read-side seams used by the reputation fan-out. The file-backed stores
//! implement them; tests substitute their own.

use std::future::Future;

use talenthub_core::CreatorProfile;

use crate::StoreError;

pub trait ProfileSource: Send + Sync {
    /// Every stored profile with its identity key, in a stable order.
    fn get_all(
        &self,
    ) -> impl Future<Output = Result<Vec<(String, CreatorProfile)>, StoreError>> + Send;

    fn get(
        &self,
        public_key: &str,
    ) -> impl Future<Output = Result<Option<CreatorProfile>, StoreError>> + Send;
}

pub trait ReputationLedger: Send + Sync {
    /// Stored score for the identity; 0 when nothing is recorded.
    fn raw_score(&self, public_key: &str) -> impl Future<Output = Result<u32, StoreError>> + Send;

    /// Unparsed badge entries attached to the identity.
    fn badge_records(
        &self,
        public_key: &str,
    ) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;
}

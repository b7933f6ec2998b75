use sha2::{Digest, Sha256};
use talenthub_core::CreatorProfile;

use crate::StoreError;

/// Hex SHA-256 of the profile's JSON form, recorded in the ledger at
/// registration and on every update.
///
/// # Errors
///
/// Returns [`StoreError::Json`] if the profile cannot be serialized.
pub fn profile_hash(profile: &CreatorProfile) -> Result<String, StoreError> {
    let bytes = serde_json::to_vec(profile)?;
    Ok(format!("{:x}", Sha256::digest(&bytes)))
}

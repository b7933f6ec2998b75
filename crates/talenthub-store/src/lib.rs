//! Storage collaborators and orchestration for the creator directory.
//!
//! Profiles and ledger entries live in JSON files under the configured data
//! directory. [`Directory`] ties both together: it validates and persists
//! writes, and for reads fans out per-creator reputation loads before handing
//! the complete set to the core filter/sort pipeline.

pub mod directory;
pub mod error;
pub mod hash;
pub mod ledger;
pub mod profiles;
pub mod traits;

mod json_file;

pub use directory::{collect_creators, load_reputation, Directory, RatingOutcome};
pub use error::StoreError;
pub use hash::profile_hash;
pub use ledger::Ledger;
pub use profiles::{ProfileStore, StoredProfile};
pub use traits::{ProfileSource, ReputationLedger};

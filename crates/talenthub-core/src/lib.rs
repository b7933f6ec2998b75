//! Domain core for the creator directory: profiles, reputation scoring and
//! levels, and the filter/sort pipeline over the creator list.
//!
//! Everything here is synchronous and side-effect free except the
//! configuration loaders, which read the process environment and seed files.

pub mod app_config;
pub mod badges;
pub mod config;
pub mod directory;
pub mod error;
pub mod profile;
pub mod rating;
pub mod reputation;
pub mod seed;

pub use app_config::AppConfig;
pub use badges::{badge_names, parse_badge, BadgeRecord};
pub use config::{load_app_config, load_app_config_from_env};
pub use directory::{get_creator, list_creators, Creator, CreatorFilters};
pub use error::{ConfigError, CoreError};
pub use profile::{
    validate_profile, Availability, CreatorProfile, PortfolioLink, SocialLink, Specialty,
};
pub use rating::{RatingCategory, RatingRecord};
pub use reputation::{
    apply_rating_submission, can_rate, derive_reputation, ensure_can_rate, Level,
    ReputationSummary, MAX_SCORE,
};
pub use seed::{load_seed, SeedCreator, SeedFile};

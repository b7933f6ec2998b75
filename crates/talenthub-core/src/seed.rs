use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::profile::{validate_profile, CreatorProfile};
use crate::ConfigError;

#[derive(Debug, Clone, Deserialize)]
pub struct SeedCreator {
    pub public_key: String,
    pub profile: CreatorProfile,
}

#[derive(Debug, Deserialize)]
pub struct SeedFile {
    pub creators: Vec<SeedCreator>,
}

/// Load and validate a YAML file of creators to pre-register.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_seed(path: &Path) -> Result<SeedFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SeedFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let seed: SeedFile = serde_yaml::from_str(&content)?;
    validate_seed(&seed)?;

    Ok(seed)
}

fn validate_seed(seed: &SeedFile) -> Result<(), ConfigError> {
    let mut seen_keys = HashSet::new();

    for creator in &seed.creators {
        if creator.public_key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "creator public_key must be non-empty".to_string(),
            ));
        }

        if !seen_keys.insert(creator.public_key.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate creator public_key: '{}'",
                creator.public_key
            )));
        }

        validate_profile(&creator.profile).map_err(|e| {
            ConfigError::Validation(format!("creator '{}': {e}", creator.public_key))
        })?;
    }

    Ok(())
}

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specialty {
    Youtube,
    Tiktok,
    Instagram,
    Twitch,
    Twitter,
    Linkedin,
    Podcast,
    Blog,
    VideoEditing,
    GraphicDesign,
    Copywriting,
    Photography,
}

impl Specialty {
    pub const ALL: [Specialty; 12] = [
        Specialty::Youtube,
        Specialty::Tiktok,
        Specialty::Instagram,
        Specialty::Twitch,
        Specialty::Twitter,
        Specialty::Linkedin,
        Specialty::Podcast,
        Specialty::Blog,
        Specialty::VideoEditing,
        Specialty::GraphicDesign,
        Specialty::Copywriting,
        Specialty::Photography,
    ];

    /// Wire name, identical to the serde representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Specialty::Youtube => "youtube",
            Specialty::Tiktok => "tiktok",
            Specialty::Instagram => "instagram",
            Specialty::Twitch => "twitch",
            Specialty::Twitter => "twitter",
            Specialty::Linkedin => "linkedin",
            Specialty::Podcast => "podcast",
            Specialty::Blog => "blog",
            Specialty::VideoEditing => "video_editing",
            Specialty::GraphicDesign => "graphic_design",
            Specialty::Copywriting => "copywriting",
            Specialty::Photography => "photography",
        }
    }
}

impl std::fmt::Display for Specialty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Specialty {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Specialty::ALL
            .into_iter()
            .find(|sp| sp.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("unknown specialty '{s}'")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Busy,
    Unavailable,
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Availability::Available => write!(f, "available"),
            Availability::Busy => write!(f, "busy"),
            Availability::Unavailable => write!(f, "unavailable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioLink {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

/// Public profile of a creator, keyed externally by identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorProfile {
    pub display_name: String,
    pub bio: String,
    /// Kept in the order the creator picked them; duplicates are rejected by
    /// [`validate_profile`].
    pub specialties: Vec<Specialty>,
    #[serde(default)]
    pub portfolio_links: Vec<PortfolioLink>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub hourly_rate: Option<u32>,
    pub availability: Availability,
}

impl CreatorProfile {
    #[must_use]
    pub fn has_specialty(&self, specialty: Specialty) -> bool {
        self.specialties.contains(&specialty)
    }
}

/// Check the fields a profile must carry before it is registered or updated.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] for a blank display name or bio, an
/// empty or duplicated specialty list, or a zero hourly rate.
pub fn validate_profile(profile: &CreatorProfile) -> Result<(), CoreError> {
    if profile.display_name.trim().is_empty() {
        return Err(CoreError::Validation(
            "display name is required".to_string(),
        ));
    }

    if profile.bio.trim().is_empty() {
        return Err(CoreError::Validation("bio is required".to_string()));
    }

    if profile.specialties.is_empty() {
        return Err(CoreError::Validation(
            "at least one specialty is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for specialty in &profile.specialties {
        if !seen.insert(specialty) {
            return Err(CoreError::Validation(format!(
                "duplicate specialty '{specialty}'"
            )));
        }
    }

    if profile.hourly_rate == Some(0) {
        return Err(CoreError::Validation(
            "hourly rate must be positive".to_string(),
        ));
    }

    Ok(())
}

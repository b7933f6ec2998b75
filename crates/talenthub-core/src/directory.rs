//! Filtering and ordering of the creator directory.

use serde::{Deserialize, Serialize};

use crate::profile::{Availability, CreatorProfile, Specialty};
use crate::reputation::{Level, ReputationSummary};

/// A profile joined with its (optional) reputation, keyed by identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub public_key: String,
    pub profile: CreatorProfile,
    /// `None` when the reputation could not be loaded.
    pub reputation: Option<ReputationSummary>,
}

impl Creator {
    /// Sort key for the directory; a creator without reputation ranks as 0.
    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.reputation.as_ref().map_or(0, |r| r.total_score)
    }
}

/// Directory query. Every `None` field leaves that dimension unconstrained;
/// the constraints that are set must all hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatorFilters {
    /// Matches creators with at least one of these. Empty means no constraint.
    pub specialties: Option<Vec<Specialty>>,
    pub min_rating: Option<f64>,
    pub max_hourly_rate: Option<u32>,
    pub availability: Option<Availability>,
    /// Case-insensitive substring of the profile location.
    pub location: Option<String>,
    pub level: Option<Level>,
    /// Case-insensitive substring of name, bio, or a specialty name.
    pub search: Option<String>,
}

impl CreatorFilters {
    #[must_use]
    pub fn matches(&self, creator: &Creator) -> bool {
        self.matches_search(creator)
            && self.matches_specialties(&creator.profile)
            && self.matches_availability(&creator.profile)
            && self.matches_location(&creator.profile)
            && self.matches_hourly_rate(&creator.profile)
            && self.matches_min_rating(creator.reputation.as_ref())
            && self.matches_level(creator.reputation.as_ref())
    }

    fn matches_search(&self, creator: &Creator) -> bool {
        let Some(term) = non_blank(self.search.as_deref()) else {
            return true;
        };
        let term = term.to_lowercase();
        let profile = &creator.profile;

        profile.display_name.to_lowercase().contains(&term)
            || profile.bio.to_lowercase().contains(&term)
            || profile
                .specialties
                .iter()
                .any(|s| s.as_str().contains(&term))
    }

    fn matches_specialties(&self, profile: &CreatorProfile) -> bool {
        match self.specialties.as_deref() {
            None | Some([]) => true,
            Some(wanted) => wanted.iter().any(|s| profile.has_specialty(*s)),
        }
    }

    fn matches_availability(&self, profile: &CreatorProfile) -> bool {
        self.availability
            .is_none_or(|wanted| profile.availability == wanted)
    }

    // A creator without a location fails once a location is asked for.
    fn matches_location(&self, profile: &CreatorProfile) -> bool {
        let Some(wanted) = non_blank(self.location.as_deref()) else {
            return true;
        };
        profile
            .location
            .as_deref()
            .is_some_and(|loc| loc.to_lowercase().contains(&wanted.to_lowercase()))
    }

    fn matches_hourly_rate(&self, profile: &CreatorProfile) -> bool {
        match (self.max_hourly_rate, profile.hourly_rate) {
            (Some(max), Some(rate)) => rate <= max,
            _ => true,
        }
    }

    // Missing reputation is not evaluated, so it never excludes.
    fn matches_min_rating(&self, reputation: Option<&ReputationSummary>) -> bool {
        match (self.min_rating, reputation) {
            (Some(min), Some(rep)) => rep.average_rating >= min,
            _ => true,
        }
    }

    fn matches_level(&self, reputation: Option<&ReputationSummary>) -> bool {
        match (self.level, reputation) {
            (Some(level), Some(rep)) => rep.level == level,
            _ => true,
        }
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Apply `filters` and order the survivors by total score, highest first.
/// Creators with equal scores keep their input order.
pub fn list_creators<I>(all: I, filters: &CreatorFilters) -> Vec<Creator>
where
    I: IntoIterator<Item = Creator>,
{
    let mut creators: Vec<Creator> = all.into_iter().filter(|c| filters.matches(c)).collect();
    creators.sort_by(|a, b| b.total_score().cmp(&a.total_score()));
    creators
}

/// Exact lookup by identity key.
#[must_use]
pub fn get_creator<'a>(all: &'a [Creator], public_key: &str) -> Option<&'a Creator> {
    all.iter().find(|c| c.public_key == public_key)
}

#[cfg(test)]
#[path = "directory_test.rs"]
mod tests;

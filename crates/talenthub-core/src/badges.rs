//! Badge records as kept in the badge ledger.

use serde::{Deserialize, Serialize};

/// One awarded badge. Stored as JSON with camelCase keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeRecord {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub awarded_by: Option<String>,
    #[serde(default)]
    pub awarded_to: Option<String>,
    /// Unix epoch milliseconds.
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// Parse a single raw badge entry.
///
/// # Errors
///
/// Returns the underlying [`serde_json::Error`] if the entry is not a JSON
/// object with a string `name`.
pub fn parse_badge(raw: &str) -> Result<BadgeRecord, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Names of every badge entry that parses. Entries that don't parse are
/// handed to `on_error` and left out.
#[must_use]
pub fn badge_names<'a, I, F>(raw_records: I, mut on_error: F) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
    F: FnMut(&str, serde_json::Error),
{
    raw_records
        .into_iter()
        .filter_map(|raw| match parse_badge(raw) {
            Ok(badge) => Some(badge.name),
            Err(e) => {
                on_error(raw, e);
                None
            }
        })
        .collect()
}

//! Data models for stories and the dashboard's filter state.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Story`]: One normalized news item as written by the upstream feed aggregator
//! - [`FilterState`]: The reader's current date range, category and district choices
//!
//! The JSON document uses camelCase for the publication date (`pubDate`), hence
//! the serde rename on [`Story::pub_date`].

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel value offered by the category and district selectors meaning "no filter".
pub const ALL: &str = "All";

/// Label (and badge) used for stories with no category.
pub const UNCATEGORISED: &str = "Uncategorised";

/// Categories assigned by the upstream classifier, in the order it evaluates them.
///
/// The classifier writes `"Uncategorised"` literally when no keyword matches.
pub const KNOWN_CATEGORIES: [&str; 5] = [
    "Opposition Activity",
    "NDA Activity",
    "Governance issues",
    "Judicial cases",
    UNCATEGORISED,
];

/// A single news story loaded from the aggregated JSON document.
///
/// Stories are loaded once at startup and never mutated afterwards. Optional
/// fields tolerate both a missing key and an empty string; either is stored
/// as `None`.
///
/// # Fields
///
/// * `pub_date` - ISO-8601 timestamp; zero-padded so it orders lexically
/// * `summary` - May contain markup written by the producer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Story {
    /// The headline.
    pub title: String,
    /// URL of the original article.
    pub link: String,
    /// Publication timestamp as written by the producer, e.g. `2024-05-02T09:00:00+00:00`.
    #[serde(rename = "pubDate")]
    pub pub_date: String,
    /// Human-friendly name of the outlet.
    #[serde(default)]
    pub source: String,
    /// District the feed covers, if known.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub district: Option<String>,
    /// Category assigned by the upstream classifier, if any.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category: Option<String>,
    /// Short summary, possibly containing raw markup.
    #[serde(default)]
    pub summary: String,
}

impl Story {
    /// Date portion (`YYYY-MM-DD`) of the publication timestamp.
    pub fn pub_day(&self) -> &str {
        self.pub_date.get(..10).unwrap_or(&self.pub_date)
    }

    /// Category label for display, falling back to [`UNCATEGORISED`].
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORISED)
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}

/// The reader's current filter choices.
///
/// Every field is optional; `None` means the predicate is not applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Keep stories published on or after this day.
    pub start_date: Option<NaiveDate>,
    /// Keep stories published on or before this day (the whole day is included).
    pub end_date: Option<NaiveDate>,
    /// Keep stories with exactly this category.
    pub category: Option<String>,
    /// Keep stories from exactly this district.
    pub district: Option<String>,
}

impl FilterState {
    /// True when no predicate is active.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Convert a selector value into an optional filter, treating `"All"` and
/// blank input as "no filter".
pub fn selection(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
        None
    } else {
        Some(value.to_string())
    }
}

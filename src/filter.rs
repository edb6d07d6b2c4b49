//! Story filtering.
//!
//! Both entry points are pure: they read the full story collection and return
//! a freshly built subset, leaving the collection untouched.
//!
//! Date predicates compare `pubDate` strings lexically against `YYYY-MM-DD`,
//! which works because the producer writes zero-padded ISO-8601 timestamps.
//! The end bound is exclusive against the *following* day so every story on
//! the chosen end day is kept.

use crate::models::{FilterState, Story};
use chrono::NaiveDate;
use tracing::debug;

/// Maximum number of stories returned by [`todays_top`].
pub const TODAY_LIMIT: usize = 50;

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Apply every active predicate in `state` to `stories`.
///
/// Predicates are combined with logical AND; an unset field skips its
/// predicate entirely. Input order is preserved.
pub fn apply_filters(stories: &[Story], state: &FilterState) -> Vec<Story> {
    let start = state.start_date.map(|d| d.format(DAY_FORMAT).to_string());
    // An end date of NaiveDate::MAX has no successor; nothing can be later.
    let end = state
        .end_date
        .and_then(|d| d.succ_opt())
        .map(|d| d.format(DAY_FORMAT).to_string());

    let filtered: Vec<Story> = stories
        .iter()
        .filter(|story| {
            start
                .as_deref()
                .is_none_or(|start| story.pub_date.as_str() >= start)
        })
        .filter(|story| end.as_deref().is_none_or(|end| story.pub_date.as_str() < end))
        .filter(|story| {
            state
                .category
                .as_deref()
                .is_none_or(|c| story.category.as_deref() == Some(c))
        })
        .filter(|story| {
            state
                .district
                .as_deref()
                .is_none_or(|d| story.district.as_deref() == Some(d))
        })
        .cloned()
        .collect();

    debug!(
        total = stories.len(),
        kept = filtered.len(),
        ?start,
        ?end,
        category = ?state.category,
        district = ?state.district,
        "Applied filters"
    );
    filtered
}

/// Select up to [`TODAY_LIMIT`] stories published on `today`, in input order.
///
/// Matching is a prefix match on the date portion of `pubDate`, not a range
/// comparison. The filter state is not consulted.
pub fn todays_top(stories: &[Story], today: NaiveDate) -> Vec<Story> {
    let prefix = today.format(DAY_FORMAT).to_string();
    let selected: Vec<Story> = stories
        .iter()
        .filter(|story| story.pub_date.starts_with(&prefix))
        .take(TODAY_LIMIT)
        .cloned()
        .collect();
    debug!(%prefix, kept = selected.len(), "Selected today's stories");
    selected
}

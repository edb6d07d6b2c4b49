//! Rendering surfaces for the dashboard.
//!
//! The [`Dashboard`](crate::dashboard::Dashboard) never touches presentation
//! primitives. It builds [`Card`]s and hands them to a [`Renderer`]; adapters
//! decide how they look.
//!
//! # Submodules
//!
//! - [`html`]: Static HTML pages, one document per result page
//! - [`terminal`]: Plain-text cards for the command line and interactive session
//! - [`json`]: Writes the visible stories back out in the input schema

pub mod html;
pub mod json;
pub mod terminal;

use crate::models::Story;
use crate::utils::badge_class;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use std::fmt::Display;

/// Message shown in place of cards when the current page has no stories.
pub const EMPTY_MESSAGE: &str = "No news stories match the selected filters.";

/// Presentation surface driven by the dashboard.
///
/// Each call replaces what the corresponding container showed before.
pub trait Renderer {
    /// Show one card per story on the current page.
    fn render_cards(&mut self, cards: &[Card]);

    /// Show a single explanatory message instead of cards.
    fn render_empty(&mut self, message: &str);

    /// Show the page buttons. Implementations should hide controls when
    /// [`page_buttons`] returns nothing.
    fn render_pagination(&mut self, total_pages: usize, current_page: usize);

    /// Show a load failure in place of the story list.
    fn render_error(&mut self, message: &str);
}

/// Display-ready view of one story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub link: String,
    /// Localised publication date and time.
    pub published: String,
    pub source: String,
    /// District name, or the configured fallback label.
    pub district: String,
    pub badge_label: String,
    pub badge_class: String,
    /// Summary exactly as the producer wrote it.
    pub summary: String,
}

impl Card {
    /// Build a card, localising the publication date into `tz`.
    pub fn from_story<Tz>(story: &Story, district_fallback: &str, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let badge_label = story.category_label().to_string();
        Card {
            title: story.title.clone(),
            link: story.link.clone(),
            published: format_pub_date(&story.pub_date, tz),
            source: story.source.clone(),
            district: story
                .district
                .clone()
                .unwrap_or_else(|| district_fallback.to_string()),
            badge_class: badge_class(&badge_label),
            badge_label,
            summary: story.summary.clone(),
        }
    }

    /// Build a card in the viewer's local time zone.
    pub fn local(story: &Story, district_fallback: &str) -> Self {
        Self::from_story(story, district_fallback, &Local)
    }

    /// The metadata line: date, source and district.
    pub fn meta_line(&self) -> String {
        [&self.published, &self.source, &self.district]
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Render a `pubDate` for display in `tz`, e.g. `2 May 2024, 14:30`.
///
/// Timestamps with an offset are converted; naive timestamps and bare dates
/// are shown as written. Anything unparseable is returned unchanged.
pub fn format_pub_date<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    const DISPLAY: &str = "%-d %b %Y, %H:%M";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(tz).format(DISPLAY).to_string();
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return naive.format(DISPLAY).to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%-d %b %Y").to_string();
    }
    raw.to_string()
}

/// One pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    pub page: usize,
    pub active: bool,
}

/// Buttons for every page, marking `current_page` active.
///
/// Zero or one total pages yields no buttons at all.
pub fn page_buttons(total_pages: usize, current_page: usize) -> Vec<PageButton> {
    if total_pages <= 1 {
        return Vec::new();
    }
    (1..=total_pages)
        .map(|page| PageButton {
            page,
            active: page == current_page,
        })
        .collect()
}

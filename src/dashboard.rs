//! The dashboard controller.
//!
//! [`Dashboard`] is the single owner of mutable UI state: the filter choices,
//! the page size and current page, and the subset currently being paged
//! through. Every user action is a method taking `&mut self` plus the
//! [`Renderer`] to draw on, so there is exactly one writer.
//!
//! Actions fall into two groups:
//! - filter changes and [`Dashboard::reset`] re-run the filter, return to
//!   page 1, and render;
//! - [`Dashboard::go_to_page`] and [`Dashboard::set_items_per_page`] re-page
//!   the subset already selected and render, without filtering again.
//!
//! [`Dashboard::show_today`] swaps the subset for today's top stories without
//! reading or clearing the filter choices.

use crate::config::DEFAULT_DISTRICT_FALLBACK;
use crate::filter::{TODAY_LIMIT, apply_filters, todays_top};
use crate::loader::LOAD_ERROR_MESSAGE;
use crate::models::{ALL, FilterState, KNOWN_CATEGORIES, Story};
use crate::outputs::{Card, EMPTY_MESSAGE, Renderer};
use crate::paginate::{DEFAULT_ITEMS_PER_PAGE, Paginator};
use chrono::NaiveDate;
use itertools::Itertools;
use std::fmt::Display;
use std::num::NonZeroUsize;
use tracing::{debug, error, info};

/// Startup options for a [`Dashboard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSettings {
    /// Page size for the first render. Reset always returns to 50.
    pub items_per_page: NonZeroUsize,
    /// Label shown for stories without a district.
    pub district_fallback: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            district_fallback: DEFAULT_DISTRICT_FALLBACK.to_string(),
        }
    }
}

/// Which subset the dashboard is paging through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The result of the filter choices.
    Filtered,
    /// Today's top stories for the given day.
    Today(NaiveDate),
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    /// Full collection as loaded. Never modified.
    stories: Vec<Story>,
    selected: Vec<Story>,
    filter: FilterState,
    paginator: Paginator,
    view: View,
    districts: Vec<String>,
    district_fallback: String,
}

impl Dashboard {
    /// Build a dashboard over a loaded collection without rendering anything.
    ///
    /// District options are derived here, once. The selected subset starts as
    /// the whole collection.
    pub fn new(stories: Vec<Story>, settings: DashboardSettings) -> Self {
        let districts = stories
            .iter()
            .filter_map(|s| s.district.clone())
            .unique()
            .sorted()
            .collect::<Vec<_>>();
        info!(
            stories = stories.len(),
            districts = districts.len(),
            "Dashboard initialised"
        );

        let mut paginator = Paginator::default();
        paginator.set_items_per_page(settings.items_per_page);

        Dashboard {
            selected: stories.clone(),
            stories,
            filter: FilterState::default(),
            paginator,
            view: View::Filtered,
            districts,
            district_fallback: settings.district_fallback,
        }
    }

    /// Finish startup from the outcome of the data load.
    ///
    /// On success the dashboard is built and the first page rendered. On
    /// failure the error message is rendered instead and no dashboard exists,
    /// so nothing half-initialised is left behind.
    pub fn start<E, R>(
        loaded: Result<Vec<Story>, E>,
        settings: DashboardSettings,
        renderer: &mut R,
    ) -> Option<Self>
    where
        E: Display,
        R: Renderer + ?Sized,
    {
        match loaded {
            Ok(stories) => {
                let mut dashboard = Dashboard::new(stories, settings);
                dashboard.refilter(renderer);
                Some(dashboard)
            }
            Err(e) => {
                error!(error = %e, "Could not load stories");
                renderer.render_error(LOAD_ERROR_MESSAGE);
                None
            }
        }
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    /// The subset being paged through (filter result or today's top).
    pub fn selected(&self) -> &[Story] {
        &self.selected
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn items_per_page(&self) -> NonZeroUsize {
        self.paginator.items_per_page()
    }

    pub fn current_page(&self) -> usize {
        self.paginator.current_page()
    }

    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages(self.selected.len())
    }

    /// Stories on the current page.
    pub fn visible(&self) -> &[Story] {
        self.paginator.current(&self.selected)
    }

    /// Distinct non-empty districts in the data, sorted.
    pub fn districts(&self) -> &[String] {
        &self.districts
    }

    /// Options for the district selector: `"All"` followed by [`Self::districts`].
    pub fn district_options(&self) -> Vec<&str> {
        std::iter::once(ALL)
            .chain(self.districts.iter().map(String::as_str))
            .collect()
    }

    /// Options for the category selector: `"All"` followed by the known categories.
    pub fn category_options(&self) -> Vec<&'static str> {
        std::iter::once(ALL).chain(KNOWN_CATEGORIES).collect()
    }

    pub fn set_start_date<R: Renderer + ?Sized>(
        &mut self,
        date: Option<NaiveDate>,
        renderer: &mut R,
    ) {
        self.filter.start_date = date;
        self.refilter(renderer);
    }

    pub fn set_end_date<R: Renderer + ?Sized>(
        &mut self,
        date: Option<NaiveDate>,
        renderer: &mut R,
    ) {
        self.filter.end_date = date;
        self.refilter(renderer);
    }

    /// `None` is the "All" choice.
    pub fn set_category<R: Renderer + ?Sized>(
        &mut self,
        category: Option<String>,
        renderer: &mut R,
    ) {
        self.filter.category = category;
        self.refilter(renderer);
    }

    /// `None` is the "All" choice.
    pub fn set_district<R: Renderer + ?Sized>(
        &mut self,
        district: Option<String>,
        renderer: &mut R,
    ) {
        self.filter.district = district;
        self.refilter(renderer);
    }

    /// Replace every filter choice at once and re-run the filter.
    pub fn set_filter<R: Renderer + ?Sized>(&mut self, filter: FilterState, renderer: &mut R) {
        self.filter = filter;
        self.refilter(renderer);
    }

    /// Change the page size and show page 1 of the current subset.
    pub fn set_items_per_page<R: Renderer + ?Sized>(
        &mut self,
        per_page: NonZeroUsize,
        renderer: &mut R,
    ) {
        self.paginator.set_items_per_page(per_page);
        debug!(per_page = per_page.get(), "Changed page size");
        self.render_page(renderer);
    }

    /// Show another page of the current subset. Does not filter again.
    pub fn go_to_page<R: Renderer + ?Sized>(&mut self, page: usize, renderer: &mut R) {
        self.paginator.go_to(page);
        debug!(page = self.paginator.current_page(), "Changed page");
        self.render_page(renderer);
    }

    /// Show up to 50 stories published on `today`, 50 per page.
    ///
    /// Filter choices are left exactly as they were.
    pub fn show_today<R: Renderer + ?Sized>(&mut self, today: NaiveDate, renderer: &mut R) {
        self.selected = todays_top(&self.stories, today);
        self.view = View::Today(today);
        self.paginator.set_items_per_page(DEFAULT_ITEMS_PER_PAGE);
        info!(%today, count = self.selected.len(), "Showing today's top stories");
        self.render_page(renderer);
    }

    /// Clear every filter, restore the default page size and show page 1 of
    /// the whole collection.
    pub fn reset<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        self.filter = FilterState::default();
        self.paginator.set_items_per_page(DEFAULT_ITEMS_PER_PAGE);
        info!("Reset filters");
        self.refilter(renderer);
    }

    /// Re-run the filter over the full collection and show page 1.
    pub fn refilter<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        self.selected = apply_filters(&self.stories, &self.filter);
        self.view = View::Filtered;
        self.paginator.first_page();
        self.render_page(renderer);
    }

    /// Cards for the current page.
    pub fn cards(&self) -> Vec<Card> {
        self.visible()
            .iter()
            .map(|story| Card::local(story, &self.district_fallback))
            .collect()
    }

    /// Draw the current page and its pagination controls.
    pub fn render_page<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let cards = self.cards();
        if cards.is_empty() {
            renderer.render_empty(EMPTY_MESSAGE);
        } else {
            renderer.render_cards(&cards);
        }
        renderer.render_pagination(self.total_pages(), self.current_page());
    }

    /// One-line description of what is on screen.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        match self.view {
            View::Today(day) => parts.push(format!("Today's top {TODAY_LIMIT} ({day})")),
            View::Filtered => {
                if let Some(d) = self.filter.start_date {
                    parts.push(format!("from {d}"));
                }
                if let Some(d) = self.filter.end_date {
                    parts.push(format!("to {d}"));
                }
                if let Some(c) = &self.filter.category {
                    parts.push(format!("category {c}"));
                }
                if let Some(d) = &self.filter.district {
                    parts.push(format!("district {d}"));
                }
                if parts.is_empty() {
                    parts.push("All stories".to_string());
                }
            }
        }
        let noun = if self.selected.len() == 1 { "story" } else { "stories" };
        parts.push(format!("{} {noun}", self.selected.len()));
        parts.push(format!(
            "page {}/{}",
            self.current_page(),
            self.total_pages().max(1)
        ));
        parts.join(" · ")
    }
}

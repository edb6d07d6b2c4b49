//! Command-line interface definitions for the news dashboard.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The data source and config file can also be provided via environment
//! variables. Flags override anything set in the config file.

use crate::config::SummaryMarkup;
use crate::models::{FilterState, selection};
use chrono::NaiveDate;
use clap::Parser;
use std::num::NonZeroUsize;

/// Command-line arguments for the news dashboard.
///
/// # Examples
///
/// ```sh
/// # First page of everything in data/news.json
/// up_news_dashboard
///
/// # Governance stories from Lucknow in the first week of May, 25 per page
/// up_news_dashboard --from 2024-05-01 --to 2024-05-07 \
///     --category "Governance issues" --district Lucknow -n 25
///
/// # Today's top 50 as a static site
/// up_news_dashboard --today --html-output-dir ./site
///
/// # Browse interactively
/// up_news_dashboard -i --data https://example.org/data/news.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path or HTTP(S) URL of the stories document [default: data/news.json]
    #[arg(short, long, env = "NEWS_DATA_SOURCE")]
    pub data: Option<String>,

    /// Optional path to config.yaml file
    #[arg(short, long, env = "NEWS_DASHBOARD_CONFIG")]
    pub config: Option<String>,

    /// Only stories published on or after this day (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Only stories published on or before this day (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Only stories in this category ("All" for every category)
    #[arg(long)]
    pub category: Option<String>,

    /// Only stories from this district ("All" for every district)
    #[arg(long)]
    pub district: Option<String>,

    /// Stories per page [default: 50]
    #[arg(short = 'n', long)]
    pub per_page: Option<NonZeroUsize>,

    /// Page to show
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Show today's top 50 stories instead of applying filters
    #[arg(long)]
    pub today: bool,

    /// How summary markup is written to HTML output
    #[arg(long, value_enum)]
    pub summary_markup: Option<SummaryMarkup>,

    /// Write every result page as static HTML into this directory
    #[arg(long)]
    pub html_output_dir: Option<String>,

    /// Write the stories on the shown page to this JSON file
    #[arg(long)]
    pub json_output: Option<String>,

    /// Browse interactively, reading commands from stdin
    #[arg(short, long)]
    pub interactive: bool,
}

impl Cli {
    /// Filter choices given on the command line.
    pub fn filter_state(&self) -> FilterState {
        FilterState {
            start_date: self.from,
            end_date: self.to,
            category: self.category.as_deref().and_then(selection),
            district: self.district.as_deref().and_then(selection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["up_news_dashboard"]);
        assert_eq!(cli.page, 1);
        assert!(!cli.today);
        assert!(!cli.interactive);
        assert!(cli.per_page.is_none());
        assert!(cli.filter_state().is_empty());
    }

    #[test]
    fn test_cli_filters() {
        let cli = Cli::parse_from([
            "up_news_dashboard",
            "--from",
            "2024-05-01",
            "--to",
            "2024-05-07",
            "--category",
            "Governance issues",
            "--district",
            "All",
            "-n",
            "25",
            "-p",
            "2",
        ]);

        let state = cli.filter_state();
        assert_eq!(state.start_date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(state.end_date, NaiveDate::from_ymd_opt(2024, 5, 7));
        assert_eq!(state.category.as_deref(), Some("Governance issues"));
        assert_eq!(state.district, None);
        assert_eq!(cli.per_page.map(NonZeroUsize::get), Some(25));
        assert_eq!(cli.page, 2);
    }

    #[test]
    fn test_cli_outputs_and_markup() {
        let cli = Cli::parse_from([
            "up_news_dashboard",
            "--today",
            "--summary-markup",
            "strip",
            "--html-output-dir",
            "./site",
            "--json-output",
            "./out/page.json",
        ]);
        assert!(cli.today);
        assert_eq!(cli.summary_markup, Some(SummaryMarkup::Strip));
        assert_eq!(cli.html_output_dir.as_deref(), Some("./site"));
        assert_eq!(cli.json_output.as_deref(), Some("./out/page.json"));
    }

    #[test]
    fn test_cli_rejects_bad_values() {
        assert!(Cli::try_parse_from(["up_news_dashboard", "--from", "05/01/2024"]).is_err());
        assert!(Cli::try_parse_from(["up_news_dashboard", "-n", "0"]).is_err());
    }
}

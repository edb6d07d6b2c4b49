//! Optional YAML configuration file.
//!
//! Holds defaults that would otherwise have to be repeated on every
//! invocation. Command-line flags always win over values read here.
//!
//! ```yaml
//! data_source: https://example.org/data/news.json
//! items_per_page: 25
//! summary_markup: strip
//! district_fallback: Uttar Pradesh
//! ```

use crate::paginate::DEFAULT_ITEMS_PER_PAGE;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::num::NonZeroUsize;
use tokio::fs;
use tracing::{info, instrument};

/// Relative path the producer writes its document to.
pub const DEFAULT_DATA_SOURCE: &str = "data/news.json";

/// Label shown in place of a missing district.
pub const DEFAULT_DISTRICT_FALLBACK: &str = "Unknown district";

/// How summary markup from the producer is treated in HTML output.
///
/// The producer's summaries may contain raw tags. `Trusted` inserts them as
/// is, which is only safe while the producer is under the operator's control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMarkup {
    /// Insert summary markup verbatim.
    #[default]
    Trusted,
    /// Escape the summary so tags show as text.
    Escaped,
    /// Drop tags and keep only the text.
    Strip,
}

/// Dashboard defaults loaded from `config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Path or HTTP(S) URL of the stories document.
    pub data_source: String,
    /// Initial page size.
    pub items_per_page: NonZeroUsize,
    /// Treatment of summary markup in HTML output.
    pub summary_markup: SummaryMarkup,
    /// Label for stories without a district.
    pub district_fallback: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            summary_markup: SummaryMarkup::default(),
            district_fallback: DEFAULT_DISTRICT_FALLBACK.to_string(),
        }
    }
}

/// Load configuration from a YAML file.
///
/// Missing keys fall back to [`DashboardConfig::default`].
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid YAML for
/// this schema (for example `items_per_page: 0`).
#[instrument(level = "info")]
pub async fn load_config(path: &str) -> Result<DashboardConfig, Box<dyn Error>> {
    let raw = fs::read_to_string(path).await?;
    let config: DashboardConfig = serde_yaml::from_str(&raw)?;
    info!(
        data_source = %config.data_source,
        items_per_page = %config.items_per_page,
        summary_markup = ?config.summary_markup,
        "Loaded configuration"
    );
    Ok(config)
}

//! Loading the aggregated stories document.
//!
//! The document is a JSON array of [`Story`] records written by the upstream
//! feed aggregator. It is read exactly once per session from either a local
//! path or an HTTP(S) URL. Any failure is terminal: the caller shows
//! [`LOAD_ERROR_MESSAGE`] and stops, with no retry.

use crate::models::Story;
use crate::utils::{looks_truncated, truncate_for_log};
use reqwest::Client;
use std::error::Error;
use std::fmt;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};
use url::Url;

/// Message shown in place of the story list when the document cannot be loaded.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load news stories. Please reload to try again.";

/// Where the stories document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// A file on disk, usually the relative `data/news.json`.
    Path(PathBuf),
    /// A document served over HTTP(S).
    Url(Url),
}

impl DataSource {
    /// Interpret `s` as an HTTP(S) URL when it parses as one, otherwise as a path.
    pub fn parse(s: &str) -> Self {
        match Url::parse(s) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => DataSource::Url(url),
            _ => DataSource::Path(PathBuf::from(s)),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Path(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Fetch and decode the stories document.
///
/// # Errors
///
/// Returns an error on I/O or network failure, on a non-success HTTP status,
/// or when the body is not a JSON array of stories.
pub async fn load_stories(source: &DataSource) -> Result<Vec<Story>, Box<dyn Error>> {
    load_stories_with(&Client::new(), source).await
}

/// [`load_stories`] using a caller-supplied HTTP client.
#[instrument(level = "info", skip_all, fields(source = %source))]
pub async fn load_stories_with(
    client: &Client,
    source: &DataSource,
) -> Result<Vec<Story>, Box<dyn Error>> {
    let body = match source {
        DataSource::Path(path) => fs::read_to_string(path).await?,
        DataSource::Url(url) => {
            client
                .get(url.clone())
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?
        }
    };
    info!(bytes = body.len(), "Fetched stories document");
    parse_stories(&body)
}

/// Decode a stories document, preserving document order.
pub fn parse_stories(body: &str) -> Result<Vec<Story>, Box<dyn Error>> {
    match serde_json::from_str::<Vec<Story>>(body) {
        Ok(stories) => {
            info!(count = stories.len(), "Parsed stories");
            Ok(stories)
        }
        Err(e) => {
            if looks_truncated(&e) {
                error!(error = %e, "Stories document ends early; producer may still be writing it");
            } else {
                error!(
                    error = %e,
                    body_preview = %truncate_for_log(body, 300),
                    "Stories document is not valid JSON"
                );
            }
            Err(Box::new(e))
        }
    }
}

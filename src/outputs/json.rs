//! JSON output of the visible stories.
//!
//! Writes the stories on the current page back out in the same schema the
//! dashboard reads, so the file can itself be loaded as a data source.

use crate::models::Story;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write `stories` as a pretty-printed JSON array to `path`.
///
/// Parent directories are created as needed.
#[instrument(level = "info", skip_all, fields(%path))]
pub async fn write_stories(stories: &[Story], path: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(stories)?;

    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent).await {
            error!(dir = %parent.display(), error = %e, "Failed to create JSON dir");
            return Err(e.into());
        }
    }

    fs::write(path, json).await?;
    info!(count = stories.len(), "Wrote JSON stories");
    Ok(())
}

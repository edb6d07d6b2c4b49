//! Utility functions for string handling, markup and file system checks.
//!
//! This module provides helper functions used throughout the application:
//! - Badge class derivation for category tags
//! - HTML escaping and markup stripping for summaries
//! - String truncation for logging
//! - JSON error detection for truncated data documents
//! - File system validation for output directories

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument, warn};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Derive the CSS-like badge class for a category name.
///
/// The category is lower-cased, trimmed, and every run of whitespace becomes
/// a single hyphen.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(badge_class("NDA Activity"), "nda-activity");
/// assert_eq!(badge_class("Governance  issues"), "governance-issues");
/// ```
pub fn badge_class(category: &str) -> String {
    WHITESPACE_RUN
        .replace_all(category.trim(), "-")
        .to_lowercase()
}

/// Escape text for safe inclusion in HTML element content or a quoted attribute.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Remove markup from a fragment, returning its text with whitespace normalized.
///
/// Entities are decoded by the parser, so the result is plain text that must
/// be escaped again before it goes back into HTML.
pub fn strip_markup(fragment: &str) -> String {
    let document = Html::parse_fragment(fragment);
    let text: String = document.root_element().text().collect();
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (backing off to a character
/// boundary) with an ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Detect if a serde_json error indicates truncated/incomplete JSON.
///
/// A data document cut off mid-write by the producer fails with an EOF error;
/// the loader logs this case separately from other malformed input.
pub fn looks_truncated(e: &serde_json::Error) -> bool {
    use serde_json::error::Category;
    matches!(e.classify(), Category::Eof)
}

/// Ensure a directory exists and is writable.
///
/// This function creates the directory if it doesn't exist, then performs
/// a write test by creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    stdfs::File::create(&probe_path)?;
    if let Err(e) = stdfs::remove_file(&probe_path) {
        warn!(%probe_path, error = %e, "Could not remove write probe file");
    }
    info!("Output directory is writable");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_class() {
        assert_eq!(badge_class("NDA Activity"), "nda-activity");
        assert_eq!(badge_class("Governance issues"), "governance-issues");
        assert_eq!(badge_class("Opposition   Activity"), "opposition-activity");
        assert_eq!(badge_class(" Judicial\tcases "), "judicial-cases");
        assert_eq!(badge_class("Uncategorised"), "uncategorised");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(html_escape("योगी"), "योगी");
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(
            strip_markup("<p>Relief <b>camps</b></p>\n<p>were inspected</p>"),
            "Relief camps were inspected"
        );
        assert_eq!(strip_markup("plain &amp; simple"), "plain & simple");
        assert_eq!(strip_markup(""), "");
    }

    #[test]
    fn test_strip_markup_keeps_words_whole() {
        assert_eq!(strip_markup("fo<b>o</b>bar"), "foobar");
        assert_eq!(
            strip_markup("<p>Flood <em>re</em>lief in <a href=\"#\">Gorakhpur</a>.</p>"),
            "Flood relief in Gorakhpur."
        );
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_char_boundary() {
        let s = "सरकार".repeat(10);
        let result = truncate_for_log(&s, 4);
        assert!(result.starts_with("स"));
    }

    #[test]
    fn test_looks_truncated() {
        let json_eof = r#"[{"title": "value"#;
        let err = serde_json::from_str::<serde_json::Value>(json_eof).unwrap_err();
        assert!(looks_truncated(&err));

        let json_bad = r#"[{"title": }]"#;
        let err = serde_json::from_str::<serde_json::Value>(json_bad).unwrap_err();
        assert!(!looks_truncated(&err));
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_nested() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("site/pages");
        let nested = nested.to_str().unwrap();
        ensure_writable_dir(nested).await.unwrap();
        assert!(std::path::Path::new(nested).is_dir());
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_cleans_up() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_str().unwrap();
        ensure_writable_dir(dir).await.unwrap();
        ensure_writable_dir(&format!("{dir}/")).await.unwrap();
        let leftovers = std::fs::read_dir(tmp.path()).unwrap().count();
        assert_eq!(leftovers, 0);
    }
}

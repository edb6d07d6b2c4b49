//! Static HTML output.
//!
//! Each result page becomes its own document, so the pagination buttons are
//! plain links between sibling files:
//!
//! ```text
//! html_output_dir/
//! ├── page-1.html
//! ├── page-2.html
//! └── page-3.html
//! ```
//!
//! Titles, sources, districts and URLs are always escaped. The summary is
//! handled according to [`SummaryMarkup`]; the default inserts it verbatim,
//! which trusts the producer of the stories document.

use super::{Card, Renderer, page_buttons};
use crate::config::SummaryMarkup;
use crate::dashboard::Dashboard;
use crate::utils::{ensure_writable_dir, html_escape, strip_markup};
use std::error::Error;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

const PAGE_TITLE: &str = "Uttar Pradesh News Dashboard";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0 auto; max-width: 960px; padding: 16px; background: #f5f5f5; color: #222; }
header p { color: #555; }
.story-card { background: #fff; border-radius: 8px; padding: 16px; margin-bottom: 12px; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
.story-card h3 { margin: 0 0 6px; }
.story-card h3 a { color: #1a1a1a; text-decoration: none; }
.meta { font-size: 13px; color: #666; margin: 0 0 8px; }
.badge { display: inline-block; font-size: 12px; font-weight: 600; padding: 2px 8px; border-radius: 10px; color: #fff; background: #777; }
.badge-opposition-activity { background: #c62828; }
.badge-nda-activity { background: #ef6c00; }
.badge-governance-issues { background: #1565c0; }
.badge-judicial-cases { background: #6a1b9a; }
.badge-uncategorised { background: #757575; }
.read-more { font-size: 13px; }
.empty, .error { text-align: center; padding: 40px; color: #888; }
.error { color: #c62828; }
#pagination a { display: inline-block; margin: 2px; padding: 4px 10px; border: 1px solid #ccc; border-radius: 4px; text-decoration: none; color: #1565c0; background: #fff; }
#pagination a.active { background: #1565c0; color: #fff; border-color: #1565c0; }
"#;

/// File name of a result page, relative to the output directory.
pub fn page_file_name(page: usize) -> String {
    format!("page-{page}.html")
}

/// Renders into two HTML fragments that [`HtmlRenderer::document`] wraps in a page.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    markup: SummaryMarkup,
    cards_html: String,
    pagination_html: String,
}

impl HtmlRenderer {
    pub fn new(markup: SummaryMarkup) -> Self {
        Self {
            markup,
            cards_html: String::new(),
            pagination_html: String::new(),
        }
    }

    /// Current contents of the story container.
    pub fn cards_html(&self) -> &str {
        &self.cards_html
    }

    /// Current contents of the pagination container.
    pub fn pagination_html(&self) -> &str {
        &self.pagination_html
    }

    fn summary_html(&self, summary: &str) -> String {
        match self.markup {
            SummaryMarkup::Trusted => summary.to_string(),
            SummaryMarkup::Escaped => html_escape(summary),
            SummaryMarkup::Strip => html_escape(&strip_markup(summary)),
        }
    }

    fn card_html(&self, card: &Card) -> String {
        let link = html_escape(&card.link);
        format!(
            r#"<article class="story-card">
  <h3><a href="{link}" target="_blank" rel="noopener noreferrer">{title}</a></h3>
  <p class="meta">{meta}</p>
  <span class="badge badge-{class}">{label}</span>
  <div class="summary">{summary}</div>
  <a class="read-more" href="{link}" target="_blank" rel="noopener noreferrer">Read more</a>
</article>
"#,
            title = html_escape(&card.title),
            meta = html_escape(&card.meta_line()),
            class = html_escape(&card.badge_class),
            label = html_escape(&card.badge_label),
            summary = self.summary_html(&card.summary),
        )
    }

    /// A complete HTML document showing the current containers under `heading`.
    pub fn document(&self, heading: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{PAGE_TITLE}</title>
<style>{STYLE}</style>
</head>
<body>
<header>
<h1>{PAGE_TITLE}</h1>
<p>{heading}</p>
</header>
<section id="news-container">
{cards}</section>
<nav id="pagination">{pagination}</nav>
</body>
</html>
"#,
            heading = html_escape(heading),
            cards = self.cards_html,
            pagination = self.pagination_html,
        )
    }
}

impl Renderer for HtmlRenderer {
    fn render_cards(&mut self, cards: &[Card]) {
        self.cards_html = cards.iter().map(|card| self.card_html(card)).collect();
    }

    fn render_empty(&mut self, message: &str) {
        self.cards_html = format!("<p class=\"empty\">{}</p>\n", html_escape(message));
    }

    fn render_pagination(&mut self, total_pages: usize, current_page: usize) {
        let mut html = String::new();
        for button in page_buttons(total_pages, current_page) {
            let class = if button.active { " class=\"active\"" } else { "" };
            write!(
                html,
                "<a href=\"{}\"{}>{}</a>",
                page_file_name(button.page),
                class,
                button.page
            )
            .unwrap();
        }
        self.pagination_html = html;
    }

    fn render_error(&mut self, message: &str) {
        self.cards_html = format!("<p class=\"error\">{}</p>\n", html_escape(message));
        self.pagination_html.clear();
    }
}

/// Write one document per result page of the dashboard's current subset.
///
/// At least `page-1.html` is always written, showing the empty-state message
/// when nothing matched. The dashboard is returned to the page it was on.
///
/// # Returns
///
/// Paths of the files written, in page order.
#[instrument(level = "info", skip_all, fields(%html_output_dir))]
pub async fn write_site(
    dashboard: &mut Dashboard,
    markup: SummaryMarkup,
    html_output_dir: &str,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    ensure_writable_dir(html_output_dir).await?;

    let original_page = dashboard.current_page();
    let total = dashboard.total_pages().max(1);
    let mut written = Vec::with_capacity(total);

    let mut outcome = Ok(());
    for page in 1..=total {
        let mut renderer = HtmlRenderer::new(markup);
        dashboard.go_to_page(page, &mut renderer);
        let path = Path::new(html_output_dir).join(page_file_name(page));
        if let Err(e) = fs::write(&path, renderer.document(&dashboard.describe())).await {
            outcome = Err(e);
            break;
        }
        written.push(path);
    }

    dashboard.go_to_page(original_page, &mut HtmlRenderer::new(markup));
    outcome?;
    info!(pages = written.len(), "Wrote HTML pages");
    Ok(written)
}

/// Write `page-1.html` carrying only a load failure message.
#[instrument(level = "info", skip_all, fields(%html_output_dir))]
pub async fn write_error_page(
    html_output_dir: &str,
    message: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    ensure_writable_dir(html_output_dir).await?;
    let mut renderer = HtmlRenderer::new(SummaryMarkup::Escaped);
    renderer.render_error(message);
    let path = Path::new(html_output_dir).join(page_file_name(1));
    fs::write(&path, renderer.document("News could not be loaded")).await?;
    info!(path = %path.display(), "Wrote HTML error page");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::DashboardSettings;
    use crate::models::Story;

    fn card(summary: &str) -> Card {
        Card {
            title: "Court grants <bail>".to_string(),
            link: "https://example.com/a?b=1&c=2".to_string(),
            published: "2 May 2024, 09:00".to_string(),
            source: "Amarujala".to_string(),
            district: "Lucknow".to_string(),
            badge_label: "Judicial cases".to_string(),
            badge_class: "judicial-cases".to_string(),
            summary: summary.to_string(),
        }
    }

    fn stories(n: usize) -> Vec<Story> {
        (0..n)
            .map(|i| Story {
                title: format!("story-{i}"),
                link: format!("https://example.com/{i}"),
                pub_date: "2024-05-02T09:00:00+00:00".to_string(),
                source: "Amarujala".to_string(),
                district: Some("Agra".to_string()),
                category: Some("NDA Activity".to_string()),
                summary: "<em>s</em>".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_card_markup() {
        let mut renderer = HtmlRenderer::new(SummaryMarkup::Trusted);
        renderer.render_cards(&[card("<p>Bail <b>granted</b></p>")]);
        let html = renderer.cards_html();
        assert!(html.contains(r#"target="_blank" rel="noopener noreferrer""#));
        assert!(html.contains(r#"href="https://example.com/a?b=1&amp;c=2""#));
        assert!(html.contains("Court grants &lt;bail&gt;"));
        assert!(html.contains(r#"<span class="badge badge-judicial-cases">Judicial cases</span>"#));
        assert!(html.contains("2 May 2024, 09:00 | Amarujala | Lucknow"));
        assert!(html.contains("<p>Bail <b>granted</b></p>"));
        assert!(html.contains("Read more"));
    }

    #[test]
    fn test_summary_policies() {
        let summary = "<p>Bail <script>x</script></p>";

        let mut escaped = HtmlRenderer::new(SummaryMarkup::Escaped);
        escaped.render_cards(&[card(summary)]);
        assert!(escaped.cards_html().contains("&lt;script&gt;"));
        assert!(!escaped.cards_html().contains("<script>"));

        let mut stripped = HtmlRenderer::new(SummaryMarkup::Strip);
        stripped.render_cards(&[card(summary)]);
        assert!(!stripped.cards_html().contains("<script>"));
        assert!(stripped.cards_html().contains("<div class=\"summary\">Bail"));
    }

    #[test]
    fn test_pagination_links() {
        let mut renderer = HtmlRenderer::new(SummaryMarkup::Trusted);
        renderer.render_pagination(3, 2);
        assert_eq!(
            renderer.pagination_html(),
            r#"<a href="page-1.html">1</a><a href="page-2.html" class="active">2</a><a href="page-3.html">3</a>"#
        );
        renderer.render_pagination(1, 1);
        assert_eq!(renderer.pagination_html(), "");
    }

    #[test]
    fn test_empty_and_error_replace_cards() {
        let mut renderer = HtmlRenderer::new(SummaryMarkup::Trusted);
        renderer.render_cards(&[card("s")]);
        renderer.render_empty("Nothing here");
        assert_eq!(renderer.cards_html(), "<p class=\"empty\">Nothing here</p>\n");

        renderer.render_pagination(2, 1);
        renderer.render_error("Failed");
        assert_eq!(renderer.cards_html(), "<p class=\"error\">Failed</p>\n");
        assert_eq!(renderer.pagination_html(), "");
        assert!(renderer.document("x").contains("<p class=\"error\">Failed</p>"));
    }

    #[tokio::test]
    async fn test_write_site_one_file_per_page() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_str().unwrap();
        let mut scratch = HtmlRenderer::new(SummaryMarkup::Trusted);
        let mut dashboard = Dashboard::start(
            Ok::<_, String>(stories(120)),
            DashboardSettings::default(),
            &mut scratch,
        )
        .unwrap();
        dashboard.go_to_page(2, &mut scratch);

        let written = write_site(&mut dashboard, SummaryMarkup::Trusted, dir).await.unwrap();
        assert_eq!(written.len(), 3);
        assert_eq!(dashboard.current_page(), 2);

        let last = std::fs::read_to_string(tmp.path().join("page-3.html")).unwrap();
        assert_eq!(last.matches("<article class=\"story-card\">").count(), 20);
        assert!(last.contains(r#"<a href="page-3.html" class="active">3</a>"#));
        assert!(last.contains("page 3/3"));
    }

    #[tokio::test]
    async fn test_write_site_with_no_results() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_str().unwrap();
        let mut scratch = HtmlRenderer::new(SummaryMarkup::Trusted);
        let mut dashboard = Dashboard::start(
            Ok::<_, String>(Vec::new()),
            DashboardSettings::default(),
            &mut scratch,
        )
        .unwrap();

        let written = write_site(&mut dashboard, SummaryMarkup::Trusted, dir).await.unwrap();
        assert_eq!(written.len(), 1);
        let page = std::fs::read_to_string(&written[0]).unwrap();
        assert!(page.contains(crate::outputs::EMPTY_MESSAGE));
    }

    #[tokio::test]
    async fn test_write_site_failure_restores_page() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_str().unwrap();
        std::fs::create_dir(tmp.path().join("page-2.html")).unwrap();
        let mut scratch = HtmlRenderer::new(SummaryMarkup::Trusted);
        let mut dashboard = Dashboard::start(
            Ok::<_, String>(stories(120)),
            DashboardSettings::default(),
            &mut scratch,
        )
        .unwrap();
        dashboard.go_to_page(3, &mut scratch);

        let result = write_site(&mut dashboard, SummaryMarkup::Trusted, dir).await;
        assert!(result.is_err());
        assert_eq!(dashboard.current_page(), 3);
        assert!(tmp.path().join("page-1.html").is_file());
    }

    #[tokio::test]
    async fn test_write_error_page() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_error_page(tmp.path().to_str().unwrap(), "Failed to load")
            .await
            .unwrap();
        let page = std::fs::read_to_string(path).unwrap();
        assert!(page.contains("<p class=\"error\">Failed to load</p>"));
    }
}

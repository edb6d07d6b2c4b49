//! # UP News Dashboard
//!
//! Browse the aggregated Uttar Pradesh news feed: filter stories by date
//! range, category and district, and page through the result in the
//! terminal, an interactive session, or a static HTML site.
//!
//! ## Usage
//!
//! ```sh
//! up_news_dashboard --district Lucknow --category "Governance issues"
//! up_news_dashboard --today --html-output-dir ./site
//! up_news_dashboard -i
//! ```
//!
//! ## Architecture
//!
//! The stories document is produced elsewhere (feeds are fetched, summarised
//! and classified upstream) and loaded once. After that:
//! 1. **Filter**: derive the subset matching the reader's choices
//! 2. **Paginate**: slice the subset into pages
//! 3. **Render**: turn the current page into cards on a [`outputs::Renderer`]
//!
//! Command-line flags are applied as the reader's first actions; the
//! interactive session then handles one command at a time.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod dashboard;
mod filter;
mod loader;
mod models;
mod outputs;
mod paginate;
mod session;
mod utils;

use cli::Cli;
use config::{DashboardConfig, load_config};
use dashboard::{Dashboard, DashboardSettings};
use loader::{DataSource, LOAD_ERROR_MESSAGE, load_stories};
use outputs::terminal::TerminalRenderer;
use outputs::{html, json};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("up_news_dashboard starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = match &args.config {
        Some(path) => load_config(path).await?,
        None => DashboardConfig::default(),
    };
    let data_source = args.data.as_deref().unwrap_or(&config.data_source);
    let summary_markup = args.summary_markup.unwrap_or(config.summary_markup);
    let settings = DashboardSettings {
        items_per_page: config.items_per_page,
        district_fallback: config.district_fallback.clone(),
    };

    // ---- Load stories (once, no retry) ----
    let source = DataSource::parse(data_source);
    let loaded = load_stories(&source).await;

    let mut renderer = TerminalRenderer::new();
    let Some(mut dashboard) = Dashboard::start(loaded, settings, &mut renderer) else {
        print!("{}", renderer.screen());
        if let Some(dir) = &args.html_output_dir {
            if let Err(e) = html::write_error_page(dir, LOAD_ERROR_MESSAGE).await {
                error!(error = %e, "Failed to write HTML error page");
            }
        }
        // The message is already on screen; exit without a second copy on stderr.
        std::process::exit(1);
    };

    // ---- Flags act as the first interactions ----
    let cli_filter = args.filter_state();
    if !cli_filter.is_empty() {
        dashboard.set_filter(cli_filter, &mut renderer);
    }
    if args.today {
        dashboard.show_today(Local::now().date_naive(), &mut renderer);
    }
    if let Some(per_page) = args.per_page {
        dashboard.set_items_per_page(per_page, &mut renderer);
    }
    if args.page > 1 {
        dashboard.go_to_page(args.page, &mut renderer);
    }

    if args.interactive {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();
        session::run(&mut dashboard, &mut renderer, stdin, &mut stdout, || {
            Local::now().date_naive()
        })
        .await?;
    } else {
        print!("{}", renderer.screen());
        println!("-- {}", dashboard.describe());
    }

    // ---- Outputs ----
    if let Some(path) = &args.json_output {
        if let Err(e) = json::write_stories(dashboard.visible(), path).await {
            error!(%path, error = %e, "Failed to write JSON output");
        }
    }

    if let Some(dir) = &args.html_output_dir {
        match html::write_site(&mut dashboard, summary_markup, dir).await {
            Ok(pages) => info!(%dir, pages = pages.len(), "Wrote HTML site"),
            Err(e) => error!(%dir, error = %e, "Failed to write HTML site"),
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

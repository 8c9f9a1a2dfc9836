//! # Kosmonautix Scrapper
//!
//! A one-shot batch scraper that downloads news articles from
//! [kosmonautix.cz](https://kosmonautix.cz), extracts their title, author,
//! date and body paragraphs, and dumps them into a JSON file.
//!
//! ## Usage
//!
//! ```sh
//! kosmonautix_scrapper ARTICLE_COUNT OUTPUT_PATH SLEEP
//! ```
//!
//! ## Architecture
//!
//! The run is fully sequential:
//! 1. **Indexing**: walk listing pages until enough article URLs are found
//! 2. **Fetching**: download and parse each article, one after another
//! 3. **Output**: write the articles as a pretty-printed JSON array
//!
//! A fixed politeness delay (`SLEEP` seconds) follows every request.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use kosmonautix_scrapper::cli::Cli;
use kosmonautix_scrapper::outputs::json;
use kosmonautix_scrapper::scrapper::Scrapper;
use kosmonautix_scrapper::utils::ensure_writable_parent;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    // Parse CLI; clap prints usage/errors and exits on its own
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");
    info!(
        article_count = args.article_count,
        output = %args.output_path.display(),
        sleep_secs = args.sleep,
        "kosmonautix_scrapper starting up"
    );

    // Early check: fail on an unusable output path before any network traffic
    if let Err(e) = ensure_writable_parent(&args.output_path).await {
        error!(
            path = %args.output_path.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e.into());
    }

    // ---- Scrape ----
    let mut scrapper = Scrapper::new(args.scrapper_config())?;
    let articles = match scrapper.run().await {
        Ok(articles) => articles,
        Err(e) => {
            error!(error = %e, "Scraping failed; no output written");
            return Err(e.into());
        }
    };

    // ---- Output ----
    json::write_articles(articles, &args.output_path).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        articles = articles.len(),
        path = %args.output_path.display(),
        "Execution complete"
    );
    Ok(())
}

//! Command-line interface definitions.
//!
//! Three positional arguments are required; everything else has a default.
//! The listing URL can also come from the environment.

use crate::scrapers::kosmonautix::LISTING_URL_PREFIX;
use crate::scrapper::ScrapperConfig;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Scrape ARTICLE_COUNT articles from kosmonautix.cz and store them in OUTPUT_PATH.
///
/// # Examples
///
/// ```sh
/// # Ten newest articles, one second between requests
/// kosmonautix_scrapper 10 ./articles.json 1
///
/// # Older articles, starting at listing page 20
/// kosmonautix_scrapper 50 ./older.json 2 --start-page 20
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Number of articles to scrape
    pub article_count: usize,

    /// Path of the JSON file to write
    #[arg(value_parser = parse_output_path)]
    pub output_path: PathBuf,

    /// Seconds to sleep between each request
    pub sleep: u64,

    /// Listing page to start from
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub start_page: u32,

    /// Listing URL prefix; pages are fetched from `{prefix}/{page}`
    #[arg(long, env = "KOSMONAUTIX_LISTING_URL", default_value = LISTING_URL_PREFIX)]
    pub listing_url: String,

    /// Stop after this many consecutive listing pages without links (0 = never)
    #[arg(long, default_value_t = 5)]
    pub max_empty_pages: u32,
}

impl Cli {
    /// Build the [`ScrapperConfig`] for these arguments.
    ///
    /// # Returns
    ///
    /// A config whose politeness delay is `sleep` seconds and whose listing
    /// pages come from `listing_url`.
    pub fn scrapper_config(&self) -> ScrapperConfig {
        ScrapperConfig {
            article_count: self.article_count,
            start_page: self.start_page,
            sleep: Duration::from_secs(self.sleep),
            listing_url_prefix: self.listing_url.clone(),
            max_empty_pages: self.max_empty_pages,
        }
    }
}

fn parse_output_path(raw: &str) -> Result<PathBuf, String> {
    if raw.trim().is_empty() {
        return Err("output path must not be empty".to_string());
    }
    Ok(PathBuf::from(raw))
}

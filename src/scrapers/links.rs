//! Link Collector: walks listing pages and gathers article URLs.
//!
//! Pages are fetched in increasing page order starting at
//! [`ScrapperConfig::start_page`]. Collection never fails as a whole: the
//! first page that cannot be fetched ends it, and whatever was gathered so
//! far is returned together with a [`StopReason`].

use crate::error::{Result, ScrapeError};
use crate::scrapers::fetch_html;
use crate::scrapper::ScrapperConfig;
use reqwest::Client;
use scraper::{Html, Selector};
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Why link collection ended.
#[derive(Debug)]
pub enum StopReason {
    /// The target count was reached.
    Complete,
    /// A listing page could not be fetched or parsed.
    PageFailed { page: u32, error: ScrapeError },
    /// Too many consecutive listing pages yielded no links.
    EmptyPages { page: u32, streak: u32 },
}

/// Article links in listing order, plus why collection stopped.
#[derive(Debug)]
pub struct CollectedLinks {
    pub links: Vec<String>,
    pub stop: StopReason,
}

/// Build the URL of listing page `page`, e.g. `https://kosmonautix.cz/page/3`.
pub fn listing_page_url(prefix: &str, page: u32) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), page)
}

/// Collect up to `config.article_count` article links.
///
/// Sleeps `config.sleep` after every successfully fetched listing page.
/// When `config.max_empty_pages` is non-zero, that many consecutive pages
/// without links end the collection.
#[instrument(level = "info", skip_all, fields(target = config.article_count))]
pub async fn collect_links(
    client: &Client,
    selector: &Selector,
    config: &ScrapperConfig,
) -> CollectedLinks {
    let target = config.article_count;
    let mut links: Vec<String> = Vec::with_capacity(target);
    let mut page = config.start_page;
    let mut empty_streak = 0u32;

    info!("Extracting all article links");
    while links.len() < target {
        let url = listing_page_url(&config.listing_url_prefix, page);
        let found = match fetch_page_links(client, selector, &url, target - links.len()).await {
            Ok(found) => found,
            Err(error) => {
                warn!(page, %url, error = %error, "Failed to extract links; stopping collection");
                return CollectedLinks {
                    links,
                    stop: StopReason::PageFailed { page, error },
                };
            }
        };

        info!(page, count = found.len(), %url, "Extracted article links");
        if found.is_empty() {
            empty_streak += 1;
        } else {
            empty_streak = 0;
        }
        links.extend(found);

        if config.max_empty_pages > 0 && empty_streak >= config.max_empty_pages {
            warn!(page, streak = empty_streak, "Too many empty listing pages; stopping collection");
            return CollectedLinks {
                links,
                stop: StopReason::EmptyPages {
                    page,
                    streak: empty_streak,
                },
            };
        }

        sleep(config.sleep).await;
        page += 1;
    }

    info!(count = links.len(), "Collected article links");
    CollectedLinks {
        links,
        stop: StopReason::Complete,
    }
}

/// Fetch one listing page and extract at most `maximum` links from it.
async fn fetch_page_links(
    client: &Client,
    selector: &Selector,
    page_url: &str,
    maximum: usize,
) -> Result<Vec<String>> {
    let base = Url::parse(page_url)?;
    let body = fetch_html(client, page_url).await?;
    Ok(extract_page_links(&body, &base, selector, maximum))
}

/// Extract up to `maximum` article links from a listing page body.
///
/// Nodes without an `href`, or with one that cannot be resolved against
/// `base`, are skipped and do not count towards `maximum`.
pub fn extract_page_links(
    html: &str,
    base: &Url,
    selector: &Selector,
    maximum: usize,
) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    for element in document.select(selector) {
        if links.len() == maximum {
            break;
        }
        let Some(href) = element.value().attr("href") else {
            debug!("Skipping link node without href");
            continue;
        };
        match base.join(href) {
            Ok(resolved) => links.push(resolved.to_string()),
            Err(e) => debug!(%href, error = %e, "Skipping unresolvable link"),
        }
    }
    links
}

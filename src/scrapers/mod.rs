//! Scraping of kosmonautix.cz listing and article pages.
//!
//! Scraping follows a two-phase pattern:
//!
//! 1. **Indexing**: walk the paginated listing and collect article URLs
//!    ([`links`])
//! 2. **Fetching**: download each article and extract its fields
//!    ([`article`])
//!
//! # Error policy
//!
//! | Call site | On failure |
//! |-----------|------------|
//! | [`links::collect_links`] | stops, keeps partial links, reports a [`links::StopReason`] |
//! | [`article::fetch_article`] | returns the error to the caller |
//!
//! Selectors and site constants live in [`kosmonautix`].

pub mod article;
pub mod kosmonautix;
pub mod links;

use crate::error::Result;
use reqwest::Client;
use tracing::{debug, instrument};

/// GET `url` and return the body, failing on any non-success status.
#[instrument(level = "debug", skip(client))]
pub async fn fetch_html(client: &Client, url: &str) -> Result<String> {
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    debug!(bytes = body.len(), "Fetched page");
    Ok(body)
}

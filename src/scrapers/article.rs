//! Article Extractor: turns an article page into an [`Article`].
//!
//! Each field is looked up independently so a missing node only nulls its
//! own field. The date is the exception to "best effort": a date node whose
//! text does not parse means the page layout drifted, and that is an error.

use crate::error::Result;
use crate::models::Article;
use crate::scrapers::fetch_html;
use crate::scrapers::kosmonautix::{Selectors, TRAILING_MARKER_WINDOW, TRAILING_MARKERS};
use crate::utils::parse_czech_date;
use chrono::NaiveDate;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument};

/// Fetch a single article and extract its fields.
///
/// # Errors
///
/// Network failures, non-success statuses and unparseable dates are all
/// returned to the caller.
#[instrument(level = "info", skip(client, selectors))]
pub async fn fetch_article(client: &Client, selectors: &Selectors, url: &str) -> Result<Article> {
    info!("Extracting article");
    let body = fetch_html(client, url).await?;
    let article = parse_article(&body, selectors)?;
    debug!(
        title = ?article.title,
        paragraphs = article.content_paragraphs.as_ref().map_or(0, Vec::len),
        "Parsed article"
    );
    Ok(article)
}

/// Extract an [`Article`] from an article page body.
pub fn parse_article(html: &str, selectors: &Selectors) -> Result<Article> {
    let document = Html::parse_document(html);
    Ok(Article {
        title: node_text(&document, &selectors.title),
        author: node_text(&document, &selectors.author),
        date: extract_date(&document, &selectors.date)?,
        content_paragraphs: extract_paragraphs(&document, &selectors.content),
    })
}

/// Trimmed text of the first node matching `selector`.
fn node_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

/// Parse the date node, keeping only its first three tokens.
///
/// The node reads like `"1. ledna 2020 v 10:00 Autor"`; only
/// `"1. ledna 2020"` is parsed.
fn extract_date(document: &Html, selector: &Selector) -> Result<Option<NaiveDate>> {
    let Some(raw) = node_text(document, selector) else {
        return Ok(None);
    };
    let head = raw.split_whitespace().take(3).collect::<Vec<_>>().join(" ");
    parse_czech_date(&head).map(Some)
}

/// Body paragraphs in page order; a post without any gives an empty list.
fn extract_paragraphs(document: &Html, selector: &Selector) -> Option<Vec<String>> {
    let paragraphs: Vec<String> = document
        .select(selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect();
    Some(strip_trailing_markers(paragraphs))
}

/// Drop trailing source/translation credits, then empty paragraphs.
///
/// Only a contiguous run at the very end is removed: positions are checked
/// from the last paragraph backwards, at most [`TRAILING_MARKER_WINDOW`] of
/// them, and the first non-marker stops the scan.
pub fn strip_trailing_markers(mut paragraphs: Vec<String>) -> Vec<String> {
    let marked = paragraphs
        .iter()
        .rev()
        .take(TRAILING_MARKER_WINDOW)
        .take_while(|p| is_trailing_marker(p))
        .count();
    paragraphs.truncate(paragraphs.len() - marked);
    paragraphs.retain(|p| !p.is_empty());
    paragraphs
}

fn is_trailing_marker(paragraph: &str) -> bool {
    let lower = paragraph.to_lowercase();
    TRAILING_MARKERS.iter().any(|marker| lower.starts_with(marker))
}

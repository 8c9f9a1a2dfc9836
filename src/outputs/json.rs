//! JSON dump of scraped articles.
//!
//! The output is a single UTF-8 array, pretty-printed with a six-space
//! indent. Non-ASCII text (Czech diacritics) is written as-is, not escaped.

use crate::error::Result;
use crate::models::Article;
use serde::Serialize;
use serde_json::Serializer;
use serde_json::ser::PrettyFormatter;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

const INDENT: &[u8] = b"      ";

/// Serialize `articles` into the output file format.
pub fn articles_to_json(articles: &[Article]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    articles.serialize(&mut serializer)?;
    Ok(buf)
}

/// Write `articles` to `path`, replacing any existing file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_articles(articles: &[Article], path: &Path) -> Result<()> {
    let json = articles_to_json(articles)?;
    fs::write(path, json).await?;
    info!(count = articles.len(), "Wrote articles JSON");
    Ok(())
}

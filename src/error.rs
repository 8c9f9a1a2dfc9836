//! Error types shared by the collector, the extractor and the output writer.

use thiserror::Error;

/// Everything that can go wrong while scraping or writing articles.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Connection failure or non-success HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A CSS selector failed to compile.
    #[error("Invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    /// A date node did not match the `day. month year` format.
    #[error("Unrecognized article date `{0}`")]
    DateFormat(String),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

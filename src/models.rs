//! Data model for scraped articles.
//!
//! An [`Article`] is built once from a single page fetch and is never
//! mutated afterwards. Every field is optional because extraction is
//! best-effort per field: a missing node yields `None` for that field only.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single article scraped from an article page.
///
/// Field order matters: it is the key order of the objects in the JSON
/// output file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Article {
    /// The article headline.
    pub title: Option<String>,
    /// Display name of the author.
    pub author: Option<String>,
    /// Publication day, written as an ISO-8601 timestamp at midnight.
    #[serde(with = "iso_date")]
    pub date: Option<NaiveDate>,
    /// Body paragraphs in page order, without trailing source credits.
    pub content_paragraphs: Option<Vec<String>>,
}

/// Serde adapter writing `Option<NaiveDate>` as `YYYY-MM-DDT00:00:00`.
///
/// Reading accepts both the timestamp form and a bare `YYYY-MM-DD`.
pub mod iso_date {
    use chrono::{NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer, de};

    const MIDNIGHT_FORMAT: &str = "%Y-%m-%dT00:00:00";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format(MIDNIGHT_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|dt| dt.date())
            .or_else(|_| NaiveDate::parse_from_str(&raw, "%Y-%m-%d"))
            .map(Some)
            .map_err(|e| de::Error::custom(format!("invalid ISO-8601 date `{raw}`: {e}")))
    }
}

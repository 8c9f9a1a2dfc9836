//! Site constants for [kosmonautix.cz](https://kosmonautix.cz).
//!
//! Listing pages live at `https://kosmonautix.cz/page/{n}`, newest articles
//! first. Both listing and article pages render posts inside
//! `#content`, so every selector shares the same prefix.

use crate::error::{Result, ScrapeError};
use scraper::Selector;

/// Listing page URL without the trailing `/{page}`.
pub const LISTING_URL_PREFIX: &str = "https://kosmonautix.cz/page";

const ARTICLE_SELECTOR_PREFIX: &str = "div #content div >";
const LINK_SELECTOR_SUFFIX: &str = "h2.title > a";
const TITLE_SELECTOR_SUFFIX: &str = "h2.title";
const AUTHOR_SELECTOR_SUFFIX: &str = "div.postdate > a.author";
const DATE_SELECTOR_SUFFIX: &str = "div.postdate";
const CONTENT_SELECTOR_SUFFIX: &str = "div.entry p";

/// Lowercase prefixes of trailing paragraphs that credit sources
/// ("Zdroje") or a translation ("Přeloženo") rather than carry content.
pub const TRAILING_MARKERS: [&str; 2] = ["zdroje", "přeloženo"];

/// How many paragraphs from the end are checked for [`TRAILING_MARKERS`].
pub const TRAILING_MARKER_WINDOW: usize = 3;

/// Compiled selectors for listing and article pages.
#[derive(Debug, Clone)]
pub struct Selectors {
    /// Article links on a listing page.
    pub link: Selector,
    pub title: Selector,
    pub author: Selector,
    /// Node whose text starts with the publication date.
    pub date: Selector,
    /// Body paragraphs.
    pub content: Selector,
}

impl Selectors {
    /// Compile the kosmonautix.cz selectors.
    pub fn new() -> Result<Self> {
        Ok(Self {
            link: compile(LINK_SELECTOR_SUFFIX)?,
            title: compile(TITLE_SELECTOR_SUFFIX)?,
            author: compile(AUTHOR_SELECTOR_SUFFIX)?,
            date: compile(DATE_SELECTOR_SUFFIX)?,
            content: compile(CONTENT_SELECTOR_SUFFIX)?,
        })
    }
}

fn compile(suffix: &str) -> Result<Selector> {
    let selector = format!("{ARTICLE_SELECTOR_PREFIX} {suffix}");
    let parsed = Selector::parse(&selector).map_err(|e| e.to_string());
    parsed.map_err(|reason| ScrapeError::Selector { selector, reason })
}

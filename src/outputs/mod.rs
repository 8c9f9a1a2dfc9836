//! Output generation.
//!
//! # Submodules
//!
//! - [`json`]: writes the scraped articles to a single JSON file
//!
//! # Output Structure
//!
//! ```text
//! [
//!       {
//!             "title": "…",
//!             "author": "…",
//!             "date": "2020-01-01T00:00:00",
//!             "content_paragraphs": ["…", "…"]
//!       }
//! ]
//! ```

pub mod json;

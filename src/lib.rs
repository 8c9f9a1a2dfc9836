//! # Kosmonautix Scrapper
//!
//! Scrapes news articles from [kosmonautix.cz](https://kosmonautix.cz) and
//! serializes them to JSON.
//!
//! ## Example
//!
//! ```rust,no_run
//! use kosmonautix_scrapper::scrapper::{Scrapper, ScrapperConfig};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ScrapperConfig {
//!         article_count: 5,
//!         sleep: Duration::from_secs(1),
//!         ..ScrapperConfig::default()
//!     };
//!     let mut scrapper = Scrapper::new(config)?;
//!     for article in scrapper.run().await? {
//!         println!("{:?}", article.title);
//!     }
//!
//!     // One-off article outside the batch; failures become `None`
//!     let single = scrapper
//!         .scrap_article("https://kosmonautix.cz/2020/01/01/clanek/")
//!         .await;
//!     println!("{single:?}");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod error;
pub mod models;
pub mod outputs;
pub mod scrapers;
pub mod scrapper;
pub mod utils;

pub use error::{Result, ScrapeError};
pub use models::Article;
pub use scrapper::{Scrapper, ScrapperConfig};

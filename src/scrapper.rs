//! Batch orchestration of link collection and article extraction.
//!
//! A [`Scrapper`] moves through three states:
//!
//! ```text
//! NotStarted --collect_links--> LinksCollected --extract all--> Done
//! ```
//!
//! `run` on a `Done` scrapper returns the stored articles without touching
//! the network. [`Scrapper::reset`] moves back to `NotStarted` or
//! `LinksCollected`.

use crate::error::Result;
use crate::models::Article;
use crate::scrapers::article::fetch_article;
use crate::scrapers::kosmonautix::{LISTING_URL_PREFIX, Selectors};
use crate::scrapers::links::{StopReason, collect_links};
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Tunables for a scraping run.
#[derive(Debug, Clone)]
pub struct ScrapperConfig {
    /// How many article links to collect.
    pub article_count: usize,
    /// First listing page to fetch (1-based).
    pub start_page: u32,
    /// Politeness delay after every listing page and article fetch.
    pub sleep: Duration,
    /// Listing URL without the trailing `/{page}`.
    pub listing_url_prefix: String,
    /// Consecutive link-less listing pages tolerated before giving up.
    /// Zero disables the limit.
    pub max_empty_pages: u32,
}

impl Default for ScrapperConfig {
    fn default() -> Self {
        Self {
            article_count: 1000,
            start_page: 1,
            sleep: Duration::ZERO,
            listing_url_prefix: LISTING_URL_PREFIX.to_string(),
            max_empty_pages: 5,
        }
    }
}

/// Where a [`Scrapper`] is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    NotStarted,
    LinksCollected,
    Done,
}

/// Scrapes articles from kosmonautix.cz, one request at a time.
#[derive(Debug)]
pub struct Scrapper {
    config: ScrapperConfig,
    client: Client,
    selectors: Selectors,
    links: Vec<String>,
    articles: Vec<Article>,
    state: State,
}

impl Scrapper {
    /// Create a scrapper with a default HTTP client.
    ///
    /// # Errors
    ///
    /// Fails only if the built-in selectors do not compile.
    pub fn new(config: ScrapperConfig) -> Result<Self> {
        Self::with_client(config, Client::new())
    }

    /// Create a scrapper that sends every request through `client`.
    ///
    /// # Arguments
    ///
    /// * `config` - Target count, start page, delay and listing URL
    /// * `client` - HTTP client shared by link collection and extraction
    ///
    /// # Errors
    ///
    /// Fails only if the built-in selectors do not compile.
    pub fn with_client(config: ScrapperConfig, client: Client) -> Result<Self> {
        info!(?config, "Initializing scrapper");
        Ok(Self {
            config,
            client,
            selectors: Selectors::new()?,
            links: Vec::new(),
            articles: Vec::new(),
            state: State::NotStarted,
        })
    }

    /// The configuration this scrapper was built with.
    pub fn config(&self) -> &ScrapperConfig {
        &self.config
    }

    /// Current position in the `NotStarted → LinksCollected → Done` cycle.
    pub fn state(&self) -> State {
        self.state
    }

    /// Article links collected so far, in listing order.
    pub fn links(&self) -> &[String] {
        &self.links
    }

    /// Articles extracted by the last completed run.
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Collect links if needed, then extract every linked article.
    ///
    /// Link collection swallows page failures and keeps what it has.
    /// Article extraction does not: the first failing article aborts the
    /// run, the articles extracted in this call are dropped, and the state
    /// stays `LinksCollected` so a later call retries extraction only.
    ///
    /// # Errors
    ///
    /// Returns the first article fetch or date parse error.
    pub async fn run(&mut self) -> Result<&[Article]> {
        info!(state = ?self.state, "Running scrapper");
        if self.state == State::Done {
            return Ok(&self.articles);
        }

        if self.state == State::NotStarted {
            let collected =
                collect_links(&self.client, &self.selectors.link, &self.config).await;
            if let StopReason::PageFailed { page, error } = &collected.stop {
                warn!(page, error = %error, count = collected.links.len(), "Link collection stopped early");
            }
            self.links = collected.links;
            self.state = State::LinksCollected;
        }

        info!(count = self.links.len(), "Extracting all articles");
        let mut articles = Vec::with_capacity(self.links.len());
        for url in &self.links {
            articles.push(fetch_article(&self.client, &self.selectors, url).await?);
            sleep(self.config.sleep).await;
        }

        info!(count = articles.len(), "Extracted all articles");
        self.articles = articles;
        self.state = State::Done;
        Ok(&self.articles)
    }

    /// Forget extracted articles and, if `reset_links`, the collected links.
    pub fn reset(&mut self, reset_links: bool) -> &mut Self {
        info!(reset_links, "Resetting scrapper");
        self.articles.clear();
        self.state = if reset_links || self.state == State::NotStarted {
            self.links.clear();
            State::NotStarted
        } else {
            State::LinksCollected
        };
        self
    }

    /// Best-effort scrape of a single article, outside any batch run.
    ///
    /// Every failure is logged and mapped to `None`.
    pub async fn scrap_article(&self, url: &str) -> Option<Article> {
        match fetch_article(&self.client, &self.selectors, url).await {
            Ok(article) => Some(article),
            Err(e) => {
                warn!(%url, error = %e, "Scraping single article failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;
    use chrono::NaiveDate;
    use mockito::{Mock, Server, ServerGuard};

    fn listing_html(hrefs: &[&str]) -> String {
        let posts: String = hrefs
            .iter()
            .map(|h| format!(r#"<div class="post"><h2 class="title"><a href="{h}">Post</a></h2></div>"#))
            .collect();
        format!(r#"<html><body><div id="wrap"><div id="content">{posts}</div></div></body></html>"#)
    }

    fn article_html(title: &str) -> String {
        format!(
            r#"<html><body><div id="wrap"><div id="content"><div class="post">
            <h2 class="title">{title}</h2>
            <div class="postdate">12. března 2021 v 08:15 <a class="author" href="/a/">Ondřej Šamárek</a></div>
            <div class="entry">
              <p>Raketa odstartovala.</p>
              <p>Náklad dosáhl oběžné dráhy.</p>
              <p>Další start je naplánován na duben.</p>
              <p>Zdroje: spaceflightnow.com</p>
            </div>
            </div></div></div></body></html>"#
        )
    }

    fn config(server: &ServerGuard, article_count: usize) -> ScrapperConfig {
        ScrapperConfig {
            article_count,
            sleep: Duration::ZERO,
            listing_url_prefix: format!("{}/page", server.url()),
            ..ScrapperConfig::default()
        }
    }

    async fn mock_page(server: &mut ServerGuard, path: &str, body: String, hits: usize) -> Mock {
        server
            .mock("GET", path)
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body(body)
            .expect(hits)
            .create_async()
            .await
    }

    #[test]
    fn test_with_client_starts_fresh() {
        let config = ScrapperConfig {
            article_count: 7,
            start_page: 3,
            ..ScrapperConfig::default()
        };
        let scrapper = Scrapper::with_client(config, Client::new()).unwrap();

        assert_eq!(scrapper.config().article_count, 7);
        assert_eq!(scrapper.config().start_page, 3);
        assert_eq!(scrapper.config().listing_url_prefix, LISTING_URL_PREFIX);
        assert_eq!(scrapper.state(), State::NotStarted);
        assert!(scrapper.links().is_empty());
        assert!(scrapper.articles().is_empty());
    }

    #[tokio::test]
    async fn test_run_end_to_end() {
        let mut server = Server::new_async().await;
        let page1 = mock_page(&mut server, "/page/1", listing_html(&["/clanek-1/", "/clanek-2/"]), 1).await;
        let page2 = mock_page(&mut server, "/page/2", listing_html(&["/clanek-3/", "/clanek-4/"]), 0).await;
        let a1 = mock_page(&mut server, "/clanek-1/", article_html("První"), 1).await;
        let a2 = mock_page(&mut server, "/clanek-2/", article_html("Druhý"), 1).await;

        let mut scrapper = Scrapper::new(config(&server, 2)).unwrap();
        let articles = scrapper.run().await.unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title.as_deref(), Some("První"));
        assert_eq!(articles[1].title.as_deref(), Some("Druhý"));
        for article in articles {
            assert_eq!(article.author.as_deref(), Some("Ondřej Šamárek"));
            assert_eq!(article.date, NaiveDate::from_ymd_opt(2021, 3, 12));
            assert_eq!(article.content_paragraphs.as_ref().map(Vec::len), Some(3));
        }
        assert_eq!(scrapper.state(), State::Done);

        page1.assert_async().await;
        page2.assert_async().await;
        a1.assert_async().await;
        a2.assert_async().await;
    }

    #[tokio::test]
    async fn test_run_collects_across_listing_pages() {
        let mut server = Server::new_async().await;
        let mut mocks = vec![
            mock_page(&mut server, "/page/1", listing_html(&["/clanek-1/", "/clanek-2/"]), 1).await,
            mock_page(&mut server, "/page/2", listing_html(&["/clanek-3/", "/clanek-4/"]), 1).await,
        ];
        for n in 1..=3 {
            let path = format!("/clanek-{n}/");
            mocks.push(mock_page(&mut server, &path, article_html(&format!("Článek {n}")), 1).await);
        }

        let mut scrapper = Scrapper::new(config(&server, 3)).unwrap();
        let titles: Vec<_> = scrapper
            .run()
            .await
            .unwrap()
            .iter()
            .map(|a| a.title.clone().unwrap())
            .collect();

        assert_eq!(titles, vec!["Článek 1", "Článek 2", "Článek 3"]);
        for mock in mocks {
            mock.assert_async().await;
        }
    }

    #[tokio::test]
    async fn test_run_twice_is_idempotent() {
        let mut server = Server::new_async().await;
        let page1 = mock_page(&mut server, "/page/1", listing_html(&["/clanek-1/"]), 1).await;
        let a1 = mock_page(&mut server, "/clanek-1/", article_html("Jediný"), 1).await;

        let mut scrapper = Scrapper::new(config(&server, 1)).unwrap();
        let first = scrapper.run().await.unwrap().to_vec();
        let second = scrapper.run().await.unwrap().to_vec();

        assert_eq!(first, second);
        page1.assert_async().await;
        a1.assert_async().await;
    }

    #[tokio::test]
    async fn test_article_failure_aborts_run() {
        let mut server = Server::new_async().await;
        let _page1 = mock_page(&mut server, "/page/1", listing_html(&["/clanek-1/", "/chybi/"]), 1).await;
        let _a1 = mock_page(&mut server, "/clanek-1/", article_html("První"), 1).await;
        let _missing = server
            .mock("GET", "/chybi/")
            .with_status(500)
            .create_async()
            .await;

        let mut scrapper = Scrapper::new(config(&server, 2)).unwrap();
        let err = scrapper.run().await.unwrap_err();

        assert!(matches!(err, ScrapeError::Http(_)));
        assert!(scrapper.articles().is_empty());
        assert_eq!(scrapper.links().len(), 2);
        assert_eq!(scrapper.state(), State::LinksCollected);
    }

    #[tokio::test]
    async fn test_reset_keeps_or_clears_links() {
        let mut server = Server::new_async().await;
        let page1 = mock_page(&mut server, "/page/1", listing_html(&["/clanek-1/"]), 2).await;
        let a1 = mock_page(&mut server, "/clanek-1/", article_html("Jediný"), 3).await;

        let mut scrapper = Scrapper::new(config(&server, 1)).unwrap();
        scrapper.run().await.unwrap();

        // Keeping links only re-fetches the article.
        scrapper.reset(false);
        assert_eq!(scrapper.state(), State::LinksCollected);
        assert!(scrapper.articles().is_empty());
        assert_eq!(scrapper.run().await.unwrap().len(), 1);

        // Dropping links starts from the listing again.
        scrapper.reset(true);
        assert_eq!(scrapper.state(), State::NotStarted);
        assert!(scrapper.links().is_empty());
        assert_eq!(scrapper.run().await.unwrap().len(), 1);

        page1.assert_async().await;
        a1.assert_async().await;
    }

    #[tokio::test]
    async fn test_run_with_failed_listing_returns_partial() {
        let mut server = Server::new_async().await;
        let _page1 = mock_page(&mut server, "/page/1", listing_html(&["/clanek-1/"]), 1).await;
        let _page2 = server
            .mock("GET", "/page/2")
            .with_status(503)
            .create_async()
            .await;
        let _a1 = mock_page(&mut server, "/clanek-1/", article_html("Jediný"), 1).await;

        let mut scrapper = Scrapper::new(config(&server, 5)).unwrap();
        let articles = scrapper.run().await.unwrap();

        assert_eq!(articles.len(), 1);
    }

    #[tokio::test]
    async fn test_scrap_article_swallows_errors() {
        let mut server = Server::new_async().await;
        let _good = mock_page(&mut server, "/dobry/", article_html("Dobrý"), 1).await;
        let _missing = server
            .mock("GET", "/spatny/")
            .with_status(404)
            .create_async()
            .await;

        let scrapper = Scrapper::new(config(&server, 0)).unwrap();
        let ok = scrapper.scrap_article(&format!("{}/dobry/", server.url())).await;
        let missing = scrapper.scrap_article(&format!("{}/spatny/", server.url())).await;
        let malformed = scrapper.scrap_article("not a url").await;

        assert_eq!(ok.and_then(|a| a.title).as_deref(), Some("Dobrý"));
        assert!(missing.is_none());
        assert!(malformed.is_none());
    }
}

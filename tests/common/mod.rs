#![allow(dead_code)]

use anyhow::{Context, Result};
use sportmap::config::ScrapeConfig;
use sportmap::error::ScrapeError;
use sportmap::fetch::{FetchedPage, PageFetcher};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::Path;

pub const STVANICE_URL: &str = "https://www.sporteri.cz/sportoviste/stvanice";
pub const LUZANKY_URL: &str = "https://www.sporteri.cz/sportoviste/luzanky";
pub const SPORTERI_TENIS: &str = "https://www.sporteri.cz/vyhledat/tenis";
pub const MULTISPORT_FITNESS: &str = "https://mapa.multisport.cz/cs/activity/fitness";

/// Serves registered pages, answers 404 for everything else and records
/// every requested URL.
#[derive(Default)]
pub struct FixtureFetcher {
    pages: HashMap<String, String>,
    unreachable: HashSet<String>,
    log: RefCell<Vec<String>>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), body.into());
        self
    }

    pub fn with_fixture(self, url: &str, relative: &str) -> Result<Self> {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(relative);
        let body = std::fs::read_to_string(&path)
            .with_context(|| format!("missing fixture {}", path.display()))?;
        Ok(self.with_page(url, body))
    }

    pub fn with_unreachable(mut self, url: &str) -> Self {
        self.unreachable.insert(url.to_string());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

impl PageFetcher for FixtureFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError> {
        self.log.borrow_mut().push(url.to_string());
        if self.unreachable.contains(url) {
            return Err(ScrapeError::Transport {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            });
        }
        Ok(match self.pages.get(url) {
            Some(body) => FetchedPage {
                url: url.to_string(),
                status: 200,
                body: body.clone(),
            },
            None => FetchedPage {
                url: url.to_string(),
                status: 404,
                body: String::new(),
            },
        })
    }
}

/// Sporteri tennis listing with the Štvanice detail page; Lužánky has none.
pub fn sporteri_fetcher() -> Result<FixtureFetcher> {
    FixtureFetcher::new()
        .with_fixture(SPORTERI_TENIS, "sporteri/listing_tenis.html")?
        .with_fixture(STVANICE_URL, "sporteri/detail_stvanice.html")
}

/// Defaults without request spacing.
pub fn test_config() -> ScrapeConfig {
    let mut config = ScrapeConfig::default();
    config.fetch.delay_ms = Some(0);
    config
}

/// A listing page with `count` Sporteri cards, each linking a detail page.
pub fn sporteri_listing(count: usize) -> String {
    let cards: String = (1..=count)
        .map(|n| {
            format!(
                r#"<article class="venue-card">
                     <h3 class="venue-name"><a href="/sportoviste/kurt-{n}">Kurt {n}</a></h3>
                     <p class="venue-address">Sportovní {n}, 301 00 Plzeň</p>
                   </article>"#
            )
        })
        .collect();
    format!("<html><body>{cards}</body></html>")
}

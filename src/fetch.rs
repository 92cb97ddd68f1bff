use crate::config::FetchConfig;
use crate::error::ScrapeError;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::cell::Cell;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn into_success(self) -> Result<Self, ScrapeError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ScrapeError::Status {
                url: self.url,
                status: self.status,
            })
        }
    }
}

/// One blocking GET, one attempt. Non-2xx responses are returned as pages;
/// only transport failures are errors.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .context("failed to build reqwest client")?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError> {
        let transport = |err: reqwest::Error| ScrapeError::Transport {
            url: url.to_string(),
            reason: err.to_string(),
        };

        let resp = self.client.get(url).send().map_err(transport)?;
        let status = resp.status().as_u16();
        let body = resp.text().map_err(transport)?;
        debug!(%url, status, bytes = body.len(), "fetched page");

        Ok(FetchedPage {
            url: url.to_string(),
            status,
            body,
        })
    }
}

/// Keeps consecutive requests through it at least `spacing` apart.
pub struct Throttled<'a> {
    inner: &'a dyn PageFetcher,
    spacing: Duration,
    last_request: Cell<Option<Instant>>,
    requests: Cell<usize>,
}

impl<'a> Throttled<'a> {
    pub fn new(inner: &'a dyn PageFetcher, spacing: Duration) -> Self {
        Self {
            inner,
            spacing,
            last_request: Cell::new(None),
            requests: Cell::new(0),
        }
    }

    pub fn requests(&self) -> usize {
        self.requests.get()
    }
}

impl PageFetcher for Throttled<'_> {
    fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError> {
        if let Some(previous) = self.last_request.get() {
            let elapsed = previous.elapsed();
            if elapsed < self.spacing {
                std::thread::sleep(self.spacing - elapsed);
            }
        }

        let result = self.inner.fetch(url);
        self.last_request.set(Some(Instant::now()));
        self.requests.set(self.requests.get() + 1);
        result
    }
}

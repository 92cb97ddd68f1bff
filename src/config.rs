use crate::model::Attribute;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 SportMatch Data Collector (https://sportmatch.cz/contact)";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ScrapeConfig {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    /// Extra classifier keywords keyed by tag (`indoor`, `showers`, ...).
    #[serde(default)]
    pub keywords: BTreeMap<String, Vec<String>>,
}

impl ScrapeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.fetch.timeout_secs == 0 {
            bail!("fetch.timeout_secs must be positive");
        }
        if self.fetch.user_agent.trim().is_empty() {
            bail!("fetch.user_agent must not be empty");
        }
        for tag in self.keywords.keys() {
            if Attribute::from_tag(tag).is_none() {
                bail!("unknown keyword category {tag}");
            }
        }
        for url in &self.sources.sportovistevcr {
            url::Url::parse(url)
                .with_context(|| format!("invalid sources.sportovistevcr url {url}"))?;
        }
        Ok(())
    }

    pub fn extra_keywords(&self) -> BTreeMap<Attribute, Vec<String>> {
        self.keywords
            .iter()
            .filter_map(|(tag, words)| Attribute::from_tag(tag).map(|attr| (attr, words.clone())))
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Overrides every adapter's own request spacing.
    #[serde(default)]
    pub delay_ms: Option<u64>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            delay_ms: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default)]
    pub merge_duplicates: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            country: default_country(),
            merge_duplicates: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SourcesConfig {
    /// Detail pages for the detail-only SportovisteVCR source.
    #[serde(default)]
    pub sportovistevcr: Vec<String>,
}

pub fn load_config(path: &Path) -> Result<ScrapeConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let config: ScrapeConfig = toml::from_str(&text)
        .with_context(|| format!("failed to parse toml in {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_country() -> String {
    "Czech Republic".to_string()
}

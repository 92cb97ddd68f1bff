//! Per-site adapters for the facility directories.
//!
//! Each adapter knows its own URL scheme and page layout. Fetching, the result
//! cap, classification and ids are handled by [`crate::pipeline`], so an
//! adapter only turns parsed pages into [`FacilityStub`]s.

pub mod fitmapa;
pub mod html;
pub mod kdesportovat;
pub mod multisport;
pub mod sportcentral;
pub mod sporteri;
pub mod sportovistevcr;

use crate::config::ScrapeConfig;
use crate::model::FacilityRecord;
use crate::regions::RegionTable;
use crate::sports::SportTable;
use anyhow::{Result, bail};
use scraper::Html;
use std::fmt;
use std::time::Duration;

pub use fitmapa::FitMapa;
pub use kdesportovat::KdeSportovat;
pub use multisport::MultiSport;
pub use sportcentral::SportCentral;
pub use sporteri::Sporteri;
pub use sportovistevcr::SportovisteVcr;

/// Source keys in the order `all` runs them.
pub const SOURCE_KEYS: [&str; 6] = [
    "fitmapa",
    "sporteri",
    "multisport",
    "kdesportovat",
    "sportcentral",
    "sportovistevcr",
];

pub const DEFAULT_SPACING: Duration = Duration::from_millis(1000);
pub const SLOW_SPACING: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    SportRegion { sport: String, region: String },
    Sport(String),
    Activity(String),
    Page(String),
}

impl Locator {
    /// Source category key, when the locator carries one.
    pub fn category(&self) -> Option<&str> {
        match self {
            Locator::SportRegion { sport, .. } | Locator::Sport(sport) => Some(sport.as_str()),
            Locator::Activity(activity) => Some(activity.as_str()),
            Locator::Page(_) => None,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::SportRegion { sport, region } => write!(f, "{sport}/{region}"),
            Locator::Sport(sport) => write!(f, "{sport}"),
            Locator::Activity(activity) => write!(f, "activity:{activity}"),
            Locator::Page(url) => write!(f, "{url}"),
        }
    }
}

/// A listing entry on its way to becoming a catalog record.
#[derive(Debug, Clone)]
pub struct FacilityStub {
    pub record: FacilityRecord,
    pub detail_url: Option<String>,
    pub category: Option<String>,
    /// Classifier input besides the description, e.g. parameter labels.
    pub evidence: Vec<String>,
}

impl FacilityStub {
    pub fn new(record: FacilityRecord, locator: &Locator) -> Self {
        Self {
            record,
            detail_url: None,
            category: locator.category().map(ToString::to_string),
            evidence: Vec::new(),
        }
    }
}

pub struct AdapterContext<'a> {
    pub sports: &'a SportTable,
    pub regions: &'a RegionTable,
    pub country: &'a str,
}

pub trait SourceAdapter {
    fn key(&self) -> &'static str;

    /// Value written to `source` on every record.
    fn name(&self) -> &'static str;

    fn request_spacing(&self) -> Duration {
        DEFAULT_SPACING
    }

    /// Whether ids are salted with the record's source URL.
    fn salts_identity(&self) -> bool {
        true
    }

    fn locators(&self, ctx: &AdapterContext<'_>) -> Vec<Locator>;

    fn listing_url(&self, locator: &Locator) -> String;

    fn list_page(
        &self,
        ctx: &AdapterContext<'_>,
        locator: &Locator,
        page: &Html,
        page_url: &str,
    ) -> Vec<FacilityStub>;

    fn parse_detail(
        &self,
        _ctx: &AdapterContext<'_>,
        _stub: &mut FacilityStub,
        _page: &Html,
        _page_url: &str,
    ) {
    }
}

pub fn adapter_for(key: &str, config: &ScrapeConfig) -> Option<Box<dyn SourceAdapter>> {
    let adapter: Box<dyn SourceAdapter> = match key {
        "fitmapa" => Box::new(FitMapa),
        "sporteri" => Box::new(Sporteri),
        "multisport" => Box::new(MultiSport),
        "kdesportovat" => Box::new(KdeSportovat),
        "sportcentral" => Box::new(SportCentral),
        "sportovistevcr" => Box::new(SportovisteVcr::new(config.sources.sportovistevcr.clone())),
        _ => return None,
    };
    Some(adapter)
}

/// Resolves `all` or a single source key into adapters, in run order.
pub fn select_adapters(
    selection: &str,
    config: &ScrapeConfig,
) -> Result<Vec<Box<dyn SourceAdapter>>> {
    let keys: Vec<&str> = if selection.eq_ignore_ascii_case("all") {
        SOURCE_KEYS.to_vec()
    } else {
        vec![selection]
    };

    let mut adapters = Vec::with_capacity(keys.len());
    for key in keys {
        let Some(adapter) = adapter_for(&key.to_ascii_lowercase(), config) else {
            bail!("unknown source {key}; expected one of {} or all", SOURCE_KEYS.join(", "));
        };
        adapters.push(adapter);
    }
    Ok(adapters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_selects_every_source_in_order() {
        let config = ScrapeConfig::default();
        let adapters = select_adapters("all", &config).unwrap();
        let keys: Vec<_> = adapters.iter().map(|a| a.key()).collect();
        assert_eq!(keys, SOURCE_KEYS);
    }

    #[test]
    fn unknown_source_is_rejected() {
        let config = ScrapeConfig::default();
        assert!(select_adapters("hriste", &config).is_err());
        assert_eq!(select_adapters("MultiSport", &config).unwrap().len(), 1);
    }

    #[test]
    fn locator_category_keys() {
        let locator = Locator::SportRegion {
            sport: "tenis".to_string(),
            region: "praha".to_string(),
        };
        assert_eq!(locator.category(), Some("tenis"));
        assert_eq!(locator.to_string(), "tenis/praha");
        assert_eq!(Locator::Page("https://x.cz".to_string()).category(), None);
    }
}

use crate::adapters::{AdapterContext, FacilityStub, SourceAdapter, select_adapters};
use crate::catalog::{CatalogBuilder, write_catalog};
use crate::classify::{KeywordTable, infer_sport};
use crate::config::ScrapeConfig;
use crate::dedup::merge_duplicates;
use crate::error::ScrapeError;
use crate::fetch::{PageFetcher, Throttled};
use crate::identity::IdentityAssigner;
use crate::model::{AdapterReport, FacilityRecord};
use crate::regions::RegionTable;
use crate::sports::SportTable;
use anyhow::{Context, Result};
use chrono::Local;
use scraper::Html;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Lookup tables shared by every adapter in a run.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    pub sports: SportTable,
    pub regions: RegionTable,
    pub keywords: KeywordTable,
}

impl Lexicon {
    pub fn from_config(config: &ScrapeConfig) -> Self {
        Self {
            keywords: KeywordTable::with_extra(&config.extra_keywords()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Per-adapter record cap.
    pub limit: usize,
    pub country: String,
    /// Replaces each adapter's own request spacing when set.
    pub spacing: Option<Duration>,
}

impl RunSettings {
    pub fn from_config(config: &ScrapeConfig, limit: usize) -> Self {
        Self {
            limit,
            country: config.catalog.country.clone(),
            spacing: config.fetch.delay_ms.map(Duration::from_millis),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    pub source: String,
    pub limit: usize,
    pub output: PathBuf,
    pub merge_duplicates: bool,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub reports: Vec<AdapterReport>,
    pub count: usize,
    pub output: PathBuf,
}

/// Scrapes the selected sources in order and writes one catalog.
pub fn run_scrape(
    config: &ScrapeConfig,
    options: &ScrapeOptions,
    fetcher: &dyn PageFetcher,
) -> Result<RunSummary> {
    let adapters = select_adapters(&options.source, config)?;
    let lexicon = Lexicon::from_config(config);
    let settings = RunSettings::from_config(config, options.limit);

    let mut builder = CatalogBuilder::new();
    let mut reports = Vec::with_capacity(adapters.len());
    for adapter in &adapters {
        let (records, report) = run_adapter(adapter.as_ref(), fetcher, &lexicon, &settings);
        builder.extend(records);
        reports.push(report);
    }

    if options.merge_duplicates || config.catalog.merge_duplicates {
        let before = builder.len();
        builder.map_records(merge_duplicates);
        info!(before, after = builder.len(), "cross-source merge complete");
    }

    let catalog = builder.build(Local::now());
    write_catalog(&options.output, &catalog)
        .with_context(|| format!("failed to write catalog {}", options.output.display()))?;
    info!(
        path = %options.output.display(),
        count = catalog.metadata().count,
        "catalog written"
    );

    Ok(RunSummary {
        reports,
        count: catalog.metadata().count,
        output: options.output.clone(),
    })
}

/// Runs one adapter to completion or to `settings.limit` records. Page
/// failures are logged and counted, never returned.
pub fn run_adapter(
    adapter: &dyn SourceAdapter,
    fetcher: &dyn PageFetcher,
    lexicon: &Lexicon,
    settings: &RunSettings,
) -> (Vec<FacilityRecord>, AdapterReport) {
    let key = adapter.key();
    let mut report = AdapterReport {
        source_key: key.to_string(),
        ..AdapterReport::default()
    };
    if settings.limit == 0 {
        info!(source = key, "limit is zero; skipping source");
        return (Vec::new(), report);
    }

    let spacing = settings.spacing.unwrap_or_else(|| adapter.request_spacing());
    let throttled = Throttled::new(fetcher, spacing);
    let ctx = AdapterContext {
        sports: &lexicon.sports,
        regions: &lexicon.regions,
        country: &settings.country,
    };
    let mut ids = IdentityAssigner::new();
    let mut records = Vec::new();

    info!(source = key, limit = settings.limit, "scrape start");
    'locators: for locator in adapter.locators(&ctx) {
        if records.len() >= settings.limit {
            break;
        }

        let url = adapter.listing_url(&locator);
        report.listing_pages += 1;
        let page = match fetch_html(&throttled, &url) {
            Ok(page) => page,
            Err(err) => {
                report.listing_failures += 1;
                warn!(
                    source = key,
                    %url,
                    error = %err,
                    transient = err.is_transient(),
                    "listing page failed; skipping"
                );
                continue;
            }
        };

        let stubs = adapter.list_page(&ctx, &locator, &page, &url);
        debug!(source = key, %url, stubs = stubs.len(), "listing parsed");

        for mut stub in stubs {
            if records.len() >= settings.limit {
                break 'locators;
            }

            if let Some(detail_url) = stub.detail_url.clone() {
                report.detail_pages += 1;
                match fetch_html(&throttled, &detail_url) {
                    Ok(detail) => adapter.parse_detail(&ctx, &mut stub, &detail, &detail_url),
                    Err(err) => {
                        report.detail_failures += 1;
                        warn!(
                            source = key,
                            url = %detail_url,
                            error = %err,
                            "detail page failed; keeping listing data"
                        );
                    }
                }
            }

            records.push(finish_record(adapter, lexicon, &mut ids, stub));
        }
    }

    report.records = records.len();
    info!(
        source = key,
        records = report.records,
        requests = throttled.requests(),
        listing_failures = report.listing_failures,
        detail_failures = report.detail_failures,
        "scrape complete"
    );
    (records, report)
}

fn fetch_html(fetcher: &dyn PageFetcher, url: &str) -> Result<Html, ScrapeError> {
    let page = fetcher.fetch(url)?.into_success()?;
    if page.body.trim().is_empty() {
        return Err(ScrapeError::MalformedPage {
            url: page.url,
            detail: "empty body".to_string(),
        });
    }
    Ok(Html::parse_document(&page.body))
}

/// Classification, sport fallback and id assignment shared by all sources.
fn finish_record(
    adapter: &dyn SourceAdapter,
    lexicon: &Lexicon,
    ids: &mut IdentityAssigner,
    stub: FacilityStub,
) -> FacilityRecord {
    let FacilityStub {
        mut record,
        category,
        mut evidence,
        ..
    } = stub;

    evidence.push(record.description.clone());
    lexicon.keywords.apply(&mut record, &evidence);

    if record.sports.is_empty()
        && let Some(code) = infer_sport(&lexicon.sports, category.as_deref(), &record.description)
    {
        record.sports.insert(code.to_string());
    }

    let salt = adapter
        .salts_identity()
        .then_some(record.source_url.as_str());
    record.id = ids.assign(&record.name, salt);
    record
}

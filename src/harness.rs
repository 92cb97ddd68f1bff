use crate::catalog::load_catalog;
use crate::config::ScrapeConfig;
use crate::fetch::PageFetcher;
use crate::pipeline::{ScrapeOptions, run_scrape};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct HarnessOptions {
    pub source: String,
    pub limit: usize,
    pub out_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct HarnessReport {
    pub first_run_records: usize,
    pub second_run_records: usize,
    /// Same ids in the same order on both runs.
    pub stable: bool,
    pub only_in_first: Vec<String>,
    pub only_in_second: Vec<String>,
}

/// Scrapes twice against the same fetcher and compares the id sequences.
pub fn run_harness(
    config: &ScrapeConfig,
    options: &HarnessOptions,
    fetcher: &dyn PageFetcher,
) -> Result<HarnessReport> {
    std::fs::create_dir_all(&options.out_dir)
        .with_context(|| format!("failed to create {}", options.out_dir.display()))?;

    let mut runs = Vec::with_capacity(2);
    for name in ["first.json", "second.json"] {
        let output = options.out_dir.join(name);
        run_scrape(
            config,
            &ScrapeOptions {
                source: options.source.clone(),
                limit: options.limit,
                output: output.clone(),
                merge_duplicates: false,
            },
            fetcher,
        )?;
        let catalog = load_catalog(&output)?;
        let ids: Vec<String> = catalog.into_facilities().into_iter().map(|f| f.id).collect();
        runs.push(ids);
    }

    let (first, second) = (&runs[0], &runs[1]);
    let first_set: BTreeSet<&String> = first.iter().collect();
    let second_set: BTreeSet<&String> = second.iter().collect();

    Ok(HarnessReport {
        first_run_records: first.len(),
        second_run_records: second.len(),
        stable: first == second,
        only_in_first: first_set
            .difference(&second_set)
            .map(|id| id.to_string())
            .collect(),
        only_in_second: second_set
            .difference(&first_set)
            .map(|id| id.to_string())
            .collect(),
    })
}

use anyhow::Result;
use clap::Parser;
use sportmap::config::{ScrapeConfig, load_config};
use sportmap::fetch::HttpFetcher;
use sportmap::harness::{HarnessOptions, run_harness};
use sportmap::pipeline::{ScrapeOptions, run_scrape};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sportmap", about = "Czech sports facility catalog scraper")]
struct Cli {
    #[arg(
        long,
        default_value = "all",
        value_parser = [
            "fitmapa",
            "sporteri",
            "multisport",
            "kdesportovat",
            "sportcentral",
            "sportovistevcr",
            "all",
        ]
    )]
    source: String,

    /// Maximum records per source.
    #[arg(long, default_value_t = 20)]
    limit: usize,

    #[arg(long, default_value = "facilities.json")]
    output: PathBuf,

    #[arg(long, default_value_t = false)]
    debug: bool,

    /// Optional TOML file with fetch, catalog, source and keyword settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fold listings of the same venue from different sources together.
    #[arg(long, default_value_t = false)]
    merge_duplicates: bool,

    /// Scrape twice into DIR and print an id stability report instead of
    /// writing `--output`.
    #[arg(long, value_name = "DIR")]
    harness: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug)?;

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ScrapeConfig::default(),
    };
    let fetcher = HttpFetcher::new(&config.fetch)?;

    if let Some(out_dir) = cli.harness {
        let report = run_harness(
            &config,
            &HarnessOptions {
                source: cli.source,
                limit: cli.limit,
                out_dir,
            },
            &fetcher,
        )?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let summary = run_scrape(
        &config,
        &ScrapeOptions {
            source: cli.source,
            limit: cli.limit,
            output: cli.output,
            merge_duplicates: cli.merge_duplicates,
        },
        &fetcher,
    )?;

    for report in &summary.reports {
        info!(
            source = %report.source_key,
            listing_pages = report.listing_pages,
            listing_failures = report.listing_failures,
            detail_pages = report.detail_pages,
            detail_failures = report.detail_failures,
            records = report.records,
            "source summary"
        );
    }
    info!(
        count = summary.count,
        output = %summary.output.display(),
        "scrape finished"
    );

    Ok(())
}

fn init_tracing(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("sportmap=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;
    Ok(())
}

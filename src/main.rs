//! helptables is a CLI tool that refreshes the `help_topic` descriptions of a
//! SQL seed file from fetched HTML documentation pages.
//!
//! A run reads the seed file, regenerates each topic's description from
//! `<fetched-dir>/<identifier>.html` (or a cached `.txt`), updates the
//! HELP_DATE row and writes the result to the output file.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Parser;
use env_logger::Builder;
use log::{LevelFilter, info};
use scraper::Selector as ScraperSelector;

use helptables::{
    HtmlConverter, SyncConfig, TextBy,
    constants::{DEFAULT_FETCHED_DIR, DEFAULT_OUTPUT_FILE, DEFAULT_SEED_FILE, DEFAULT_SNAPSHOT_DIR},
    sync::run,
};

/// A CLI tool to refresh help tables from fetched documentation pages
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed SQL file to read help topics from
    #[arg(long, default_value = DEFAULT_SEED_FILE)]
    seed: PathBuf,
    /// Path to output file to write the rewritten SQL to
    #[arg(long, short, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,
    /// Directory holding fetched <identifier>.html pages and cached .txt files
    #[arg(long, default_value = DEFAULT_FETCHED_DIR)]
    fetched_dir: PathBuf,
    /// Directory to write snapshots of the current descriptions to
    #[arg(long, default_value = DEFAULT_SNAPSHOT_DIR)]
    snapshot_dir: PathBuf,
    /// Reuse cached text files instead of converting every page again
    #[arg(long)]
    use_cache: bool,
    /// Neither read nor write any text files (snapshots and cache)
    #[arg(long)]
    no_text_cache: bool,
    /// Do not log progress messages
    #[arg(long, short)]
    quiet: bool,
    /// Text extraction method: "fast_html2md" (default) or "dom_smoothie"
    #[arg(long, default_value = "fast_html2md")]
    text_by: TextBy,
    /// CSS selector to limit the HTML subset from which content is extracted (optional)
    #[arg(long, short)]
    selector: Option<String>,
    /// Date to write into the HELP_DATE row (YYYY-MM-DD, default: today)
    #[arg(long)]
    date: Option<NaiveDate>,

    #[arg(long, short, action = clap::ArgAction::Count, help = "Output v(v...)erbosity: error (0), warn (1), info (2), debug (3), trace (4)", default_value_t = 2)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            3 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .init();

    let selector = match cli.selector {
        Some(selector_query) => Some(
            ScraperSelector::parse(&selector_query)
                .map_err(|e| anyhow::anyhow!("Invalid CSS selector: {}", e))?,
        ),
        None => None,
    };

    let config = SyncConfig {
        seed_file: cli.seed,
        output_file: cli.output,
        fetched_dir: cli.fetched_dir,
        snapshot_dir: cli.snapshot_dir,
        regenerate_always: !cli.use_cache,
        use_text_cache: !cli.no_text_cache,
        verbose: !cli.quiet,
        text_by: cli.text_by,
        selector,
    };
    let converter = HtmlConverter::new(config.text_by.clone(), config.selector.clone());
    let date = cli.date.unwrap_or_else(|| Local::now().date_naive());

    let report = run(&config, &converter, date)?;

    info!("{report}");
    info!("Seconds to execute: {:.2}", report.elapsed.as_secs_f64());
    Ok(())
}

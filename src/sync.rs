//! The sync module runs the whole pipeline: read the seed file, regenerate every
//! topic description, rewrite the SQL text and write it to the output file.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{debug, info};

use crate::config::SyncConfig;
use crate::parse::TextConverter;
use crate::regenerate::DescriptionSource;
use crate::rewrite::insert_into_help_table;
use crate::table::read_table_information;

/// How the output file compares with what was there before the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStatus {
    /// No output file existed before.
    Created,
    /// The output file existed with different contents.
    Updated,
    /// The output file already held the same contents.
    Unchanged,
}

impl OutputStatus {
    fn compare(previous: Option<&str>, current: &str) -> Self {
        match previous {
            None => Self::Created,
            Some(previous) if previous == current => Self::Unchanged,
            Some(_) => Self::Updated,
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub status: OutputStatus,
    pub output_file: PathBuf,
    pub topics: usize,
    pub elapsed: Duration,
}

impl fmt::Display for RunReport {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.output_file.display();
        match self.status {
            OutputStatus::Created => write!(formatter, "Wrote to {path}"),
            OutputStatus::Updated => write!(formatter, "Updated {path}"),
            OutputStatus::Unchanged => write!(formatter, "No change was made to {path}"),
        }
    }
}

/// Synchronises the seed file's topic descriptions with the fetched pages and
/// writes the result to the configured output file.
///
/// Nothing is written to the output file or the text cache unless every topic
/// has been regenerated and the table rewritten.
///
/// # Arguments
///
/// * `config` - Paths and flags for the run
/// * `converter` - HTML-to-text converter used for regenerated descriptions
/// * `date` - Date written into the HELP_DATE row
///
/// # Returns
///
/// Returns a [`RunReport`] describing how the output file changed
///
/// # Errors
///
/// Returns an error if:
/// * The snapshot directory cannot be created
/// * The seed file cannot be read or holds a malformed topic row
/// * A topic's source page is missing or cannot be converted
/// * The HELP_DATE marker row is missing or repeated
/// * The output file cannot be read or written
/// * A fresh conversion cannot be stored in the text cache
pub fn run(
    config: &SyncConfig,
    converter: &dyn TextConverter,
    date: NaiveDate,
) -> Result<RunReport> {
    let start = Instant::now();
    let previous = read_previous_output(&config.output_file)?;

    fs::create_dir_all(&config.snapshot_dir).with_context(|| {
        format!(
            "Failed to create snapshot directory: {}",
            config.snapshot_dir.display()
        )
    })?;

    let content = fs::read_to_string(&config.seed_file)
        .with_context(|| format!("Failed to read seed file: {}", config.seed_file.display()))?;

    if config.verbose {
        info!("Reading help tables from {}", config.seed_file.display());
    }
    let mut topics = read_table_information(&config.seed_file, config.snapshot_dir())?;

    if config.verbose {
        info!("Updating help tables");
    }
    let source = DescriptionSource {
        fetched_dir: &config.fetched_dir,
        regenerate_always: config.regenerate_always,
        use_text_cache: config.use_text_cache,
        converter,
    };
    let total = topics.len();
    let mut conversions = Vec::new();
    for (index, topic) in topics.iter_mut().enumerate() {
        let name = topic.identifier()?;
        let regenerated = source.new_description(&name)?;
        topic.new_description = regenerated.description;
        if let Some(text) = regenerated.converted {
            conversions.push((name, text));
        }
        if config.verbose {
            info!("Processed {}/{total} files", index + 1);
        }
    }

    let help_table = insert_into_help_table(&content, &topics, date)?;
    fs::write(&config.output_file, &help_table).with_context(|| {
        format!(
            "Failed to write output file: {}",
            config.output_file.display()
        )
    })?;
    source.store_conversions(&conversions)?;

    let report = RunReport {
        status: OutputStatus::compare(previous.as_deref(), &help_table),
        output_file: config.output_file.clone(),
        topics: total,
        elapsed: start.elapsed(),
    };
    debug!("{report:?}");

    Ok(report)
}

fn read_previous_output(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(previous) => Ok(Some(previous)),
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error)
            .with_context(|| format!("Failed to read previous output: {}", path.display())),
    }
}

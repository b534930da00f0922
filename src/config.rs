use std::path::{Path, PathBuf};

use scraper::Selector as ScraperSelector;

use crate::TextBy;
use crate::constants::{
    DEFAULT_FETCHED_DIR, DEFAULT_OUTPUT_FILE, DEFAULT_SEED_FILE, DEFAULT_SNAPSHOT_DIR,
};

/// Settings for one synchronisation run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Seed SQL file holding the current help tables.
    pub seed_file: PathBuf,
    /// Where the rewritten SQL is written.
    pub output_file: PathBuf,
    /// Directory with `<identifier>.html` pages and optional `<identifier>.txt` cache files.
    pub fetched_dir: PathBuf,
    /// Directory receiving `<identifier>.txt` snapshots of the pre-update descriptions.
    pub snapshot_dir: PathBuf,
    /// Always convert from HTML, ignoring cached text files.
    pub regenerate_always: bool,
    /// Read and write text files: snapshots, plus the conversion cache.
    pub use_text_cache: bool,
    /// Log progress messages.
    pub verbose: bool,
    pub text_by: TextBy,
    pub selector: Option<ScraperSelector>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            seed_file: PathBuf::from(DEFAULT_SEED_FILE),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            fetched_dir: PathBuf::from(DEFAULT_FETCHED_DIR),
            snapshot_dir: PathBuf::from(DEFAULT_SNAPSHOT_DIR),
            regenerate_always: true,
            use_text_cache: true,
            verbose: true,
            text_by: TextBy::default(),
            selector: None,
        }
    }
}

impl SyncConfig {
    /// Builds a configuration with every file and directory placed under `root`.
    pub fn rooted_at(root: &Path) -> Self {
        Self {
            seed_file: root.join(DEFAULT_SEED_FILE),
            output_file: root.join(DEFAULT_OUTPUT_FILE),
            fetched_dir: root.join(DEFAULT_FETCHED_DIR),
            snapshot_dir: root.join(DEFAULT_SNAPSHOT_DIR),
            ..Self::default()
        }
    }

    /// Snapshot directory, when snapshots are enabled.
    pub fn snapshot_dir(&self) -> Option<&Path> {
        self.use_text_cache.then_some(self.snapshot_dir.as_path())
    }
}

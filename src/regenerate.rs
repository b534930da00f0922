//! The regenerate module produces the new description of a topic, either by
//! converting its fetched HTML page or by loading a previously cached text file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{ESCAPED_NEWLINE, LINE_BREAK};
use crate::error::SyncError;
use crate::parse::TextConverter;

static LINE_BREAK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(LINE_BREAK).expect("Failed to compile LINE_BREAK regex"));

/// Joins the lines of `text` with literal `\n` sequences, as the seed file stores them.
///
/// Any line break (`\r\n`, a lone `\r`, vertical tab, form feed, `\u{2028}`, ...)
/// ends a line, and a single trailing break is dropped.
pub fn escape_newlines(text: &str) -> String {
    LINE_BREAK_REGEX
        .replace_all(text, "\n")
        .lines()
        .collect::<Vec<_>>()
        .join(ESCAPED_NEWLINE)
}

/// Turns literal `\n` sequences back into real newlines.
pub fn unescape_newlines(text: &str) -> String {
    text.replace(ESCAPED_NEWLINE, "\n")
}

/// A regenerated description, with the converted text when it did not come from the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regenerated {
    /// Newline-escaped description ready for the seed file.
    pub description: String,
    /// Freshly converted text, still to be stored in the cache.
    pub converted: Option<String>,
}

/// Source of regenerated descriptions for a run.
pub struct DescriptionSource<'a> {
    /// Directory with `<identifier>.html` pages and `<identifier>.txt` cache files.
    pub fetched_dir: &'a Path,
    /// Ignore cached text files and always convert.
    pub regenerate_always: bool,
    /// Read cached text files and store fresh conversions as new ones.
    pub use_text_cache: bool,
    pub converter: &'a dyn TextConverter,
}

impl DescriptionSource<'_> {
    /// Returns the new description for the topic `name`.
    ///
    /// Nothing is written here; fresh conversions are handed back so they can be
    /// cached with [`DescriptionSource::store_conversions`] once the run succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * The HTML page or cached text file is absent ([`SyncError::MissingSourceFile`])
    /// * The source cannot be read
    /// * The converter fails
    pub fn new_description(&self, name: &str) -> Result<Regenerated> {
        let cached = self.text_path(name);

        if self.regenerate_always || !self.use_text_cache || !cached.is_file() {
            let html = read_source(name, &self.html_path(name))?;
            let text = self
                .converter
                .format_to_text(&html, name)
                .with_context(|| format!("Failed to convert page: {name}"))?;
            return Ok(Regenerated {
                description: escape_newlines(&text),
                converted: self.use_text_cache.then_some(text),
            });
        }

        debug!("Using cached text for {name}");
        let text = read_source(name, &cached)?;
        Ok(Regenerated {
            description: escape_newlines(&text),
            converted: None,
        })
    }

    /// Writes each `(name, text)` conversion to `<identifier>.txt` in the fetched directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a cache file cannot be written.
    pub fn store_conversions(&self, conversions: &[(String, String)]) -> Result<()> {
        for (name, text) in conversions {
            let cached = self.text_path(name);
            fs::write(&cached, text)
                .with_context(|| format!("Failed to cache text: {}", cached.display()))?;
        }

        Ok(())
    }

    fn html_path(&self, name: &str) -> PathBuf {
        self.fetched_dir.join(format!("{name}.html"))
    }

    fn text_path(&self, name: &str) -> PathBuf {
        self.fetched_dir.join(format!("{name}.txt"))
    }
}

fn read_source(name: &str, path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|error| match error.kind() {
        ErrorKind::NotFound => anyhow::Error::from(SyncError::MissingSourceFile {
            topic: name.to_owned(),
            path: path.to_path_buf(),
        }),
        _ => anyhow::Error::new(error).context(format!("Failed to read {}", path.display())),
    })
}

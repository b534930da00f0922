//! The table module reads the `help_topic` rows out of a seed SQL file and
//! optionally snapshots their current descriptions to text files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use crate::regenerate::unescape_newlines;
use crate::topic::{TopicRecord, parse_topic_line};

/// Reads every documentation topic from the seed file at `path`.
///
/// Rows without a URL (such as the HELP_DATE marker) are dropped. When
/// `snapshot_dir` is given, each kept topic's current description is written
/// to `<identifier>.txt` there, with `\n` sequences turned into real newlines.
///
/// # Errors
///
/// Returns an error if:
/// * The seed file cannot be read
/// * A topic row is malformed ([`crate::SyncError::Parse`])
/// * A topic URL has no identifier ([`crate::SyncError::MalformedUrl`])
/// * A snapshot file cannot be written
pub fn read_table_information(
    path: &Path,
    snapshot_dir: Option<&Path>,
) -> Result<Vec<TopicRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file: {}", path.display()))?;

    let topics = extract_topics(&content)
        .with_context(|| format!("Failed to parse seed file: {}", path.display()))?;

    if let Some(dir) = snapshot_dir {
        write_snapshots(&topics, dir)?;
    }

    Ok(topics)
}

/// Parses the topics of an in-memory seed text, in order of appearance.
///
/// # Errors
///
/// Returns an error naming the offending line when a topic row is malformed.
pub fn extract_topics(content: &str) -> Result<Vec<TopicRecord>> {
    let mut topics = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let topic = parse_topic_line(line).with_context(|| format!("line {}", index + 1))?;
        if let Some(topic) = topic
            && !topic.url.is_empty()
        {
            topics.push(topic);
        }
    }

    debug!("Extracted {} topics", topics.len());
    Ok(topics)
}

/// Writes each topic's current description to `<identifier>.txt` in `dir`.
///
/// # Errors
///
/// Returns an error if an identifier cannot be derived or a file cannot be written.
pub fn write_snapshots(topics: &[TopicRecord], dir: &Path) -> Result<()> {
    for topic in topics {
        let file = dir.join(format!("{}.txt", topic.identifier()?));
        fs::write(&file, unescape_newlines(&topic.description))
            .with_context(|| format!("Failed to write snapshot: {}", file.display()))?;
    }

    Ok(())
}

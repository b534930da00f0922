//! The rewrite module splices regenerated descriptions back into the seed text,
//! refreshes the HELP_DATE sentence and strips stale `update help` statements.
//!
//! All substitutions are literal whole-text replacements. A description that is
//! a substring of a later one rewrites part of that later description first, and
//! the old date sentence is replaced wherever else it occurs.

use chrono::NaiveDate;
use log::debug;

use crate::constants::{
    CURRENT_KB_PATH, HELP_DATE_FORMAT, HELP_DATE_MARKER, HELP_DATE_SENTENCE, LEGACY_KB_PATH,
    STALE_LINE_PREFIX,
};
use crate::error::SyncError;
use crate::topic::{TopicRecord, parse_topic_line};

/// Replaces every occurrence of `old` in `text` with `new`.
///
/// An empty `old` leaves the text untouched.
pub fn replace_literal(text: &str, old: &str, new: &str) -> String {
    if old.is_empty() {
        return text.to_owned();
    }
    text.replace(old, new)
}

/// The HELP_DATE sentence for `date`, e.g.
/// `Help contents generated from the MariaDB Knowledge Base on 5 March 2024.`
pub fn help_date_sentence(date: NaiveDate) -> String {
    HELP_DATE_SENTENCE.replace("{date}", &date.format(HELP_DATE_FORMAT).to_string())
}

/// Finds the marker row and returns its current description.
///
/// # Errors
///
/// Returns an error if the marker row is absent, repeated or malformed.
pub fn help_date_description(text: &str) -> Result<String, SyncError> {
    let mut marker_lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| line.contains(HELP_DATE_MARKER));

    let (first, line) = marker_lines.next().ok_or(SyncError::MissingMarkerRow)?;
    if let Some((second, _)) = marker_lines.next() {
        return Err(SyncError::DuplicateMarkerRow {
            first: first + 1,
            second: second + 1,
        });
    }

    parse_topic_line(line)?
        .map(|topic| topic.description)
        .ok_or_else(|| SyncError::Parse {
            line: line.to_owned(),
        })
}

/// Replaces the HELP_DATE description with the sentence for `date`.
///
/// # Errors
///
/// Returns an error if the marker row is absent, repeated or malformed.
pub fn update_help_date(text: &str, date: NaiveDate) -> Result<String, SyncError> {
    let old_description = help_date_description(text)?;
    let new_description = help_date_sentence(date);
    debug!("HELP_DATE: '{old_description}' -> '{new_description}'");

    if old_description.is_empty() {
        return Ok(fill_empty_help_date(text, &new_description));
    }
    Ok(replace_literal(text, &old_description, &new_description))
}

/// Writes `description` into a marker row whose description is empty.
fn fill_empty_help_date(text: &str, description: &str) -> String {
    let empty = format!("{HELP_DATE_MARKER}'',");
    let filled = format!("{HELP_DATE_MARKER}'{description}',");

    text.split('\n')
        .map(|line| {
            if line.contains(HELP_DATE_MARKER) {
                line.replacen(&empty, &filled, 1)
            } else {
                line.to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drops every line starting with `update help`.
pub fn strip_stale_lines(text: &str) -> String {
    text.split('\n')
        .filter(|line| !line.starts_with(STALE_LINE_PREFIX))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Produces the final SQL text from the seed `text` and the updated topics.
///
/// Descriptions are substituted in `topics` order, then legacy knowledge base
/// URLs are rewritten, the HELP_DATE row is refreshed and stale lines removed.
///
/// # Errors
///
/// Returns an error if the HELP_DATE marker row is absent, repeated or malformed.
pub fn insert_into_help_table(
    text: &str,
    topics: &[TopicRecord],
    date: NaiveDate,
) -> Result<String, SyncError> {
    let mut help_table = text.to_owned();
    for topic in topics {
        help_table = replace_literal(&help_table, &topic.description, &topic.new_description);
    }

    let help_table = replace_literal(&help_table, LEGACY_KB_PATH, CURRENT_KB_PATH);
    let help_table = update_help_date(&help_table, date)?;

    Ok(strip_stale_lines(&help_table))
}

//! The topic module recognises `help_topic` insert rows and derives topic identifiers
//! from their documentation URLs.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{INSERT_PREFIX, TOPIC_PATTERN, URL_IDENTIFIER};
use crate::error::SyncError;

static TOPIC_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(TOPIC_PATTERN).expect("Failed to compile TOPIC_PATTERN regex"));

static URL_IDENTIFIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(URL_IDENTIFIER).expect("Failed to compile URL_IDENTIFIER regex"));

/// One parsed row of the `help_topic` table.
///
/// String fields hold the literal SQL-escaped text found between the quotes,
/// so `description` keeps its `\n` sequences as written in the seed file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TopicRecord {
    pub topic_id: String,
    pub category_id: String,
    pub name: String,
    pub description: String,
    /// Always empty: the row pattern cannot capture example content.
    pub example: String,
    pub url: String,
    /// Regenerated description, filled in during the update pass.
    pub new_description: String,
}

impl TopicRecord {
    /// Returns the short identifier derived from the record's URL.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::MalformedUrl`] if the URL has no path segment.
    pub fn identifier(&self) -> Result<String, SyncError> {
        identifier_of(&self.url)
    }

    /// Renders the record back into a single insert statement.
    pub fn to_insert_line(&self) -> String {
        format!(
            "{INSERT_PREFIX}{},{},'{}','{}','{}','{}');",
            self.topic_id, self.category_id, self.name, self.description, self.example, self.url
        )
    }
}

/// Returns the final path segment of a URL, ignoring one trailing slash.
///
/// `mariadb.com/kb/en/insert/` and `mariadb.com/kb/en/insert` both yield `insert`.
///
/// # Errors
///
/// Returns [`SyncError::MalformedUrl`] when no `/`-delimited segment can be found.
pub fn identifier_of(url: &str) -> Result<String, SyncError> {
    URL_IDENTIFIER_REGEX
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|segment| segment.as_str().to_owned())
        .ok_or_else(|| SyncError::MalformedUrl {
            url: url.to_owned(),
        })
}

/// Whether the line begins with the `help_topic` insert prefix.
pub fn is_topic_line(line: &str) -> bool {
    line.get(..INSERT_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(INSERT_PREFIX))
}

/// Parses one line of the seed file.
///
/// Returns `Ok(None)` for lines that are not `help_topic` inserts.
///
/// # Errors
///
/// Returns [`SyncError::Parse`] when the line carries the insert prefix but the
/// six fields cannot be recovered from it.
pub fn parse_topic_line(line: &str) -> Result<Option<TopicRecord>, SyncError> {
    if !is_topic_line(line) {
        return Ok(None);
    }

    let captures = TOPIC_REGEX.captures(line).ok_or_else(|| SyncError::Parse {
        line: line.to_owned(),
    })?;
    let field = |index: usize| {
        captures
            .get(index)
            .map(|m| m.as_str().to_owned())
            .unwrap_or_default()
    };

    Ok(Some(TopicRecord {
        topic_id: field(1),
        category_id: field(2),
        name: field(3),
        description: field(4),
        example: field(5),
        url: field(6),
        new_description: String::new(),
    }))
}

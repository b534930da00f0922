//! The helptables library refreshes the `help_topic` rows of a SQL seed file
//! with descriptions regenerated from fetched HTML documentation pages.

pub mod config;
pub mod constants;
pub mod error;
pub mod parse;
pub mod regenerate;
pub mod rewrite;
pub mod sync;
pub mod table;
pub mod topic;

/// Enum representing the text extraction method.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum TextBy {
    /// Use fast_html2md for text extraction
    #[default]
    FastHtml2Md,
    /// Use dom_smoothie for text extraction
    DomSmoothie,
}

impl std::str::FromStr for TextBy {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_lowercase().as_str() {
            "dom_smoothie" => Ok(TextBy::DomSmoothie),
            "fast_html2md" => Ok(TextBy::FastHtml2Md),
            _ => Err(format!("Invalid text extraction method: {}", input)),
        }
    }
}

pub use config::SyncConfig;
pub use error::SyncError;
pub use parse::{HtmlConverter, TextConverter};
pub use sync::{OutputStatus, RunReport, run};
pub use topic::{TopicRecord, identifier_of, parse_topic_line};

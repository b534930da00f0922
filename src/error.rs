//! Failure classes that abort a run before the output file is written.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyncError {
    /// A line starts with the help_topic insert prefix but does not match the full row shape.
    #[error("malformed help_topic insert: {line}")]
    Parse { line: String },

    #[error("missing source file {} for topic `{topic}`", .path.display())]
    MissingSourceFile { topic: String, path: PathBuf },

    #[error("no line containing ,'HELP_DATE', was found")]
    MissingMarkerRow,

    #[error("HELP_DATE row appears more than once (lines {first} and {second})")]
    DuplicateMarkerRow { first: usize, second: usize },

    #[error("cannot extract a topic identifier from url `{url}`")]
    MalformedUrl { url: String },
}

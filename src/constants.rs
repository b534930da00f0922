pub const DEFAULT_SEED_FILE: &str = "fill_help_tables.sql";
pub const DEFAULT_OUTPUT_FILE: &str = "new_help_tables.sql";
pub const DEFAULT_FETCHED_DIR: &str = "fetched_pages";
pub const DEFAULT_SNAPSHOT_DIR: &str = "current_text_files";

/// Lines must start with this literal (compared case-insensitively) to be read as a topic.
pub const INSERT_PREFIX: &str = "insert into help_topic (help_topic_id,help_category_id,name,description,example,url) values (";

/// The example group is `()` so it only ever captures the empty string.
pub(crate) const TOPIC_PATTERN: &str = r"(?i:insert into help_topic \(help_topic_id,help_category_id,name,description,example,url\) values )\((\d+),(\d+),'(.*)','(.*)','()','(.*)'\)";

pub(crate) const URL_IDENTIFIER: &str = r"/([^/]+)/?$";

pub const HELP_DATE_MARKER: &str = ",'HELP_DATE',";

pub const LEGACY_KB_PATH: &str = "mariadb.com/kb/en/library/";
pub const CURRENT_KB_PATH: &str = "mariadb.com/kb/en/";

pub const STALE_LINE_PREFIX: &str = "update help";

pub(crate) const HELP_DATE_FORMAT: &str = "%-d %B %Y";
pub(crate) const HELP_DATE_SENTENCE: &str =
    "Help contents generated from the MariaDB Knowledge Base on {date}.";

pub(crate) const ESCAPED_NEWLINE: &str = "\\n";

/// Every sequence that ends a line in converted text.
pub(crate) const LINE_BREAK: &str = r"\r\n|[\r\x0B\x0C\x1C-\x1E\x{85}\x{2028}\x{2029}]";

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use helptables::{SyncConfig, TextConverter, constants::INSERT_PREFIX};
use tempfile::TempDir;

#[macro_export]
macro_rules! assert_identifiers {
    (
        $(
            $test_name:ident : url => $url:expr, identifier => $identifier:expr
        ),+ $(,)?
    ) => {
        $(
            #[test]
            fn $test_name() {
                let result = helptables::identifier_of($url)
                    .expect("Expected an identifier.");

                assert_that(&result).is_equal_to($identifier.to_owned());
            }
        )+
    }
}

pub(crate) const OLD_DATE_SENTENCE: &str =
    "Help contents generated from the MariaDB Knowledge Base on 1 January 2020.";

pub(crate) fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date")
}

/// Builds one help_topic insert line.
pub(crate) fn insert_line(id: u32, name: &str, description: &str, url: &str) -> String {
    format!("{INSERT_PREFIX}{id},2,'{name}','{description}','','{url}');")
}

pub(crate) fn help_date_line(description: &str) -> String {
    format!("{INSERT_PREFIX}500,0,'HELP_DATE','{description}','','');")
}

pub(crate) fn seed_text() -> String {
    [
        "-- help tables".to_owned(),
        insert_line(
            1,
            "SELECT",
            "Old select\\nSee https://mariadb.com/kb/en/library/select/",
            "https://mariadb.com/kb/en/select/",
        ),
        insert_line(
            2,
            "INSERT",
            "Old insert",
            "https://mariadb.com/kb/en/library/insert/",
        ),
        help_date_line(OLD_DATE_SENTENCE),
        "update help_topic set description = 'stale' where help_topic_id = 1;".to_owned(),
        "commit;".to_owned(),
        String::new(),
    ]
    .join("\n")
}

/// Converter returning the trimmed page source and recording which pages it converted.
#[derive(Default)]
pub(crate) struct StubConverter {
    pub calls: RefCell<Vec<String>>,
}

impl TextConverter for StubConverter {
    fn format_to_text(&self, html: &str, page_name: &str) -> anyhow::Result<String> {
        self.calls.borrow_mut().push(page_name.to_owned());
        Ok(html.trim().to_owned())
    }
}

/// A temporary working directory laid out like a real run.
pub(crate) struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let fixture = Fixture {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        };
        fs::create_dir_all(fixture.config().fetched_dir).expect("Failed to create fetched dir");
        fixture
    }

    /// Fixture holding the standard seed file and a page for every topic.
    pub fn standard() -> Self {
        let fixture = Self::new();
        fixture.write_seed(&seed_text());
        fixture.write_page("select", "New select\nSELECT col FROM tbl;\n");
        fixture.write_page("insert", "New insert");
        fixture
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self) -> SyncConfig {
        SyncConfig {
            verbose: false,
            ..SyncConfig::rooted_at(self.root())
        }
    }

    pub fn write_seed(&self, content: &str) {
        fs::write(self.config().seed_file, content).expect("Failed to write seed");
    }

    pub fn write_page(&self, name: &str, html: &str) {
        fs::write(self.fetched(&format!("{name}.html")), html).expect("Failed to write page");
    }

    pub fn fetched(&self, file: &str) -> PathBuf {
        self.config().fetched_dir.join(file)
    }

    pub fn snapshot(&self, file: &str) -> PathBuf {
        self.config().snapshot_dir.join(file)
    }

    pub fn output(&self) -> String {
        fs::read_to_string(self.config().output_file).expect("Failed to read output")
    }
}

use crate::sync_extras::{OLD_DATE_SENTENCE, help_date_line, insert_line, run_date};
use chrono::NaiveDate;
use helptables::{
    SyncError, TopicRecord,
    regenerate::{escape_newlines, unescape_newlines},
    rewrite::{
        help_date_sentence, insert_into_help_table, replace_literal, strip_stale_lines,
        update_help_date,
    },
    table::extract_topics,
};
use spectral::prelude::*;

mod sync_extras;

const NEW_DATE_SENTENCE: &str =
    "Help contents generated from the MariaDB Knowledge Base on 5 March 2024.";

fn topic(description: &str, new_description: &str) -> TopicRecord {
    TopicRecord {
        description: description.to_owned(),
        new_description: new_description.to_owned(),
        ..TopicRecord::default()
    }
}

#[test]
fn date_sentence_uses_unpadded_day_and_month_name() {
    assert_that(&help_date_sentence(run_date())).is_equal_to(NEW_DATE_SENTENCE.to_owned());

    let date = NaiveDate::from_ymd_opt(2023, 12, 25).expect("valid date");
    assert_that(&help_date_sentence(date)).is_equal_to(
        "Help contents generated from the MariaDB Knowledge Base on 25 December 2023.".to_owned(),
    );
}

#[test]
fn updates_help_date_row() {
    let text = format!("commit;\n{}\n", help_date_line(OLD_DATE_SENTENCE));

    let updated = update_help_date(&text, run_date()).expect("Expected a marker row.");

    assert_that(&updated).is_equal_to(format!("commit;\n{}\n", help_date_line(NEW_DATE_SENTENCE)));
}

#[test]
fn fills_empty_help_date_row() {
    let text = format!("{}\ncommit;\n", help_date_line(""));

    let updated = update_help_date(&text, run_date()).expect("Expected a marker row.");

    assert_that(&updated).is_equal_to(format!("{}\ncommit;\n", help_date_line(NEW_DATE_SENTENCE)));
}

#[test]
fn missing_marker_row_is_an_error() {
    let text = insert_line(1, "SELECT", "text", "https://mariadb.com/kb/en/select/");

    assert_that(&update_help_date(&text, run_date())).is_err_containing(SyncError::MissingMarkerRow);
}

#[test]
fn repeated_marker_row_is_an_error() {
    let text = [
        help_date_line(OLD_DATE_SENTENCE),
        "commit;".to_owned(),
        help_date_line(OLD_DATE_SENTENCE),
    ]
    .join("\n");

    assert_that(&update_help_date(&text, run_date()))
        .is_err_containing(SyncError::DuplicateMarkerRow { first: 1, second: 3 });
}

#[test]
fn old_date_sentence_is_replaced_everywhere() {
    // The date sentence is substituted across the whole text, not only on the marker row.
    let text = [
        insert_line(
            1,
            "HELP",
            &format!("Last refresh: {OLD_DATE_SENTENCE}"),
            "https://mariadb.com/kb/en/help/",
        ),
        help_date_line(OLD_DATE_SENTENCE),
    ]
    .join("\n");

    let updated = update_help_date(&text, run_date()).expect("Expected a marker row.");

    assert_that(&updated.matches(NEW_DATE_SENTENCE).count()).is_equal_to(2);
    assert_that(&updated.contains(OLD_DATE_SENTENCE)).is_false();
}

#[test]
fn empty_search_text_leaves_text_untouched() {
    assert_that(&replace_literal("abc", "", "x")).is_equal_to("abc".to_owned());
    assert_that(&replace_literal("a-b-a", "a", "c")).is_equal_to("c-b-c".to_owned());
}

#[test]
fn strips_update_help_lines() {
    let text = "a;\nupdate help_topic set name = 'x';\nupdate help_category set url = '';\n  update help ok;\nb;\n";

    assert_that(&strip_stale_lines(text)).is_equal_to("a;\n  update help ok;\nb;\n".to_owned());
}

#[test]
fn escaping_round_trip() {
    let text = "First line\n\n  indented line\nlast line";

    assert_that(&escape_newlines(text)).is_equal_to("First line\\n\\n  indented line\\nlast line".to_owned());
    assert_that(&unescape_newlines(&escape_newlines(text))).is_equal_to(text.to_owned());
}

#[test]
fn every_line_break_is_escaped() {
    let text = "carriage\rreturn\r\nwindows\x0bvertical\x0cfeed\u{2028}separator\n";

    assert_that(&escape_newlines(text)).is_equal_to(
        "carriage\\nreturn\\nwindows\\nvertical\\nfeed\\nseparator".to_owned(),
    );
    assert_that(&escape_newlines(text).contains('\r')).is_false();
}

#[test]
fn rewrites_descriptions_urls_date_and_stale_lines() {
    let text = [
        insert_line(
            1,
            "SELECT",
            "Old select",
            "https://mariadb.com/kb/en/library/select/",
        ),
        help_date_line(OLD_DATE_SENTENCE),
        "update help_topic set description = 'stale';".to_owned(),
        String::new(),
    ]
    .join("\n");
    let mut topics = extract_topics(&text).expect("Expected valid rows.");
    for topic in &mut topics {
        topic.new_description = "New select\\nSee https://mariadb.com/kb/en/library/from/".to_owned();
    }

    let help_table = insert_into_help_table(&text, &topics, run_date()).expect("Expected a marker row.");

    assert_that(&help_table).is_equal_to(
        [
            insert_line(
                1,
                "SELECT",
                "New select\\nSee https://mariadb.com/kb/en/from/",
                "https://mariadb.com/kb/en/select/",
            ),
            help_date_line(NEW_DATE_SENTENCE),
            String::new(),
        ]
        .join("\n"),
    );
}

#[test]
fn substring_description_rewrites_later_description_first() {
    // A description contained in a later one is substituted inside it too, so the
    // later record no longer finds its own description and keeps the mixed text.
    let text = [
        insert_line(1, "ROWS", "Counts rows", "https://mariadb.com/kb/en/rows/"),
        insert_line(
            2,
            "ROWS_EX",
            "Counts rows in a table",
            "https://mariadb.com/kb/en/rows-ex/",
        ),
        help_date_line(OLD_DATE_SENTENCE),
    ]
    .join("\n");
    let topics = [
        topic("Counts rows", "ONE"),
        topic("Counts rows in a table", "TWO"),
    ];

    let help_table = insert_into_help_table(&text, &topics, run_date()).expect("Expected a marker row.");

    assert_that(&help_table.contains("'ROWS_EX','ONE in a table'")).is_true();
    assert_that(&help_table.contains("TWO")).is_false();
}

#[test]
fn substring_description_is_safe_when_longer_comes_first() {
    let text = [
        insert_line(1, "ROWS", "Counts rows", "https://mariadb.com/kb/en/rows/"),
        insert_line(
            2,
            "ROWS_EX",
            "Counts rows in a table",
            "https://mariadb.com/kb/en/rows-ex/",
        ),
        help_date_line(OLD_DATE_SENTENCE),
    ]
    .join("\n");
    let topics = [
        topic("Counts rows in a table", "TWO"),
        topic("Counts rows", "ONE"),
    ];

    let help_table = insert_into_help_table(&text, &topics, run_date()).expect("Expected a marker row.");

    assert_that(&help_table.contains("'ROWS','ONE'")).is_true();
    assert_that(&help_table.contains("'ROWS_EX','TWO'")).is_true();
}

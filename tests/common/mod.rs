// tests/common/mod.rs
//
// Small appearance database shared by the integration tests.
//
// Alice: regular shows in 2016, 2017 and twice in 2018, plus a best-of in 2019.
// Bob:   one regular show in 2018, plus a repeat in 2020.
// Carol: only the 2019 best-of and the 2020 repeat.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use panelist_report::config::ReportSettings;
use panelist_report::store::SqliteStore;
use rusqlite::Connection;

pub const ALICE: i64 = 1;
pub const BOB: i64 = 2;
pub const CAROL: i64 = 3;

const SCHEMA: &str = "
    CREATE TABLE ww_panelists (
        panelistid INTEGER PRIMARY KEY,
        panelist   TEXT NOT NULL
    );
    CREATE TABLE ww_shows (
        showid       INTEGER PRIMARY KEY,
        showdate     TEXT NOT NULL,
        bestof       INTEGER NOT NULL DEFAULT 0,
        repeatshowid INTEGER NULL
    );
    CREATE TABLE ww_showpnlmap (
        showpnlmapid INTEGER PRIMARY KEY,
        showid       INTEGER NOT NULL,
        panelistid   INTEGER NOT NULL
    );";

const DATA: &str = "
    INSERT INTO ww_panelists (panelistid, panelist) VALUES
        (1, 'Alice'), (2, 'Bob'), (3, 'Carol');
    INSERT INTO ww_shows (showid, showdate, bestof, repeatshowid) VALUES
        (1, '2016-01-02', 0, NULL),
        (2, '2017-03-04', 0, NULL),
        (3, '2018-05-06', 0, NULL),
        (4, '2018-07-07', 0, NULL),
        (5, '2019-12-28', 1, NULL),
        (6, '2020-01-04', 0, 2);
    INSERT INTO ww_showpnlmap (showid, panelistid) VALUES
        (1, 1), (2, 1), (3, 1), (4, 1), (5, 1),
        (3, 2), (6, 2),
        (5, 3), (6, 3);";

pub fn seed(conn: &Connection) {
    conn.execute_batch(SCHEMA).unwrap();
    conn.execute_batch(DATA).unwrap();
}

pub fn memory_store() -> SqliteStore {
    let conn = Connection::open_in_memory().unwrap();
    seed(&conn);
    SqliteStore::from_connection(conn)
}

/// Seeded database file inside `dir`.
pub fn db_file(dir: &Path) -> PathBuf {
    let path = dir.join("wwdtm.sqlite");
    let conn = Connection::open(&path).unwrap();
    seed(&conn);
    path
}

/// Stylesheet + template under `dir`, settings pointing at `dir/out`.
pub fn report_fixture(dir: &Path) -> (ReportSettings, PathBuf) {
    let css_dir = dir.join("css");
    let template_dir = dir.join("template");
    fs::create_dir_all(&css_dir).unwrap();
    fs::create_dir_all(&template_dir).unwrap();
    fs::write(css_dir.join("style.css"), "body { margin: 0; }\n").unwrap();
    fs::write(
        template_dir.join("report.tmpl.html"),
        "<link href=\"{{ css_filename }}\">\n\
         <tr>{{ year_headers }}</tr>\n\
         {{ panelist_rows }}\
         <footer>{{ rendered_at }}</footer>\n",
    )
    .unwrap();

    let settings = ReportSettings {
        ga_property_code: String::new(),
        css_directory: css_dir.to_string_lossy().into_owned(),
        css_filename: "style.css".into(),
        output_directory: dir.join("out").to_string_lossy().into_owned(),
        output_filename: "index.html".into(),
    };
    (settings, template_dir)
}

// src/store.rs
//! Read-only access to the appearance-tracking database.
//!
//! Countable appearances are those on shows that are neither a best-of nor a
//! repeat. The show-year list is taken from every show, filtered or not.

use std::path::Path;

use rusqlite::{params, Connection, OpenFlags};

use crate::aggregate::AppearanceRecord;
use crate::error::{ReportError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Panelist {
    pub id: i64,
    pub name: String,
}

/// The queries the report needs. Implement this to report from another store.
pub trait AppearanceSource {
    /// Panelists with at least one countable appearance, ordered by name.
    fn panelists(&self) -> Result<Vec<Panelist>>;

    /// Year-grouped counts for every panelist, ordered by name then year.
    fn appearances(&self) -> Result<Vec<AppearanceRecord>>;

    /// Year-grouped counts for one panelist, ordered by year.
    fn appearances_for(&self, panelist_id: i64) -> Result<Vec<AppearanceRecord>>;

    /// Year of every show in the catalog, best-of and repeats included.
    fn show_years(&self) -> Result<Vec<i32>>;
}

const PANELISTS_SQL: &str = "
    SELECT DISTINCT p.panelistid, p.panelist
    FROM ww_panelists p
    JOIN ww_showpnlmap pm ON pm.panelistid = p.panelistid
    JOIN ww_shows s ON s.showid = pm.showid
    WHERE s.bestof = 0 AND s.repeatshowid IS NULL
    ORDER BY p.panelist ASC";

const APPEARANCES_SQL: &str = "
    SELECT p.panelist,
           CAST(strftime('%Y', s.showdate) AS INTEGER) AS year,
           COUNT(p.panelist) AS count
    FROM ww_showpnlmap pm
    JOIN ww_shows s ON s.showid = pm.showid
    JOIN ww_panelists p ON p.panelistid = pm.panelistid
    WHERE s.bestof = 0 AND s.repeatshowid IS NULL
    GROUP BY p.panelist, year
    ORDER BY p.panelist ASC, year ASC";

const APPEARANCES_FOR_SQL: &str = "
    SELECT p.panelist,
           CAST(strftime('%Y', s.showdate) AS INTEGER) AS year,
           COUNT(p.panelist) AS count
    FROM ww_showpnlmap pm
    JOIN ww_shows s ON s.showid = pm.showid
    JOIN ww_panelists p ON p.panelistid = pm.panelistid
    WHERE s.bestof = 0 AND s.repeatshowid IS NULL
      AND pm.panelistid = ?1
    GROUP BY p.panelist, year
    ORDER BY year ASC";

const SHOW_YEARS_SQL: &str = "
    SELECT DISTINCT CAST(strftime('%Y', s.showdate) AS INTEGER) AS year
    FROM ww_shows s
    ORDER BY year ASC";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open an existing database file read-only.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| ReportError::data(format!("cannot open {}", path.display()), e))?;
        log::debug!("Opened appearance store {}", path.display());
        Ok(Self { conn })
    }

    /// Wrap an already-open connection (in-memory fixtures, tests).
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    fn query_records(
        &self,
        sql: &str,
        args: impl rusqlite::Params,
        what: &str,
    ) -> Result<Vec<AppearanceRecord>> {
        let mut stmt = self.conn.prepare(sql).map_err(|e| ReportError::data(what, e))?;
        let rows = stmt
            .query_map(args, |row| {
                Ok(AppearanceRecord {
                    panelist: row.get(0)?,
                    year: row.get(1)?,
                    count: row.get(2)?,
                })
            })
            .map_err(|e| ReportError::data(what, e))?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row.map_err(|e| ReportError::data(what, e))?);
        }
        Ok(out)
    }
}

impl AppearanceSource for SqliteStore {
    fn panelists(&self) -> Result<Vec<Panelist>> {
        let what = "panelist list query";
        let mut stmt = self.conn.prepare(PANELISTS_SQL).map_err(|e| ReportError::data(what, e))?;
        let rows = stmt
            .query_map(params![], |row| Ok(Panelist { id: row.get(0)?, name: row.get(1)? }))
            .map_err(|e| ReportError::data(what, e))?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row.map_err(|e| ReportError::data(what, e))?);
        }
        Ok(out)
    }

    fn appearances(&self) -> Result<Vec<AppearanceRecord>> {
        self.query_records(APPEARANCES_SQL, params![], "appearance count query")
    }

    fn appearances_for(&self, panelist_id: i64) -> Result<Vec<AppearanceRecord>> {
        self.query_records(
            APPEARANCES_FOR_SQL,
            params![panelist_id],
            "panelist appearance count query",
        )
    }

    fn show_years(&self) -> Result<Vec<i32>> {
        let what = "show year query";
        let mut stmt = self.conn.prepare(SHOW_YEARS_SQL).map_err(|e| ReportError::data(what, e))?;
        let rows = stmt
            .query_map(params![], |row| row.get::<_, i32>(0))
            .map_err(|e| ReportError::data(what, e))?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row.map_err(|e| ReportError::data(what, e))?);
        }
        Ok(out)
    }
}

//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `customers`, `occupancy_log` and `day_summaries`.  Opening
//! a writer replaces any tables left by an earlier run in the same directory.

use std::path::Path;

use rusqlite::Connection;

use crate::{CustomerRow, DaySummaryRow, EventRow, OutputResult};
use crate::writer::OutputWriter;

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and recreate the schema empty.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             DROP TABLE IF EXISTS customers;
             DROP TABLE IF EXISTS occupancy_log;
             DROP TABLE IF EXISTS day_summaries;
             CREATE TABLE customers (
                 customer       INTEGER PRIMARY KEY,
                 day            INTEGER NOT NULL,
                 arrival_time   REAL    NOT NULL,
                 wait_time      REAL    NOT NULL,
                 departure_time REAL    NOT NULL,
                 time_in_system REAL    NOT NULL
             );
             CREATE TABLE occupancy_log (
                 day       INTEGER NOT NULL,
                 time      REAL    NOT NULL,
                 occupancy INTEGER NOT NULL,
                 kind      TEXT    NOT NULL
             );
             CREATE TABLE day_summaries (
                 day        INTEGER PRIMARY KEY,
                 arrivals   INTEGER NOT NULL,
                 departures INTEGER NOT NULL,
                 overtime   REAL    NOT NULL,
                 busy_time  REAL    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_customers(&mut self, rows: &[CustomerRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO customers \
                 (customer, day, arrival_time, wait_time, departure_time, time_in_system) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.customer,
                    row.day,
                    row.arrival_time,
                    row.wait_time,
                    row.departure_time,
                    row.time_in_system,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO occupancy_log (day, time, occupancy, kind) \
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.day,
                    row.time,
                    row.occupancy,
                    row.kind.to_string(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_day_summary(&mut self, row: &DaySummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO day_summaries (day, arrivals, departures, overtime, busy_time) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![row.day, row.arrivals, row.departures, row.overtime, row.busy_time],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}

//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `customers.csv`
//! - `occupancy_log.csv`
//! - `day_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{CustomerRow, DaySummaryRow, EventRow, OutputResult};
use crate::writer::OutputWriter;

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    customers: Writer<File>,
    events:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut customers = Writer::from_path(dir.join("customers.csv"))?;
        customers.write_record([
            "customer",
            "day",
            "arrival_time",
            "wait_time",
            "departure_time",
            "time_in_system",
        ])?;

        let mut events = Writer::from_path(dir.join("occupancy_log.csv"))?;
        events.write_record(["day", "time", "occupancy", "kind"])?;

        let mut summaries = Writer::from_path(dir.join("day_summaries.csv"))?;
        summaries.write_record(["day", "arrivals", "departures", "overtime", "busy_time"])?;

        Ok(Self { customers, events, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_customers(&mut self, rows: &[CustomerRow]) -> OutputResult<()> {
        for row in rows {
            self.customers.write_record(&[
                row.customer.to_string(),
                row.day.to_string(),
                row.arrival_time.to_string(),
                row.wait_time.to_string(),
                row.departure_time.to_string(),
                row.time_in_system.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[
                row.day.to_string(),
                row.time.to_string(),
                row.occupancy.to_string(),
                row.kind.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_day_summary(&mut self, row: &DaySummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.day.to_string(),
            row.arrivals.to_string(),
            row.departures.to_string(),
            row.overtime.to_string(),
            row.busy_time.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.customers.flush()?;
        self.events.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}

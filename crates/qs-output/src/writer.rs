//! The `OutputWriter` trait implemented by all backend writers.

use crate::{CustomerRow, DaySummaryRow, EventRow, OutputResult};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors surface to the observer, which stores them for
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of served customers.
    fn write_customers(&mut self, rows: &[CustomerRow]) -> OutputResult<()>;

    /// Write a batch of occupancy-log entries.
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()>;

    /// Write one day summary row.
    fn write_day_summary(&mut self, row: &DaySummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

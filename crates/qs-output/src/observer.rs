//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use qs_core::SimConfig;
use qs_engine::stats::clipped_busy_time;
use qs_engine::{DayOutcome, SimObserver, SimSummary};

use crate::row::{CustomerRow, DaySummaryRow, EventRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes customers, occupancy-log entries and day
/// summaries to any [`OutputWriter`] backend (CSV, SQLite).
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:        W,
    open:          f64,
    close:         f64,
    next_customer: u64,
    last_error:    Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config`'s operating
    /// window to clip busy time.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            open:          config.open_time,
            close:         config.close_time,
            next_customer: 0,
            last_error:    None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_day_end(&mut self, outcome: &DayOutcome) {
        let first = self.next_customer;
        let customers: Vec<CustomerRow> = outcome
            .customers
            .iter()
            .zip(first..)
            .map(|(c, customer)| CustomerRow {
                customer,
                day:            c.service_day,
                arrival_time:   c.arrival_time,
                wait_time:      c.wait_time,
                departure_time: c.departure_time,
                time_in_system: c.time_in_system(),
            })
            .collect();
        self.next_customer += customers.len() as u64;

        let events: Vec<EventRow> = outcome
            .events
            .iter()
            .map(|e| EventRow { day: e.day, time: e.time, occupancy: e.occupancy, kind: e.kind })
            .collect();

        let busy_time = clipped_busy_time(&outcome.busy, self.open, self.close);
        let summary = DaySummaryRow {
            day:        outcome.day,
            arrivals:   outcome.arrivals,
            departures: outcome.departures,
            overtime:   outcome.overtime,
            busy_time,
        };

        if !customers.is_empty() {
            let result = self.writer.write_customers(&customers);
            self.store_err(result);
        }
        if !events.is_empty() {
            let result = self.writer.write_events(&events);
            self.store_err(result);
        }
        let result = self.writer.write_day_summary(&summary);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _summary: &SimSummary) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}

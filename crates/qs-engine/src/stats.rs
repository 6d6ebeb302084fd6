//! Summary statistics: pure reductions over a run's accumulated logs.
//!
//! All time-weighted metrics are normalised by the total scheduled operating
//! time `(close - open) · num_days`; activity after closing (overwork) is
//! excluded from them and reported separately as overtime.

use crate::customer::CustomerRecord;
use crate::log::{BusyInterval, OccupancyEntry};

/// All summary metrics of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimSummary {
    pub arrivals:               u64,
    pub departures:             u64,
    pub overtime:               f64,
    pub average_time_in_system: f64,
    pub average_waiting_time:   f64,
    pub average_queue_length:   f64,
    pub device_occupancy:       f64,
}

/// Mean of `departure - arrival` over all customers; 0 with no customers.
pub fn average_time_in_system(customers: &[CustomerRecord]) -> f64 {
    mean(customers.iter().map(CustomerRecord::time_in_system), customers.len())
}

/// Mean waiting time over all customers; 0 with no customers.
pub fn average_waiting_time(customers: &[CustomerRecord]) -> f64 {
    mean(customers.iter().map(|c| c.wait_time), customers.len())
}

/// Time-averaged number of customers waiting (not in service) during
/// opening hours.
///
/// Per day, the piecewise-constant `max(n - 1, 0)` is integrated from `open`
/// to `close`; entries after `close` are ignored and the last segment is cut
/// at `close`.  Entries of different days are never paired.
pub fn average_queue_length(
    events:         &[OccupancyEntry],
    open:           f64,
    close:          f64,
    operating_time: f64,
) -> f64 {
    let area: f64 = events
        .chunk_by(|a, b| a.day == b.day)
        .map(|day_events| {
            let mut area = 0.0;
            let mut prev_time = open;
            let mut prev_waiting = 0u32;
            for entry in day_events.iter().take_while(|e| e.time <= close) {
                area += (entry.time - prev_time) * prev_waiting as f64;
                prev_time = entry.time;
                prev_waiting = entry.occupancy.saturating_sub(1);
            }
            area + (close - prev_time) * prev_waiting as f64
        })
        .sum();
    ratio(area, operating_time)
}

/// Fraction of the scheduled operating time the server was busy.
///
/// Each busy interval is clipped to `[open, close]` of its day.
pub fn device_occupancy(
    busy:           &[BusyInterval],
    open:           f64,
    close:          f64,
    operating_time: f64,
) -> f64 {
    ratio(clipped_busy_time(busy, open, close), operating_time)
}

/// Total busy time inside the daily window `[open, close]`.
pub fn clipped_busy_time(busy: &[BusyInterval], open: f64, close: f64) -> f64 {
    busy.iter().map(|b| b.clipped(open, close).duration()).sum()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    values.sum::<f64>() / count as f64
}

fn ratio(numerator: f64, operating_time: f64) -> f64 {
    if operating_time > 0.0 { numerator / operating_time } else { 0.0 }
}

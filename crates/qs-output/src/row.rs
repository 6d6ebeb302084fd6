//! Plain data row types written by output backends.

use qs_engine::EventKind;

/// One served customer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomerRow {
    /// Position in arrival order across the whole run, starting at 0.
    pub customer:       u64,
    pub day:            u32,
    pub arrival_time:   f64,
    pub wait_time:      f64,
    pub departure_time: f64,
    pub time_in_system: f64,
}

/// System size right after one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventRow {
    pub day:       u32,
    pub time:      f64,
    pub occupancy: u32,
    pub kind:      EventKind,
}

/// Per-day totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaySummaryRow {
    pub day:        u32,
    pub arrivals:   u64,
    pub departures: u64,
    pub overtime:   f64,
    /// Server busy time inside opening hours.
    pub busy_time:  f64,
}

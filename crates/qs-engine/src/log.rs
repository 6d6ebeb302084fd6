//! Event log and busy-interval entries.

use std::fmt;

/// What changed the system size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A customer arrived before (or exactly at) closing time.
    Arrival,
    /// A customer left during opening hours.
    Departure,
    /// A customer left after closing time.
    Overwork,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EventKind::Arrival   => "arrival",
            EventKind::Departure => "departure",
            EventKind::Overwork  => "overwork",
        })
    }
}

/// System size `n` immediately after an event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OccupancyEntry {
    pub day:       u32,
    pub time:      f64,
    pub occupancy: u32,
    pub kind:      EventKind,
}

/// A maximal span `[start, end]` during which the server was busy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BusyInterval {
    pub day:   u32,
    pub start: f64,
    pub end:   f64,
}

impl BusyInterval {
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// The part of the interval inside `[open, close]`; empty (zero length)
    /// when the two do not overlap.
    pub fn clipped(&self, open: f64, close: f64) -> Self {
        let start = self.start.max(open);
        let end = self.end.min(close).max(start);
        Self { day: self.day, start, end }
    }
}

//! The per-day event loop.
//!
//! # State
//!
//! | Var  | Meaning                                                    |
//! |------|------------------------------------------------------------|
//! | `n`  | customers in the system (queue length including service)   |
//! | `ta` | next arrival; `close + 1` once the day's arrivals run out  |
//! | `td` | next departure; `+∞` while the server is idle              |
//!
//! # Step priority
//!
//! ```text
//! ① Arrival    ta ≤ td  and ta ≤ T
//! ② Departure  td < ta  and td ≤ T
//! ③ Overwork   min(ta, td) > T and n > 0
//! ④ Close      min(ta, td) > T and n = 0     → day ends
//! ```
//!
//! Ties `ta == td` go to the arrival.  Every step consumes one arrival or
//! one departure, and the arrival sequence is finite, so the loop always
//! reaches ④.

use std::collections::VecDeque;

use qs_arrival::ArrivalProcess;
use qs_core::{CustomerId, DayRng, SimConfig};
use tracing::{debug, trace};

use crate::customer::{CustomerRecord, CustomerTable};
use crate::log::{BusyInterval, EventKind, OccupancyEntry};
use crate::{ServiceTime, SimError, SimResult};

// ── Outcome ───────────────────────────────────────────────────────────────────

/// Everything one simulated day produced.
///
/// Days are simulated into outcomes first and merged into the run's
/// accumulated logs afterwards, so a failing day leaves no partial results.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DayOutcome {
    pub day:        u32,
    /// Served customers in arrival order.
    pub customers:  Vec<CustomerRecord>,
    pub events:     Vec<OccupancyEntry>,
    pub busy:       Vec<BusyInterval>,
    pub arrivals:   u64,
    pub departures: u64,
    /// Time the server worked past closing.
    pub overtime:   f64,
}

/// Which of the four mutually exclusive transitions fires next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    Arrival,
    Departure,
    Overwork,
    Close,
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Generate `day`'s arrivals and run the day to its Close event.
pub(crate) fn simulate_day<A, S>(
    day:      u32,
    config:   &SimConfig,
    arrivals: &A,
    service:  &S,
    mut rng:  DayRng,
) -> SimResult<DayOutcome>
where
    A: ArrivalProcess + ?Sized,
    S: ServiceTime + ?Sized,
{
    let times = arrivals.generate(day, &mut rng)?;
    check_arrivals(day, &times, config)?;
    let outcome = DayRun::new(day, config.close_time, times, service, &mut rng).run();

    debug!(
        day,
        arrivals   = outcome.arrivals,
        departures = outcome.departures,
        overtime   = outcome.overtime,
        "day closed"
    );
    Ok(outcome)
}

/// Arrivals must be finite, strictly increasing, and inside `[open, close]`.
fn check_arrivals(day: u32, times: &[f64], config: &SimConfig) -> SimResult<()> {
    let invalid = |reason: String| SimError::InvalidArrivals { day, reason };

    if let Some(&t) = times
        .iter()
        .find(|&&t| !(t.is_finite() && config.open_time <= t && t <= config.close_time))
    {
        return Err(invalid(format!(
            "arrival at {t} is outside [{}, {}]",
            config.open_time, config.close_time
        )));
    }
    if let Some(w) = times.windows(2).find(|w| w[0] >= w[1]) {
        return Err(invalid(format!("arrival {} does not follow {}", w[1], w[0])));
    }
    Ok(())
}

/// Pick the transition for the current `(ta, td, n)`.
pub(crate) fn next_step(ta: f64, td: f64, close: f64, occupancy: u32) -> Step {
    if ta <= td && ta <= close {
        Step::Arrival
    } else if td < ta && td <= close {
        Step::Departure
    } else if occupancy > 0 {
        // Both clocks are past closing here.
        Step::Overwork
    } else {
        Step::Close
    }
}

// ── Day state machine ─────────────────────────────────────────────────────────

struct DayRun<'a, S: ServiceTime + ?Sized> {
    day:      u32,
    close:    f64,
    service:  &'a S,
    rng:      &'a mut DayRng,

    pending:  std::vec::IntoIter<f64>,
    table:    CustomerTable,
    /// FCFS order; the head is in service whenever the queue is non-empty.
    queue:    VecDeque<CustomerId>,

    ta:             f64,
    td:             f64,
    last_departure: Option<f64>,
    busy_since:     Option<f64>,

    events:     Vec<OccupancyEntry>,
    busy:       Vec<BusyInterval>,
    arrivals:   u64,
    departures: u64,
}

impl<'a, S: ServiceTime + ?Sized> DayRun<'a, S> {
    fn new(day: u32, close: f64, times: Vec<f64>, service: &'a S, rng: &'a mut DayRng) -> Self {
        let mut pending = times.into_iter();
        let ta = pending.next().unwrap_or(close + 1.0);
        Self {
            day,
            close,
            service,
            rng,
            pending,
            table: CustomerTable::new(),
            queue: VecDeque::new(),
            ta,
            td: f64::INFINITY,
            last_departure: None,
            busy_since: None,
            events: Vec::new(),
            busy: Vec::new(),
            arrivals: 0,
            departures: 0,
        }
    }

    #[inline]
    fn occupancy(&self) -> u32 {
        self.queue.len() as u32
    }

    fn run(mut self) -> DayOutcome {
        loop {
            match next_step(self.ta, self.td, self.close, self.occupancy()) {
                Step::Arrival   => self.arrive(),
                Step::Departure => self.depart(EventKind::Departure),
                Step::Overwork  => self.depart(EventKind::Overwork),
                Step::Close     => break,
            }
        }

        let overtime = self.last_departure.map_or(0.0, |t| (t - self.close).max(0.0));
        DayOutcome {
            day:        self.day,
            customers:  self.table.into_records(),
            events:     self.events,
            busy:       self.busy,
            arrivals:   self.arrivals,
            departures: self.departures,
            overtime,
        }
    }

    fn arrive(&mut self) {
        let t = self.ta;
        let id = self.table.push(t);
        self.queue.push_back(id);
        self.arrivals += 1;
        self.record(t, EventKind::Arrival);

        if self.occupancy() == 1 {
            self.busy_since = Some(t);
            self.start_service(id, t);
        }

        self.ta = self.pending.next().unwrap_or(self.close + 1.0);
    }

    /// Shared by Departure and Overwork: the head leaves at `td`.
    fn depart(&mut self, kind: EventKind) {
        let t = self.td;
        self.queue.pop_front();
        self.departures += 1;
        self.last_departure = Some(t);
        self.record(t, kind);

        match self.queue.front().copied() {
            Some(next) => self.start_service(next, t),
            None => {
                // Close the busy interval before anything can reopen service.
                if let Some(start) = self.busy_since.take() {
                    self.busy.push(BusyInterval { day: self.day, start, end: t });
                }
                self.td = f64::INFINITY;
            }
        }
    }

    fn start_service(&mut self, id: CustomerId, start: f64) {
        let departure = start + self.service.sample(self.rng);
        self.td = departure;
        self.table.begin_service(id, self.day, start, departure);
    }

    fn record(&mut self, time: f64, kind: EventKind) {
        let occupancy = self.occupancy();
        trace!(day = self.day, time, occupancy, %kind, "event");
        self.events.push(OccupancyEntry { day: self.day, time, occupancy, kind });
    }
}

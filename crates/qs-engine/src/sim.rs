//! The `QueueSim` struct and its multi-day driver.

use qs_arrival::ArrivalProcess;
use qs_core::{DayRng, SimConfig, SimRng};
use tracing::info;

use crate::customer::CustomerRecord;
use crate::day::{simulate_day, DayOutcome};
use crate::log::{BusyInterval, OccupancyEntry};
use crate::stats::{self, SimSummary};
use crate::{ServiceTime, SimError, SimObserver, SimResult};

/// The single-server, first-come-first-served counter simulator.
///
/// `QueueSim<A, S>` owns every accumulated log of a run:
///
/// - the served-customer table, in arrival order across all days;
/// - the system-size event log, one entry per processed event;
/// - the busy-interval log;
/// - arrival/departure counters and the overtime total.
///
/// A simulator runs exactly once: a second [`run`][Self::run] returns
/// [`SimError::AlreadyRun`] instead of double-counting.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct QueueSim<A: ArrivalProcess, S: ServiceTime> {
    /// Operating window, day count, mean service time and seed.
    pub config: SimConfig,

    arrivals: A,
    service:  S,
    rng:      SimRng,

    customers:       Vec<CustomerRecord>,
    events:          Vec<OccupancyEntry>,
    busy:            Vec<BusyInterval>,
    overtime_by_day: Vec<f64>,
    arrival_count:   u64,
    departure_count: u64,
    overtime:        f64,
    has_run:         bool,
}

impl<A: ArrivalProcess, S: ServiceTime> QueueSim<A, S> {
    pub(crate) fn new(config: SimConfig, arrivals: A, service: S, rng: SimRng) -> Self {
        Self {
            config,
            arrivals,
            service,
            rng,
            customers:       Vec::new(),
            events:          Vec::new(),
            busy:            Vec::new(),
            overtime_by_day: Vec::new(),
            arrival_count:   0,
            departure_count: 0,
            overtime:        0.0,
            has_run:         false,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Simulate every configured day and populate all logs.
    ///
    /// Day streams are derived from the root RNG up front, days are
    /// simulated (in parallel with the `parallel` feature), and the outcomes
    /// are merged in day order.  If any day fails, nothing is merged.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        if self.has_run {
            return Err(SimError::AlreadyRun);
        }
        self.has_run = true;

        info!(
            days  = self.config.num_days,
            open  = self.config.open_time,
            close = self.config.close_time,
            "starting simulation"
        );

        let streams: Vec<(u32, DayRng)> = self
            .config
            .days()
            .map(|day| (day, self.rng.day_stream(day)))
            .collect();

        let outcomes = self.simulate_days(streams)?;
        for outcome in outcomes {
            observer.on_day_end(&outcome);
            self.absorb(outcome);
        }

        let summary = self.summary();
        info!(
            arrivals   = summary.arrivals,
            departures = summary.departures,
            overtime   = summary.overtime,
            "simulation complete"
        );
        observer.on_sim_end(&summary);
        Ok(())
    }

    /// `true` once [`run`][Self::run] has been called.
    pub fn has_run(&self) -> bool {
        self.has_run
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Accepted arrivals over the whole run (`Na`).
    pub fn arrival_count(&self) -> u64 {
        self.arrival_count
    }

    /// Departures over the whole run (`Nd`).
    pub fn departure_count(&self) -> u64 {
        self.departure_count
    }

    /// Server time past closing, summed over all days (`Tp`).
    pub fn overtime_total(&self) -> f64 {
        self.overtime
    }

    /// Overtime of each day, indexed by `day - 1`.
    pub fn overtime_by_day(&self) -> &[f64] {
        &self.overtime_by_day
    }

    pub fn average_time_in_system(&self) -> f64 {
        stats::average_time_in_system(&self.customers)
    }

    pub fn average_waiting_time(&self) -> f64 {
        stats::average_waiting_time(&self.customers)
    }

    pub fn average_queue_length(&self) -> f64 {
        stats::average_queue_length(
            &self.events,
            self.config.open_time,
            self.config.close_time,
            self.config.operating_time(),
        )
    }

    pub fn device_occupancy(&self) -> f64 {
        stats::device_occupancy(
            &self.busy,
            self.config.open_time,
            self.config.close_time,
            self.config.operating_time(),
        )
    }

    /// Served customers in arrival order, across all days.
    pub fn customers(&self) -> &[CustomerRecord] {
        &self.customers
    }

    /// `(day, time, n)` after every processed event.
    pub fn occupancy_log(&self) -> &[OccupancyEntry] {
        &self.events
    }

    pub fn busy_intervals(&self) -> &[BusyInterval] {
        &self.busy
    }

    /// Every summary metric at once.
    pub fn summary(&self) -> SimSummary {
        SimSummary {
            arrivals:               self.arrival_count,
            departures:             self.departure_count,
            overtime:               self.overtime,
            average_time_in_system: self.average_time_in_system(),
            average_waiting_time:   self.average_waiting_time(),
            average_queue_length:   self.average_queue_length(),
            device_occupancy:       self.device_occupancy(),
        }
    }

    // ── Day execution ─────────────────────────────────────────────────────

    fn simulate_days(&self, streams: Vec<(u32, DayRng)>) -> SimResult<Vec<DayOutcome>> {
        let config   = &self.config;
        let arrivals = &self.arrivals;
        let service  = &self.service;

        #[cfg(not(feature = "parallel"))]
        {
            streams
                .into_iter()
                .map(|(day, rng)| simulate_day(day, config, arrivals, service, rng))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            // Indexed collect keeps day order.
            streams
                .into_par_iter()
                .map(|(day, rng)| simulate_day(day, config, arrivals, service, rng))
                .collect()
        }
    }

    fn absorb(&mut self, outcome: DayOutcome) {
        self.arrival_count   += outcome.arrivals;
        self.departure_count += outcome.departures;
        self.overtime        += outcome.overtime;
        self.overtime_by_day.push(outcome.overtime);
        self.customers.extend(outcome.customers);
        self.events.extend(outcome.events);
        self.busy.extend(outcome.busy);
    }
}

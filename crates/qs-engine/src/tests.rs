//! Integration tests for qs-engine.

use qs_arrival::{
    ArrivalError, ArrivalProcess, ArrivalResult, ConstantIntensity, IntensityFunction,
    PiecewiseIntensity, RateSegment, ThinningProcess,
};
use qs_core::{DayRng, SimConfig, SimRng};

use crate::{
    EventKind, FixedService, NoopObserver, QueueSim, SimBuilder, SimError, SimObserver,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(close: f64, num_days: u32) -> SimConfig {
    SimConfig {
        open_time:         0.0,
        close_time:        close,
        num_days,
        mean_service_time: 0.01,
        seed:              42,
    }
}

/// The same hand-picked arrival times on every day.
struct Scripted(Vec<f64>);

impl ArrivalProcess for Scripted {
    fn generate(&self, _day: u32, _rng: &mut DayRng) -> ArrivalResult<Vec<f64>> {
        Ok(self.0.clone())
    }
}

fn scripted_run(times: &[f64], service: f64, close: f64) -> QueueSim<Scripted, FixedService> {
    let mut sim = SimBuilder::new(config(close, 1), Scripted(times.to_vec()))
        .service(FixedService(service))
        .build()
        .unwrap();
    sim.run(&mut NoopObserver).unwrap();
    sim
}

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
}

/// Lunch-rush profile scaled to a 0–24 h day.
fn rush_profile() -> PiecewiseIntensity {
    PiecewiseIntensity::new(30.0)
        .segment(RateSegment::new(10.5, 11.0, 100.0))
        .segment(RateSegment::new(11.0, 11.5, 75.0))
        .segment(RateSegment::new(14.5, 15.0, 80.0))
        .segment(RateSegment::new(15.0, 15.5, 50.0))
}

// ── Step selection ────────────────────────────────────────────────────────────

#[cfg(test)]
mod step_tests {
    use crate::day::{next_step, Step};

    #[test]
    fn arrival_before_departure() {
        assert_eq!(next_step(0.2, 0.3, 1.0, 1), Step::Arrival);
    }

    #[test]
    fn tie_goes_to_arrival() {
        assert_eq!(next_step(0.5, 0.5, 1.0, 1), Step::Arrival);
    }

    #[test]
    fn arrival_exactly_at_close_accepted() {
        assert_eq!(next_step(1.0, f64::INFINITY, 1.0, 0), Step::Arrival);
    }

    #[test]
    fn departure_before_arrival() {
        assert_eq!(next_step(0.4, 0.3, 1.0, 2), Step::Departure);
    }

    #[test]
    fn departure_after_close_is_overwork() {
        assert_eq!(next_step(2.0, 1.2, 1.0, 1), Step::Overwork);
    }

    #[test]
    fn tie_after_close_is_overwork() {
        assert_eq!(next_step(2.0, 2.0, 1.0, 1), Step::Overwork);
    }

    #[test]
    fn idle_after_close_is_close() {
        assert_eq!(next_step(2.0, f64::INFINITY, 1.0, 0), Step::Close);
    }
}

// ── Hand-computed scenarios ───────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn single_arrival_served_before_close() {
        let sim = scripted_run(&[0.5], 0.1, 1.0);
        assert_eq!(sim.arrival_count(), 1);
        assert_eq!(sim.departure_count(), 1);
        assert_eq!(sim.overtime_total(), 0.0);
        assert_eq!(sim.average_waiting_time(), 0.0);
        assert_close(sim.device_occupancy(), 0.1 / (1.0 - 0.0) / 1.0);
        assert_close(sim.average_time_in_system(), 0.1);

        let c = sim.customers()[0];
        assert_eq!(c.service_day, 1);
        assert_eq!(c.arrival_time, 0.5);
        assert_close(c.departure_time, 0.6);
    }

    #[test]
    fn overwork_runs_past_close() {
        let sim = scripted_run(&[0.99], 0.5, 1.0);
        assert_close(sim.overtime_total(), 0.49);
        assert_eq!(sim.arrival_count(), sim.departure_count());

        let log = sim.occupancy_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].kind, EventKind::Arrival);
        assert_eq!(log[1].kind, EventKind::Overwork);
        assert_close(log[1].time, 1.49);
        assert_eq!(log[1].occupancy, 0);
    }

    #[test]
    fn overwork_drains_whole_queue() {
        // Three customers just before close, 0.25 h each.
        let sim = scripted_run(&[0.875, 0.9375, 1.0], 0.25, 1.0);
        let kinds: Vec<EventKind> = sim.occupancy_log().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            [
                EventKind::Arrival,
                EventKind::Arrival,
                EventKind::Arrival,
                EventKind::Overwork,
                EventKind::Overwork,
                EventKind::Overwork,
            ]
        );
        // First departure is already past close; last one at 0.875 + 3·0.25.
        assert_close(sim.overtime_total(), 0.625);
        assert_eq!(sim.occupancy_log().last().unwrap().occupancy, 0);
    }

    #[test]
    fn arrival_at_close_is_accepted_and_overworked() {
        let sim = scripted_run(&[1.0], 0.25, 1.0);
        assert_eq!(sim.arrival_count(), 1);
        assert_close(sim.overtime_total(), 0.25);
        // Busy time after close does not count toward occupancy.
        assert_eq!(sim.device_occupancy(), 0.0);
    }

    #[test]
    fn tie_between_arrival_and_departure() {
        // First customer leaves at exactly 0.5, when the second arrives.
        let sim = scripted_run(&[0.25, 0.5], 0.25, 1.0);
        let log: Vec<(f64, u32, EventKind)> = sim
            .occupancy_log()
            .iter()
            .map(|e| (e.time, e.occupancy, e.kind))
            .collect();
        assert_eq!(
            log,
            [
                (0.25, 1, EventKind::Arrival),
                (0.5, 2, EventKind::Arrival),
                (0.5, 1, EventKind::Departure),
                (0.75, 0, EventKind::Departure),
            ]
        );
        assert_eq!(sim.customers()[1].wait_time, 0.0);
        // One continuous busy period.
        assert_eq!(sim.busy_intervals().len(), 1);
        assert_eq!(sim.busy_intervals()[0].start, 0.25);
        assert_eq!(sim.busy_intervals()[0].end, 0.75);
    }

    #[test]
    fn waiting_customer_statistics() {
        let sim = scripted_run(&[0.25, 0.375], 0.25, 1.0);
        let c = sim.customers();
        assert_eq!(c[0].wait_time, 0.0);
        assert_eq!(c[1].wait_time, 0.125);
        assert_eq!(c[1].departure_time, 0.75);

        assert_close(sim.average_waiting_time(), 0.0625);
        assert_close(sim.average_time_in_system(), 0.3125);
        // One customer waits on [0.375, 0.5).
        assert_close(sim.average_queue_length(), 0.125);
        assert_close(sim.device_occupancy(), 0.5);
    }

    #[test]
    fn idle_gap_splits_busy_intervals() {
        let sim = scripted_run(&[0.125, 0.5], 0.125, 1.0);
        let busy = sim.busy_intervals();
        assert_eq!(busy.len(), 2);
        assert_eq!((busy[0].start, busy[0].end), (0.125, 0.25));
        assert_eq!((busy[1].start, busy[1].end), (0.5, 0.625));
        // Idle periods never produce a negative queue length.
        assert_eq!(sim.average_queue_length(), 0.0);
    }

    #[test]
    fn day_without_arrivals_closes_immediately() {
        let sim = scripted_run(&[], 0.25, 1.0);
        assert_eq!(sim.arrival_count(), 0);
        assert_eq!(sim.overtime_total(), 0.0);
        assert!(sim.occupancy_log().is_empty());
        assert!(sim.busy_intervals().is_empty());
        assert_eq!(sim.average_waiting_time(), 0.0);
        assert_eq!(sim.average_time_in_system(), 0.0);
        assert_eq!(sim.device_occupancy(), 0.0);
    }

    #[test]
    fn multi_day_logs_accumulate() {
        let mut sim = SimBuilder::new(config(1.0, 3), Scripted(vec![0.99]))
            .service(FixedService(0.5))
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();

        assert_eq!(sim.arrival_count(), 3);
        assert_eq!(sim.departure_count(), 3);
        assert_eq!(sim.overtime_by_day().len(), 3);
        for &o in sim.overtime_by_day() {
            assert_close(o, 0.49);
        }
        assert_close(sim.overtime_total(), 3.0 * 0.49);

        let days: Vec<u32> = sim.customers().iter().map(|c| c.service_day).collect();
        assert_eq!(days, [1, 2, 3]);
        // Occupancy is normalised over all three days.
        assert_close(sim.device_occupancy(), 3.0 * 0.01 / 3.0);
    }
}

// ── Stochastic properties ─────────────────────────────────────────────────────

#[cfg(test)]
mod stochastic_tests {
    use super::*;

    #[test]
    fn seeded_constant_rate_run_conserves_customers() {
        let mut sim = QueueSim::with_intensity(config(1.0, 1), ConstantIntensity(10.0)).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.arrival_count(), sim.departure_count());
        assert!(sim.arrival_count() <= 40, "Na = {}", sim.arrival_count());
    }

    #[test]
    fn multi_day_invariants_hold() {
        let cfg = SimConfig {
            open_time:         0.0,
            close_time:        24.0,
            num_days:          5,
            mean_service_time: 1.0 / 40.0,
            seed:              7,
        };
        let mut sim = QueueSim::with_intensity(cfg, rush_profile()).unwrap();
        sim.run(&mut NoopObserver).unwrap();

        assert_eq!(sim.arrival_count(), sim.departure_count());
        assert_eq!(sim.customers().len() as u64, sim.arrival_count());

        let log = sim.occupancy_log();
        // Time never decreases within a day, days appear in order.
        for w in log.windows(2) {
            assert!(
                (w[0].day, w[0].time) <= (w[1].day, w[1].time),
                "log out of order: {:?} then {:?}",
                w[0],
                w[1]
            );
        }
        // Every day ends empty.
        for day in 1..=5 {
            let last = log.iter().rev().find(|e| e.day == day).unwrap();
            assert_eq!(last.occupancy, 0, "day {day}");
        }
        // Busy intervals are disjoint and ordered.
        for w in sim.busy_intervals().windows(2) {
            assert!(w[0].end >= w[0].start);
            if w[0].day == w[1].day {
                assert!(w[0].end <= w[1].start);
            }
        }
        for c in sim.customers() {
            assert!(c.wait_time >= 0.0);
            assert!(c.departure_time >= c.arrival_time + c.wait_time);
        }
        let occ = sim.device_occupancy();
        assert!((0.0..=1.0).contains(&occ), "occupancy {occ}");
        assert!(sim.average_queue_length() >= 0.0);
    }

    #[test]
    fn vanishing_service_time_empties_queue() {
        let arrivals = ThinningProcess::new(rush_profile(), 0.0, 24.0).unwrap();
        let mut sim = SimBuilder::new(config(24.0, 3), arrivals)
            .service(FixedService(1e-9))
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert!(sim.arrival_count() > 0);
        assert!(sim.average_waiting_time() < 1e-6);
        assert!(sim.average_queue_length() < 1e-6);
    }

    #[test]
    fn same_seed_same_run() {
        let run = |seed| {
            let cfg = SimConfig { seed, ..config(24.0, 3) };
            let mut sim = QueueSim::with_intensity(cfg, rush_profile()).unwrap();
            sim.run(&mut NoopObserver).unwrap();
            sim.customers().to_vec()
        };
        assert_eq!(run(3), run(3));
        assert_ne!(run(3), run(4));
    }

    #[test]
    fn explicit_rng_overrides_config_seed() {
        let cfg = config(24.0, 2);
        let poisson = || ThinningProcess::homogeneous(20.0, 0.0, 24.0).unwrap();
        let mut a = SimBuilder::new(cfg.clone(), poisson())
            .rng(SimRng::new(1234))
            .build()
            .unwrap();
        let mut b = SimBuilder::new(SimConfig { seed: 1234, ..cfg }, poisson())
            .build()
            .unwrap();
        a.run(&mut NoopObserver).unwrap();
        b.run(&mut NoopObserver).unwrap();
        assert_eq!(a.customers(), b.customers());
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod error_tests {
    use super::*;

    /// Candidate set understates the real maximum.
    struct Understated;

    impl IntensityFunction for Understated {
        fn intensity(&self, _t: f64, _day: u32) -> f64 {
            50.0
        }

        fn supremum_candidates(&self) -> Vec<f64> {
            vec![5.0]
        }
    }

    #[test]
    fn degenerate_config_rejected_at_build() {
        let bad = SimConfig { close_time: 0.0, ..config(1.0, 1) };
        assert!(matches!(
            SimBuilder::new(bad, Scripted(vec![])).build(),
            Err(SimError::Core(_))
        ));

        let bad = SimConfig { num_days: 0, ..config(1.0, 1) };
        assert!(QueueSim::with_intensity(bad, ConstantIntensity(1.0)).is_err());

        let bad = SimConfig { mean_service_time: 0.0, ..config(1.0, 1) };
        assert!(SimBuilder::new(bad, Scripted(vec![])).build().is_err());
    }

    #[test]
    fn negative_fixed_service_rejected() {
        let result = SimBuilder::new(config(1.0, 1), Scripted(vec![]))
            .service(FixedService(-0.1))
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn undominated_intensity_rejected() {
        let profile = PiecewiseIntensity::new(5.0).segment(RateSegment::new(0.2, 0.4, -3.0));
        let result = QueueSim::with_intensity(config(1.0, 1), profile);
        assert!(matches!(result, Err(SimError::Arrival(ArrivalError::Config(_)))));
    }

    #[test]
    fn understated_bound_aborts_whole_run() {
        let mut sim = QueueSim::with_intensity(config(10.0, 3), Understated).unwrap();
        let result = sim.run(&mut NoopObserver);
        assert!(matches!(
            result,
            Err(SimError::Arrival(ArrivalError::BoundExceeded { .. }))
        ));
        // No partial statistics.
        assert_eq!(sim.arrival_count(), 0);
        assert!(sim.customers().is_empty());
        assert!(sim.occupancy_log().is_empty());
    }

    #[test]
    fn unordered_arrivals_rejected() {
        let mut sim = SimBuilder::new(config(1.0, 1), Scripted(vec![0.5, 0.25]))
            .build()
            .unwrap();
        assert!(matches!(
            sim.run(&mut NoopObserver),
            Err(SimError::InvalidArrivals { day: 1, .. })
        ));
    }

    #[test]
    fn arrivals_after_close_rejected() {
        let mut sim = SimBuilder::new(config(1.0, 1), Scripted(vec![0.5, 1.5]))
            .build()
            .unwrap();
        assert!(sim.run(&mut NoopObserver).is_err());
    }

    #[test]
    fn second_run_rejected() {
        let mut sim = scripted_run(&[0.5], 0.1, 1.0);
        assert!(sim.has_run());
        assert!(matches!(sim.run(&mut NoopObserver), Err(SimError::AlreadyRun)));
        assert_eq!(sim.arrival_count(), 1, "statistics must not double-count");
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;
    use crate::{DayOutcome, SimSummary};

    #[derive(Default)]
    struct Recorder {
        days:    Vec<u32>,
        events:  usize,
        summary: Option<SimSummary>,
    }

    impl SimObserver for Recorder {
        fn on_day_end(&mut self, outcome: &DayOutcome) {
            self.days.push(outcome.day);
            self.events += outcome.events.len();
        }

        fn on_sim_end(&mut self, summary: &SimSummary) {
            self.summary = Some(*summary);
        }
    }

    #[test]
    fn days_reported_in_order_with_their_logs() {
        let mut sim = SimBuilder::new(config(1.0, 4), Scripted(vec![0.25, 0.5]))
            .service(FixedService(0.125))
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(rec.days, [1, 2, 3, 4]);
        assert_eq!(rec.events, sim.occupancy_log().len());
        assert_eq!(rec.summary, Some(sim.summary()));
        assert_eq!(rec.summary.unwrap().arrivals, 8);
    }
}

// ── Statistics reductions ─────────────────────────────────────────────────────

#[cfg(test)]
mod stats_tests {
    use crate::log::{BusyInterval, EventKind, OccupancyEntry};
    use crate::stats;

    fn entry(day: u32, time: f64, occupancy: u32) -> OccupancyEntry {
        OccupancyEntry { day, time, occupancy, kind: EventKind::Arrival }
    }

    #[test]
    fn queue_length_not_paired_across_days() {
        // Day 1 ends with two waiting at close; day 2 starts empty.
        let events = [entry(1, 0.5, 3), entry(2, 0.25, 1)];
        let q = stats::average_queue_length(&events, 0.0, 1.0, 2.0);
        // Day 1: two waiting on [0.5, 1.0] → 1.0; day 2: nobody waits.
        assert_eq!(q, 0.5);
    }

    #[test]
    fn queue_length_ignores_events_after_close() {
        let events = [entry(1, 0.5, 2), entry(1, 1.5, 5)];
        let q = stats::average_queue_length(&events, 0.0, 1.0, 1.0);
        assert_eq!(q, 0.5);
    }

    #[test]
    fn clipping_keeps_only_the_operating_window() {
        let b = BusyInterval { day: 1, start: 0.75, end: 1.5 };
        assert_eq!(b.clipped(0.0, 1.0).duration(), 0.25);
        // Entirely after close.
        let late = BusyInterval { day: 1, start: 1.25, end: 1.5 };
        assert_eq!(late.clipped(0.0, 1.0).duration(), 0.0);
        assert_eq!(stats::clipped_busy_time(&[b, late], 0.0, 1.0), 0.25);
    }

    #[test]
    fn occupancy_clipped_to_operating_window() {
        let busy = [
            BusyInterval { day: 1, start: 0.5, end: 1.5 },
            BusyInterval { day: 2, start: 0.0, end: 0.25 },
        ];
        assert_eq!(stats::device_occupancy(&busy, 0.0, 1.0, 2.0), 0.375);
    }

    #[test]
    fn empty_logs_give_zero() {
        assert_eq!(stats::average_waiting_time(&[]), 0.0);
        assert_eq!(stats::average_time_in_system(&[]), 0.0);
        assert_eq!(stats::average_queue_length(&[], 0.0, 1.0, 1.0), 0.0);
        assert_eq!(stats::device_occupancy(&[], 0.0, 1.0, 1.0), 0.0);
    }
}

// ── Customer arena ────────────────────────────────────────────────────────────

#[cfg(test)]
mod customer_tests {
    use qs_core::CustomerId;

    use crate::{CustomerRecord, CustomerTable};

    #[test]
    fn ids_follow_arrival_order() {
        let mut table = CustomerTable::new();
        let a = table.push(0.25);
        let b = table.push(0.5);
        assert_eq!((a, b), (CustomerId(0), CustomerId(1)));
    }

    #[test]
    fn begin_service_sets_wait_and_departure() {
        let mut table = CustomerTable::new();
        let first = table.push(0.25);
        let second = table.push(0.375);
        table.begin_service(first, 2, 0.25, 0.5);
        table.begin_service(second, 2, 0.5, 0.75);

        let records = table.into_records();
        assert_eq!(
            records,
            [
                CustomerRecord {
                    service_day:    2,
                    arrival_time:   0.25,
                    wait_time:      0.0,
                    departure_time: 0.5,
                },
                CustomerRecord {
                    service_day:    2,
                    arrival_time:   0.375,
                    wait_time:      0.125,
                    departure_time: 0.75,
                },
            ]
        );
        assert_eq!(records[1].time_in_system(), 0.375);
    }
}

#[cfg(all(test, feature = "parallel"))]
mod parallel_tests {
    use super::*;
    use crate::day::simulate_day;
    use crate::{DayOutcome, ExponentialService};

    #[test]
    fn parallel_run_matches_sequential_days() {
        let cfg = SimConfig { seed: 9, ..config(24.0, 8) };

        let mut sim = QueueSim::with_intensity(cfg.clone(), rush_profile()).unwrap();
        sim.run(&mut NoopObserver).unwrap();

        // Same streams, same models, one day after another on this thread.
        let arrivals = ThinningProcess::new(rush_profile(), cfg.open_time, cfg.close_time).unwrap();
        let service = ExponentialService::new(cfg.mean_service_time);
        let mut root = SimRng::new(cfg.seed);
        let streams: Vec<(u32, DayRng)> = cfg.days().map(|d| (d, root.day_stream(d))).collect();
        let days: Vec<DayOutcome> = streams
            .into_iter()
            .map(|(d, rng)| simulate_day(d, &cfg, &arrivals, &service, rng).unwrap())
            .collect();

        let customers: Vec<_> = days.iter().flat_map(|o| o.customers.iter().copied()).collect();
        let events: Vec<_> = days.iter().flat_map(|o| o.events.iter().copied()).collect();
        let overtime: Vec<f64> = days.iter().map(|o| o.overtime).collect();

        assert!(!customers.is_empty());
        assert_eq!(sim.customers(), customers.as_slice());
        assert_eq!(sim.occupancy_log(), events.as_slice());
        assert_eq!(sim.overtime_by_day(), overtime.as_slice());
    }
}

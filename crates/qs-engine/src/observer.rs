//! Simulation observer trait for progress reporting and data collection.

use crate::{DayOutcome, SimSummary};

/// Callbacks invoked by [`QueueSim::run`][crate::QueueSim::run].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Days are reported in ascending order even
/// when they were simulated in parallel.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_day_end(&mut self, outcome: &DayOutcome) {
///         println!("day {}: {} customers", outcome.day, outcome.arrivals);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once per day, after every day of the run has completed.
    ///
    /// Provides the day's customers, event log and busy intervals so that
    /// output writers can record them without the simulator knowing about
    /// any specific output format.
    fn on_day_end(&mut self, _outcome: &DayOutcome) {}

    /// Called once after the last day has been merged.
    fn on_sim_end(&mut self, _summary: &SimSummary) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

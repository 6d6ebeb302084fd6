//! Simulation configuration.
//!
//! # Time model
//!
//! Times are `f64` hours of the day on a common daily axis: every simulated
//! day starts at `open_time` and stops accepting customers at `close_time`.
//! A time stamp is only meaningful together with its day number (1-based).

use crate::{CoreError, CoreResult};

/// Top-level simulation configuration.
///
/// Typically built from constants or loaded from a JSON file by the
/// application crate and passed to the simulator builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Opening time of the counter (hours).
    pub open_time: f64,

    /// Closing time; arrivals after this instant are not accepted.
    pub close_time: f64,

    /// Number of days to simulate.  Days are numbered `1..=num_days`.
    pub num_days: u32,

    /// Mean of the exponential service-time distribution (hours).
    pub mean_service_time: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl SimConfig {
    /// Reject degenerate parameters before anything is simulated.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.open_time.is_finite() || !self.close_time.is_finite() {
            return Err(CoreError::Config(format!(
                "operating window [{}, {}] must be finite",
                self.open_time, self.close_time
            )));
        }
        if self.close_time <= self.open_time {
            return Err(CoreError::Config(format!(
                "close time {} must be after open time {}",
                self.close_time, self.open_time
            )));
        }
        if self.num_days == 0 {
            return Err(CoreError::Config("day count must be positive".into()));
        }
        if !(self.mean_service_time.is_finite() && self.mean_service_time > 0.0) {
            return Err(CoreError::Config(format!(
                "mean service time {} must be positive and finite",
                self.mean_service_time
            )));
        }
        Ok(())
    }

    /// Length of one day's operating window.
    #[inline]
    pub fn day_length(&self) -> f64 {
        self.close_time - self.open_time
    }

    /// Total scheduled operating time over the whole run.
    #[inline]
    pub fn operating_time(&self) -> f64 {
        self.day_length() * self.num_days as f64
    }

    /// Iterator over the day numbers of the run.
    pub fn days(&self) -> std::ops::RangeInclusive<u32> {
        1..=self.num_days
    }
}

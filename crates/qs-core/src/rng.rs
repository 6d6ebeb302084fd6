//! Deterministic root and per-day RNG streams.
//!
//! # Determinism strategy
//!
//! The run owns one root [`SimRng`] seeded from the configuration.  Before any
//! day is simulated, the root derives one [`DayRng`] per day, in ascending day
//! order.  Every draw a day needs (candidate gaps, thinning acceptance,
//! service durations) comes from its own stream, so:
//!
//! - Days never share RNG state, and can be simulated on different threads.
//! - The result of a run depends only on the seed, not on whether days ran
//!   sequentially or in parallel.

use rand::distributions::Open01;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Root RNG for a simulation run.
///
/// Passed into the simulator builder explicitly; there is no process-wide
/// random source.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive an independent stream for `day`.
    ///
    /// Consumes one `u64` from the root, so streams must be derived in a
    /// fixed order for a run to be reproducible.
    pub fn day_stream(&mut self, day: u32) -> DayRng {
        let seed: u64 = self.0.r#gen::<u64>() ^ (day as u64).wrapping_mul(MIXING_CONSTANT);
        DayRng(SmallRng::seed_from_u64(seed))
    }
}

// ── DayRng ────────────────────────────────────────────────────────────────────

/// Uniform-random source for a single simulated day.
///
/// The type is `!Sync`; a parallel run hands each worker the streams of the
/// days it owns.
pub struct DayRng(SmallRng);

impl DayRng {
    /// Seed a stream directly.  Mostly useful in tests.
    pub fn from_seed(seed: u64) -> Self {
        DayRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform draw on the open interval (0, 1).
    ///
    /// Never returns 0, so `-ln(1 - u)` is strictly positive and finite.
    #[inline]
    pub fn open01(&mut self) -> f64 {
        self.0.sample(Open01)
    }

    /// Exponentially distributed draw with the given `rate` (inverse transform).
    #[inline]
    pub fn exp_with_rate(&mut self, rate: f64) -> f64 {
        -(1.0 - self.open01()).ln() / rate
    }
}

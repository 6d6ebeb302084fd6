//! Arrival processes: the `ArrivalProcess` trait and the thinning generator.
//!
//! # Thinning
//!
//! Candidates are drawn from a homogeneous Poisson process at the dominating
//! rate `h`:
//!
//! ```text
//! t ← open
//! loop:
//!     t += -ln(1 - u) / h          u ~ U(0,1)
//!     if t > close: stop
//!     accept t iff v ≤ λ(t, day) / h   v ~ U(0,1)
//! ```
//!
//! The accepted candidates form a non-homogeneous Poisson process with rate
//! `λ`, provided `0 ≤ λ ≤ h` everywhere.  A homogeneous process is the
//! special case `λ ≡ h`, where every candidate is accepted.

use qs_core::DayRng;
use tracing::trace;

use crate::{ArrivalError, ArrivalResult, ConstantIntensity, IntensityFunction};

// ── Trait ─────────────────────────────────────────────────────────────────────

/// Source of one day's arrival timestamps.
///
/// # Contract
///
/// - The returned sequence is strictly increasing and every element lies in
///   the process's operating window.
/// - All randomness comes from `rng`.
pub trait ArrivalProcess: Send + Sync {
    /// Generate the arrivals of `day` (1-based).
    fn generate(&self, day: u32, rng: &mut DayRng) -> ArrivalResult<Vec<f64>>;
}

// ── ThinningProcess ───────────────────────────────────────────────────────────

/// Non-homogeneous Poisson arrivals by thinning a rate-`h` process.
#[derive(Clone, Debug)]
pub struct ThinningProcess<I: IntensityFunction> {
    intensity: I,
    bound:     f64,
    open:      f64,
    close:     f64,
}

/// Homogeneous Poisson arrivals: a constant intensity equal to its bound.
pub type HomogeneousProcess = ThinningProcess<ConstantIntensity>;

impl<I: IntensityFunction> ThinningProcess<I> {
    /// Build a generator whose bound is the largest supremum candidate.
    pub fn new(intensity: I, open: f64, close: f64) -> ArrivalResult<Self> {
        let candidates = intensity.supremum_candidates();
        let bound = candidates.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if candidates.is_empty() {
            return Err(ArrivalError::Config(
                "intensity reports no representative rates".into(),
            ));
        }
        Self::with_bound(intensity, bound, open, close)
    }

    /// Build a generator with an explicitly declared bound `h`.
    ///
    /// Fails unless every representative rate `r` satisfies `0 ≤ r/h ≤ 1`.
    pub fn with_bound(intensity: I, bound: f64, open: f64, close: f64) -> ArrivalResult<Self> {
        if !(open.is_finite() && close.is_finite() && open < close) {
            return Err(ArrivalError::Config(format!(
                "arrival window [{open}, {close}] is empty or not finite"
            )));
        }
        if !(bound.is_finite() && bound > 0.0) {
            return Err(ArrivalError::Config(format!(
                "bound {bound} must be positive and finite"
            )));
        }
        for r in intensity.supremum_candidates() {
            let ratio = r / bound;
            if !(0.0..=1.0).contains(&ratio) {
                return Err(ArrivalError::Config(format!(
                    "rate {r} is not dominated by bound {bound} (ratio {ratio})"
                )));
            }
        }
        Ok(Self { intensity, bound, open, close })
    }

    /// The dominating rate `h` candidates are drawn at.
    pub fn bound(&self) -> f64 {
        self.bound
    }

    /// Probability of accepting a candidate at `time` on `day`.
    ///
    /// Fails if the intensity escapes `[0, h]` there.
    pub fn acceptance_probability(&self, time: f64, day: u32) -> ArrivalResult<f64> {
        let rate = self.intensity.intensity(time, day);
        if !(0.0..=self.bound).contains(&rate) {
            return Err(ArrivalError::BoundExceeded { time, day, rate, bound: self.bound });
        }
        Ok(rate / self.bound)
    }
}

impl ThinningProcess<ConstantIntensity> {
    /// Homogeneous Poisson arrivals at `rate` on `[open, close]`.
    pub fn homogeneous(rate: f64, open: f64, close: f64) -> ArrivalResult<Self> {
        Self::new(ConstantIntensity(rate), open, close)
    }
}

impl<I: IntensityFunction> ArrivalProcess for ThinningProcess<I> {
    fn generate(&self, day: u32, rng: &mut DayRng) -> ArrivalResult<Vec<f64>> {
        let mut times = Vec::new();
        let mut t = self.open;
        let mut candidates = 0usize;

        loop {
            let next = t + rng.exp_with_rate(self.bound);
            if next == t {
                // Gap below the float resolution at `t`; emitting it would
                // repeat the previous time stamp.
                continue;
            }
            t = next;
            if t > self.close {
                break;
            }
            candidates += 1;
            let p = self.acceptance_probability(t, day)?;
            if rng.open01() <= p {
                times.push(t);
            }
        }

        trace!(day, candidates, accepted = times.len(), "arrivals generated");
        Ok(times)
    }
}

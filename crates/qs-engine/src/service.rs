//! Service-time models.

use qs_core::DayRng;

use crate::{SimError, SimResult};

/// Distribution of the time the server spends on one customer.
///
/// Implementations must be `Send + Sync` (shared across Rayon threads).
pub trait ServiceTime: Send + Sync {
    /// Draw one service duration (hours, non-negative).
    fn sample(&self, rng: &mut DayRng) -> f64;

    /// Reject degenerate parameters at build time.
    fn validate(&self) -> SimResult<()> {
        Ok(())
    }
}

/// Exponential service times, `S = -mean · ln(1 - u)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExponentialService {
    pub mean: f64,
}

impl ExponentialService {
    pub fn new(mean: f64) -> Self {
        Self { mean }
    }
}

impl ServiceTime for ExponentialService {
    #[inline]
    fn sample(&self, rng: &mut DayRng) -> f64 {
        rng.exp_with_rate(1.0 / self.mean)
    }

    fn validate(&self) -> SimResult<()> {
        if self.mean.is_finite() && self.mean > 0.0 {
            Ok(())
        } else {
            Err(SimError::Config(format!(
                "mean service time {} must be positive and finite",
                self.mean
            )))
        }
    }
}

/// Every customer takes exactly the same time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedService(pub f64);

impl ServiceTime for FixedService {
    #[inline]
    fn sample(&self, _rng: &mut DayRng) -> f64 {
        self.0
    }

    fn validate(&self) -> SimResult<()> {
        if self.0.is_finite() && self.0 >= 0.0 {
            Ok(())
        } else {
            Err(SimError::Config(format!(
                "fixed service time {} must be non-negative and finite",
                self.0
            )))
        }
    }
}

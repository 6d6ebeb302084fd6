//! Fluent builder for constructing a [`QueueSim`].

use qs_arrival::{ArrivalProcess, IntensityFunction, ThinningProcess};
use qs_core::{SimConfig, SimRng};

use crate::{ExponentialService, QueueSim, ServiceTime, SimResult};

/// Fluent builder for [`QueueSim<A, S>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — operating window, day count, mean service time, seed
/// - `A: ArrivalProcess` — e.g. a [`ThinningProcess`] over an intensity
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                                          |
/// |-----------------|--------------------------------------------------|
/// | `.service(s)`   | `ExponentialService { mean: mean_service_time }` |
/// | `.rng(r)`       | `SimRng::new(config.seed)`                       |
///
/// # Example
///
/// ```rust,ignore
/// let arrivals = ThinningProcess::new(profile, config.open_time, config.close_time)?;
/// let mut sim = SimBuilder::new(config, arrivals).build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<A: ArrivalProcess, S: ServiceTime> {
    config:   SimConfig,
    arrivals: A,
    service:  S,
    rng:      Option<SimRng>,
}

impl<A: ArrivalProcess> SimBuilder<A, ExponentialService> {
    /// Create a builder with exponential service at the configured mean.
    pub fn new(config: SimConfig, arrivals: A) -> Self {
        let service = ExponentialService::new(config.mean_service_time);
        Self { config, arrivals, service, rng: None }
    }
}

impl<A: ArrivalProcess, S: ServiceTime> SimBuilder<A, S> {
    /// Replace the service-time model.
    pub fn service<S2: ServiceTime>(self, service: S2) -> SimBuilder<A, S2> {
        SimBuilder {
            config:   self.config,
            arrivals: self.arrivals,
            service,
            rng:      self.rng,
        }
    }

    /// Supply the root random source explicitly.
    pub fn rng(mut self, rng: SimRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Validate inputs and return a ready-to-run [`QueueSim`].
    pub fn build(self) -> SimResult<QueueSim<A, S>> {
        self.config.validate()?;
        self.service.validate()?;
        let rng = self.rng.unwrap_or_else(|| SimRng::new(self.config.seed));
        Ok(QueueSim::new(self.config, self.arrivals, self.service, rng))
    }
}

impl<I: IntensityFunction> QueueSim<ThinningProcess<I>, ExponentialService> {
    /// Thinning arrivals over `intensity` on the configured window, with
    /// exponential service and the configured seed.
    pub fn with_intensity(config: SimConfig, intensity: I) -> SimResult<Self> {
        config.validate()?;
        let arrivals = ThinningProcess::new(intensity, config.open_time, config.close_time)?;
        SimBuilder::new(config, arrivals).build()
    }
}

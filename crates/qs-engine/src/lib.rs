//! `qs-engine` — single-server FCFS counter simulator for `rust_qs`.
//!
//! # Day loop
//!
//! ```text
//! for day in 1..=config.num_days:
//!   ① Generate  — the arrival process produces the day's arrival times
//!                 from the day's own RNG stream.
//!   ② Events    — repeat until Close:
//!                   Arrival    → enqueue; start service if the server is idle
//!                   Departure  → dequeue; start the next customer or go idle
//!                   Overwork   → as Departure, after closing time
//!                   Close      → add the day's overtime
//!   ③ Merge     — customers, event log, busy intervals and counters are
//!                 appended to the run's totals in day order.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                          |
//! |------------|-------------------------------------------------|
//! | `parallel` | Simulates days on Rayon's thread pool.          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use qs_arrival::ConstantIntensity;
//! use qs_core::SimConfig;
//! use qs_engine::{NoopObserver, QueueSim};
//!
//! let mut sim = QueueSim::with_intensity(config, ConstantIntensity(10.0))?;
//! sim.run(&mut NoopObserver)?;
//! println!("occupancy {:.3}", sim.device_occupancy());
//! ```

pub mod builder;
pub mod customer;
pub mod day;
pub mod error;
pub mod log;
pub mod observer;
pub mod service;
pub mod sim;
pub mod stats;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use customer::{Customer, CustomerRecord, CustomerTable, ServiceRecord};
pub use day::DayOutcome;
pub use error::{SimError, SimResult};
pub use log::{BusyInterval, EventKind, OccupancyEntry};
pub use observer::{NoopObserver, SimObserver};
pub use service::{ExponentialService, FixedService, ServiceTime};
pub use sim::QueueSim;
pub use stats::SimSummary;

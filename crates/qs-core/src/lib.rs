//! `qs-core` — foundational types for the `rust_qs` service-counter simulator.
//!
//! This crate is a dependency of every other `qs-*` crate.  It has no `qs-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                |
//! |------------|-----------------------------------------|
//! | [`ids`]    | `CustomerId`                            |
//! | [`config`] | `SimConfig` and its validation          |
//! | [`rng`]    | `SimRng` (root), `DayRng` (per day)     |
//! | [`error`]  | `CoreError`, `CoreResult`               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                   |
//! |---------|----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to `SimConfig` and ids.   |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::{CoreError, CoreResult};
pub use ids::CustomerId;
pub use rng::{DayRng, SimRng};

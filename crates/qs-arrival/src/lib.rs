//! `qs-arrival` — arrival-rate profiles and arrival generation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`intensity`] | `IntensityFunction`, `ConstantIntensity`, `PiecewiseIntensity` |
//! | [`process`]   | `ArrivalProcess`, `ThinningProcess`, `HomogeneousProcess`      |
//! | [`loader`]    | `load_profile_csv`, `load_profile_reader`                      |
//! | [`error`]     | `ArrivalError`, `ArrivalResult<T>`                             |
//!
//! # Generation model (summary)
//!
//! ```text
//! h          = max(intensity.supremum_candidates())
//! candidates = homogeneous Poisson(h) on (open, close]
//! arrivals   = candidates kept with probability λ(t, day) / h
//! ```

pub mod error;
pub mod intensity;
pub mod loader;
pub mod process;


pub use error::{ArrivalError, ArrivalResult};
pub use intensity::{ConstantIntensity, IntensityFunction, PiecewiseIntensity, RateSegment};
pub use loader::{load_profile_csv, load_profile_reader};
pub use process::{ArrivalProcess, HomogeneousProcess, ThinningProcess};

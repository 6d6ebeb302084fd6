use qs_arrival::ArrivalError;
use qs_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("arrival generation failed: {0}")]
    Arrival(#[from] ArrivalError),

    #[error("day {day}: invalid arrival sequence: {reason}")]
    InvalidArrivals {
        day:    u32,
        reason: String,
    },

    #[error("simulation already ran; build a fresh simulator for another run")]
    AlreadyRun,
}

pub type SimResult<T> = Result<T, SimError>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArrivalError {
    /// The declared bound does not dominate the intensity's representative
    /// rates, or the generation window is empty.
    #[error("arrival configuration error: {0}")]
    Config(String),

    /// The intensity evaluated outside `[0, bound]` at a candidate time.
    #[error("intensity {rate} at t={time} (day {day}) is outside [0, {bound}]")]
    BoundExceeded {
        time:  f64,
        day:   u32,
        rate:  f64,
        bound: f64,
    },

    #[error("profile parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ArrivalResult<T> = Result<T, ArrivalError>;

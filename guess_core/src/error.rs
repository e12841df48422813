//! Error types for the guessing engine.
//!
//! Only malformed input and I/O faults are errors. A failed or ambiguous guess
//! is an ordinary [`Outcome`](crate::resolver::Outcome).

use car_rules::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("answer given out of turn: {0}")]
    OutOfTurn(&'static str),

    #[error("informant gave up: {0}")]
    Aborted(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn aborted(reason: impl Into<String>) -> Self {
        Self::Aborted(reason.into())
    }
}

//! Error types for the gym_core library.

use crate::WorkoutId;
use std::io;
use std::time::Duration;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for gym_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A request failed field or structural validation.
    ///
    /// The message is user-facing and names the offending field or index.
    #[error("{0}")]
    Validation(String),

    /// No workout exists with the given id
    #[error("workout {0} not found")]
    NotFound(WorkoutId),

    /// The store lock could not be acquired before the request deadline
    #[error("deadline of {0:?} exceeded waiting for the workout store")]
    DeadlineExceeded(Duration),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}

#![forbid(unsafe_code)]

//! Core domain model and business logic for the workout log.
//!
//! This crate provides:
//! - Domain and request types (workouts, exercises, sets, patches)
//! - Validation and partial-update merging
//! - The in-memory `WorkoutStore`
//! - `WorkoutService`, the validated operations used by the HTTP layer
//! - Configuration and logging setup

pub mod types;
pub mod error;
pub mod clock;
pub mod config;
pub mod logging;
pub mod validation;
pub mod store;
pub mod service;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use validation::{NewWorkout, WorkoutDraft};
pub use store::WorkoutStore;
pub use service::WorkoutService;

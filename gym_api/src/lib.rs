#![forbid(unsafe_code)]

//! HTTP boundary for the workout log.
//!
//! Maps the JSON-over-HTTP contract onto `gym_core::WorkoutService`.

pub mod error;
pub mod routes;
pub mod server;

pub use error::{ApiError, ErrorBody};
pub use routes::routes;
pub use server::{build_cors_layer, build_router, serve};

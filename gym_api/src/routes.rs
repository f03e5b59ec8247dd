//! HTTP routes.
//!
//! | Method | Path             | Success              |
//! |--------|------------------|----------------------|
//! | GET    | `/health`        | 200 `{"status":"ok"}` |
//! | GET    | `/workouts`      | 200 list             |
//! | POST   | `/workouts`      | 201 created workout  |
//! | GET    | `/workouts/{id}` | 200 workout          |
//! | PUT    | `/workouts/{id}` | 200 updated workout  |
//! | DELETE | `/workouts/{id}` | 204 empty            |

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::{StatusCode, Uri},
    routing::get,
    Json, Router,
};
use gym_core::{CreateWorkoutRequest, UpdateWorkoutRequest, Workout, WorkoutId, WorkoutService};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Create all HTTP routes.
pub fn routes() -> Router<WorkoutService> {
    Router::new()
        .route("/health", get(health).fallback(method_not_allowed))
        .route(
            "/workouts",
            get(list_workouts)
                .post(create_workout)
                .fallback(method_not_allowed),
        )
        .route(
            "/workouts/{id}",
            get(get_workout)
                .put(update_workout)
                .delete(delete_workout)
                .fallback(method_not_allowed),
        )
        .fallback(route_not_found)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}

async fn list_workouts(
    State(service): State<WorkoutService>,
) -> Result<Json<Vec<Workout>>, ApiError> {
    Ok(Json(service.list().await?))
}

async fn create_workout(
    State(service): State<WorkoutService>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<Workout>), ApiError> {
    let req: CreateWorkoutRequest = decode_json(body)?;
    let workout = service.create(req).await?;
    Ok((StatusCode::CREATED, Json(workout)))
}

async fn get_workout(
    State(service): State<WorkoutService>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Workout>, ApiError> {
    let id = workout_id(id)?;
    Ok(Json(service.get(id).await?))
}

async fn update_workout(
    State(service): State<WorkoutService>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Workout>, ApiError> {
    let id = workout_id(id)?;
    let patch: UpdateWorkoutRequest = decode_json(body)?;
    Ok(Json(service.update(id, patch).await?))
}

async fn delete_workout(
    State(service): State<WorkoutService>,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = workout_id(id)?;
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn route_not_found() -> ApiError {
    ApiError::MalformedRoute
}

/// A bad id wins over a bad method: `POST /workouts/abc` is a 404.
async fn method_not_allowed(uri: Uri) -> ApiError {
    match uri.path().strip_prefix("/workouts/") {
        Some(segment) if parse_workout_id(segment).is_err() => ApiError::MalformedRoute,
        _ => ApiError::MethodNotAllowed,
    }
}

/// Parse the `{id}` path segment; ids are positive integers
pub fn parse_workout_id(segment: &str) -> Result<WorkoutId, ApiError> {
    match segment.parse::<WorkoutId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::MalformedRoute),
    }
}

/// An id segment that does not even percent-decode is just another bad id
fn workout_id(path: Result<Path<String>, PathRejection>) -> Result<WorkoutId, ApiError> {
    match path {
        Ok(Path(segment)) => parse_workout_id(&segment),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected path");
            Err(ApiError::MalformedRoute)
        }
    }
}

/// Decode a request body, rejecting unknown fields
///
/// The content type is not checked.
fn decode_json<T: DeserializeOwned>(body: Result<Bytes, BytesRejection>) -> Result<T, ApiError> {
    let body = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Failed to read request body");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::invalid_json()
        }
    })?;
    serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected request body");
        ApiError::invalid_json()
    })
}

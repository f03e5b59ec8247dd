//! Core domain types for the workout log.
//!
//! This module defines:
//! - Stored records (workouts, exercises, sets)
//! - Request payloads for create and partial update
//! - The tri-state `Patch` used by partial updates

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier assigned by the store, starting at 1
pub type WorkoutId = u64;

// ============================================================================
// Record Types
// ============================================================================

/// A single recorded training session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: WorkoutId,
    pub title: String,
    pub date: NaiveDate,
    pub notes: String,
    pub exercises: Vec<Exercise>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A named movement performed within a workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Exercise {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sets: Vec<WorkoutSet>,
}

/// One performed set of an exercise
///
/// `weight` is optional; absent means "unspecified", not zero.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct WorkoutSet {
    #[serde(default, deserialize_with = "null_as_default")]
    pub reps: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl WorkoutSet {
    pub fn new(reps: i64, weight: Option<f64>) -> Self {
        Self { reps, weight }
    }
}

impl Exercise {
    pub fn new(name: impl Into<String>, sets: Vec<WorkoutSet>) -> Self {
        Self {
            name: name.into(),
            sets,
        }
    }
}

// ============================================================================
// Request Types
// ============================================================================

/// Payload for creating a workout
///
/// Missing or null fields decode as empty values so that they are reported
/// by validation rather than by the decoder.
#[derive(Clone, Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct CreateWorkoutRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub notes: String,
    #[serde(deserialize_with = "null_as_default")]
    pub exercises: Vec<Exercise>,
}

/// Payload for a partial update; absent fields leave the record untouched
///
/// When `exercises` is present it replaces the whole exercise list.
#[derive(Clone, Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct UpdateWorkoutRequest {
    pub title: Patch<String>,
    pub date: Patch<String>,
    pub notes: Patch<String>,
    pub exercises: Patch<Vec<Exercise>>,
}

// ============================================================================
// Patch
// ============================================================================

/// A single field of a partial update
///
/// A JSON `null` is treated the same as a missing field.
#[derive(Clone, Debug, PartialEq)]
pub enum Patch<T> {
    Absent,
    Present(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    /// Overwrite `target` when present, mapping the value through `f`
    pub fn apply_with<F>(self, target: &mut T, f: F)
    where
        F: FnOnce(T) -> T,
    {
        if let Patch::Present(value) = self {
            *target = f(value);
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Patch::Absent, Patch::Present)
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

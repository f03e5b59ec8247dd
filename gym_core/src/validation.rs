//! Request validation and partial-update merging.
//!
//! Both the create and the update path funnel into a `WorkoutDraft`, which is
//! checked by [`validate`] before anything reaches the store. Checks run in a
//! fixed order and the first failure wins:
//! 1. title present
//! 2. date present and a real `YYYY-MM-DD` calendar date
//! 3. every exercise named, with at least one set, positive reps and
//!    non-negative weight

use crate::{
    CreateWorkoutRequest, Error, Exercise, Result, UpdateWorkoutRequest, Workout, WorkoutSet,
};
use chrono::NaiveDate;

/// chrono format for workout dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Unvalidated candidate built from a request (and, for updates, the current record)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkoutDraft {
    pub title: String,
    pub date: String,
    pub notes: String,
    pub exercises: Vec<Exercise>,
}

/// A validated workout without identity or timestamps.
///
/// Only the store turns this into a `Workout`.
#[derive(Clone, Debug, PartialEq)]
pub struct NewWorkout {
    pub title: String,
    pub date: NaiveDate,
    pub notes: String,
    pub exercises: Vec<Exercise>,
}

impl NewWorkout {
    /// Replace the mutable fields of `current`, keeping its identity and timestamps
    pub fn apply_to(self, current: Workout) -> Workout {
        Workout {
            title: self.title,
            date: self.date,
            notes: self.notes,
            exercises: self.exercises,
            ..current
        }
    }
}

impl From<CreateWorkoutRequest> for WorkoutDraft {
    fn from(req: CreateWorkoutRequest) -> Self {
        Self {
            title: req.title.trim().to_string(),
            date: req.date.trim().to_string(),
            notes: req.notes.trim().to_string(),
            exercises: req.exercises,
        }
    }
}

impl WorkoutDraft {
    /// Start a draft from the stored state of a workout
    pub fn from_current(current: &Workout) -> Self {
        Self {
            title: current.title.clone(),
            date: current.date.format(DATE_FORMAT).to_string(),
            notes: current.notes.clone(),
            exercises: current.exercises.clone(),
        }
    }

    /// Overlay the fields present in `patch`
    ///
    /// A present exercise list replaces the previous one wholesale.
    pub fn merge(mut self, patch: UpdateWorkoutRequest) -> Self {
        let trim = |s: String| s.trim().to_string();
        patch.title.apply_with(&mut self.title, trim);
        patch.date.apply_with(&mut self.date, trim);
        patch.notes.apply_with(&mut self.notes, trim);
        patch.exercises.apply_with(&mut self.exercises, |exercises| exercises);
        self
    }
}

/// Validate a draft, producing the candidate handed to the store
pub fn validate(draft: WorkoutDraft) -> Result<NewWorkout> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(Error::validation("title is required"));
    }

    let date = draft.date.trim();
    if date.is_empty() {
        return Err(Error::validation("date is required"));
    }
    let date = parse_date(date).ok_or_else(|| Error::validation("date must be YYYY-MM-DD"))?;

    validate_exercises(&draft.exercises)?;

    Ok(NewWorkout {
        title: title.to_string(),
        date,
        notes: draft.notes.trim().to_string(),
        exercises: draft
            .exercises
            .into_iter()
            .map(|exercise| Exercise {
                name: exercise.name.trim().to_string(),
                sets: exercise.sets,
            })
            .collect(),
    })
}

/// Parse a date in exactly `YYYY-MM-DD` form
///
/// chrono accepts single-digit months and days for `%m`/`%d`, so the shape is
/// checked first.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Check every exercise and set, failing on the first problem found
///
/// An empty list is accepted.
pub fn validate_exercises(exercises: &[Exercise]) -> Result<()> {
    for (i, exercise) in exercises.iter().enumerate() {
        let name = exercise.name.trim();
        if name.is_empty() {
            return Err(Error::validation(format!(
                "exercise name is required (at index {})",
                i
            )));
        }
        if exercise.sets.is_empty() {
            return Err(Error::validation(format!(
                "exercise sets must have at least 1 set for: {}",
                name
            )));
        }
        for (j, set) in exercise.sets.iter().enumerate() {
            validate_set(name, j, set)?;
        }
    }
    Ok(())
}

fn validate_set(name: &str, index: usize, set: &WorkoutSet) -> Result<()> {
    if set.reps <= 0 {
        return Err(Error::validation(format!(
            "reps must be > 0 for exercise: {}, set index {}",
            name, index
        )));
    }
    if matches!(set.weight, Some(weight) if weight < 0.0) {
        return Err(Error::validation(format!(
            "weight must be >= 0 for exercise: {}, set index {}",
            name, index
        )));
    }
    Ok(())
}

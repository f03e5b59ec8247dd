//! In-memory workout storage.
//!
//! The store owns id assignment and timestamps. All access goes through a
//! single reader/writer lock; readers share it, writers are exclusive.
//! Records only ever leave the store as copies.

use crate::validation::NewWorkout;
use crate::{Clock, Error, Result, SystemClock, Workout, WorkoutId};
use chrono::Duration;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

struct StoreInner {
    next_id: WorkoutId,
    workouts: HashMap<WorkoutId, Workout>,
}

/// Concurrency-safe repository of workouts
pub struct WorkoutStore {
    inner: RwLock<StoreInner>,
    clock: Arc<dyn Clock>,
}

impl Default for WorkoutStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkoutStore {
    /// Create an empty store using the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty store that stamps records with `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                next_id: 1,
                workouts: HashMap::new(),
            }),
            clock,
        }
    }

    /// Store a new workout under the next id
    pub async fn create(&self, candidate: NewWorkout) -> Workout {
        let mut inner = self.inner.write().await;

        let now = self.clock.now();
        let id = inner.next_id;
        inner.next_id += 1;

        let workout = Workout {
            id,
            title: candidate.title,
            date: candidate.date,
            notes: candidate.notes,
            exercises: candidate.exercises,
            created_at: now,
            updated_at: now,
        };
        inner.workouts.insert(id, workout.clone());

        tracing::debug!(id, "Stored new workout");
        workout
    }

    /// Snapshot of every workout, in no particular order
    pub async fn list(&self) -> Vec<Workout> {
        let inner = self.inner.read().await;
        inner.workouts.values().cloned().collect()
    }

    pub async fn get(&self, id: WorkoutId) -> Option<Workout> {
        let inner = self.inner.read().await;
        inner.workouts.get(&id).cloned()
    }

    /// Atomically replace a workout with `f(current)`
    ///
    /// `f` runs under the write lock and must be free of side effects. The
    /// id and `created_at` of the current record are always kept, and
    /// `updated_at` is moved strictly forward.
    pub async fn update<F>(&self, id: WorkoutId, f: F) -> Result<Workout>
    where
        F: FnOnce(Workout) -> Workout,
    {
        let mut inner = self.inner.write().await;

        let current = inner.workouts.get(&id).cloned().ok_or(Error::NotFound(id))?;
        let created_at = current.created_at;
        let previous_update = current.updated_at;

        let mut updated = f(current);
        updated.id = id;
        updated.created_at = created_at;

        let now = self.clock.now();
        updated.updated_at = if now > previous_update {
            now
        } else {
            previous_update + Duration::microseconds(1)
        };

        inner.workouts.insert(id, updated.clone());

        tracing::debug!(id, "Stored updated workout");
        Ok(updated)
    }

    /// Remove a workout; returns whether anything was removed
    pub async fn delete(&self, id: WorkoutId) -> bool {
        let mut inner = self.inner.write().await;
        let removed = inner.workouts.remove(&id).is_some();
        if removed {
            tracing::debug!(id, "Removed workout");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.workouts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

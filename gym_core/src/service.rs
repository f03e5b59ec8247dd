//! Workout operations as seen by the transport layer.
//!
//! `WorkoutService` turns request payloads into validated candidates and hands
//! them to the store. Validation always happens before the store is touched,
//! so a rejected request leaves stored state exactly as it was.
//!
//! Every store call is bounded by a deadline. The only await point inside the
//! store is lock acquisition, so a call that times out is dropped before it
//! has mutated anything.

use crate::validation::{self, WorkoutDraft};
use crate::{
    CreateWorkoutRequest, Error, Result, UpdateWorkoutRequest, Workout, WorkoutId, WorkoutStore,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Default time allowed for acquiring the store lock
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(5);

/// Validated CRUD operations over a shared `WorkoutStore`
#[derive(Clone)]
pub struct WorkoutService {
    store: Arc<WorkoutStore>,
    deadline: Duration,
}

impl WorkoutService {
    pub fn new(store: Arc<WorkoutStore>, deadline: Duration) -> Self {
        Self { store, deadline }
    }

    pub fn store(&self) -> &Arc<WorkoutStore> {
        &self.store
    }

    pub async fn list(&self) -> Result<Vec<Workout>> {
        self.within_deadline(self.store.list()).await
    }

    pub async fn get(&self, id: WorkoutId) -> Result<Workout> {
        self.within_deadline(self.store.get(id))
            .await?
            .ok_or(Error::NotFound(id))
    }

    /// Validate and store a new workout
    pub async fn create(&self, req: CreateWorkoutRequest) -> Result<Workout> {
        let candidate = validation::validate(WorkoutDraft::from(req)).inspect_err(|e| {
            tracing::debug!(error = %e, "Rejected workout create");
        })?;

        let workout = self.within_deadline(self.store.create(candidate)).await?;
        tracing::info!(id = workout.id, title = %workout.title, "Created workout");
        Ok(workout)
    }

    /// Apply a partial update to an existing workout
    ///
    /// The merged record is validated as a whole before it is committed. If
    /// the workout disappears between the read and the commit, the commit
    /// reports `NotFound` rather than retrying.
    pub async fn update(&self, id: WorkoutId, patch: UpdateWorkoutRequest) -> Result<Workout> {
        let current = self.get(id).await?;

        let draft = WorkoutDraft::from_current(&current).merge(patch);
        let candidate = validation::validate(draft).inspect_err(|e| {
            tracing::debug!(id, error = %e, "Rejected workout update");
        })?;

        let workout = self
            .within_deadline(self.store.update(id, move |current| candidate.apply_to(current)))
            .await??;
        tracing::info!(id, "Updated workout");
        Ok(workout)
    }

    pub async fn delete(&self, id: WorkoutId) -> Result<()> {
        if self.within_deadline(self.store.delete(id)).await? {
            tracing::info!(id, "Deleted workout");
            Ok(())
        } else {
            Err(Error::NotFound(id))
        }
    }

    async fn within_deadline<F>(&self, op: F) -> Result<F::Output>
    where
        F: Future,
    {
        tokio::time::timeout(self.deadline, op).await.map_err(|_| {
            tracing::warn!(deadline = ?self.deadline, "Store lock not acquired before deadline");
            Error::DeadlineExceeded(self.deadline)
        })
    }
}

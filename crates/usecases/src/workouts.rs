//! Workout template use cases.

use std::sync::Arc;

use tracing::{debug, info, instrument};
use tracker::{DomainError, NewWorkout, Parse, RawWorkout, Workout, WorkoutId, WorkoutRepositoryPort};

/// Creates a workout with a fresh identifier and stores it.
#[derive(Clone)]
pub struct CreateWorkout {
    workouts: Arc<dyn WorkoutRepositoryPort>,
}

impl CreateWorkout {
    /// Creates the use case over the given [`WorkoutRepositoryPort`].
    pub fn new(workouts: Arc<dyn WorkoutRepositoryPort>) -> Self {
        Self { workouts }
    }

    #[instrument(skip_all, fields(name = %input.name), err)]
    pub async fn execute(&self, input: NewWorkout) -> Result<Workout, DomainError> {
        let workout = Workout::create(input)?;
        let stored = self.workouts.create(workout).await?;
        info!(workout_id = %stored.id(), exercises = stored.exercises().len(), "Workout created");
        Ok(stored)
    }
}

/// Lists every workout template.
#[derive(Clone)]
pub struct GetWorkouts {
    workouts: Arc<dyn WorkoutRepositoryPort>,
}

impl GetWorkouts {
    /// Creates the use case over the given [`WorkoutRepositoryPort`].
    pub fn new(workouts: Arc<dyn WorkoutRepositoryPort>) -> Self {
        Self { workouts }
    }

    #[instrument(skip_all, err)]
    pub async fn execute(&self) -> Result<Vec<Workout>, DomainError> {
        let all = self.workouts.get_all().await?;
        debug!(count = all.len(), "Workouts loaded");
        Ok(all)
    }
}

/// Looks up one workout template.
#[derive(Clone)]
pub struct GetWorkoutById {
    workouts: Arc<dyn WorkoutRepositoryPort>,
}

impl GetWorkoutById {
    /// Creates the use case over the given [`WorkoutRepositoryPort`].
    pub fn new(workouts: Arc<dyn WorkoutRepositoryPort>) -> Self {
        Self { workouts }
    }

    #[instrument(skip_all, fields(workout_id = %id), err)]
    pub async fn execute(&self, id: &str) -> Result<Option<Workout>, DomainError> {
        let id = WorkoutId::parse(id.to_owned())?;
        Ok(self.workouts.get_by_id(&id).await?)
    }
}

/// Revalidates a full workout payload and stores it over the existing one.
#[derive(Clone)]
pub struct UpdateWorkout {
    workouts: Arc<dyn WorkoutRepositoryPort>,
}

impl UpdateWorkout {
    /// Creates the use case over the given [`WorkoutRepositoryPort`].
    pub fn new(workouts: Arc<dyn WorkoutRepositoryPort>) -> Self {
        Self { workouts }
    }

    #[instrument(skip_all, fields(workout_id = %input.id), err)]
    pub async fn execute(&self, input: RawWorkout) -> Result<Workout, DomainError> {
        let workout = Workout::parse(input)?;
        let stored = self.workouts.update(workout).await?;
        info!("Workout updated");
        Ok(stored)
    }
}

/// Deletes a workout template by identifier.
///
/// Logs already recorded against the workout are left alone.
#[derive(Clone)]
pub struct DeleteWorkout {
    workouts: Arc<dyn WorkoutRepositoryPort>,
}

impl DeleteWorkout {
    /// Creates the use case over the given [`WorkoutRepositoryPort`].
    pub fn new(workouts: Arc<dyn WorkoutRepositoryPort>) -> Self {
        Self { workouts }
    }

    #[instrument(skip_all, fields(workout_id = %id), err)]
    pub async fn execute(&self, id: &str) -> Result<(), DomainError> {
        let id = WorkoutId::parse(id.to_owned())?;
        self.workouts.delete(&id).await?;
        info!("Workout deleted");
        Ok(())
    }
}

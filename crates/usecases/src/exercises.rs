//! Exercise catalogue use cases.

use std::sync::Arc;

use tracing::{debug, info, instrument};
use tracker::{
    DomainError, Exercise, ExerciseId, ExerciseRepositoryPort, NewExercise, Parse, RawExercise,
};

/// Creates an exercise with a fresh identifier and stores it.
#[derive(Clone)]
pub struct CreateExercise {
    exercises: Arc<dyn ExerciseRepositoryPort>,
}

impl CreateExercise {
    /// Creates the use case over the given [`ExerciseRepositoryPort`].
    pub fn new(exercises: Arc<dyn ExerciseRepositoryPort>) -> Self {
        Self { exercises }
    }

    #[instrument(skip_all, fields(name = %input.name), err)]
    pub async fn execute(&self, input: NewExercise) -> Result<Exercise, DomainError> {
        let exercise = Exercise::create(input)?;
        let stored = self.exercises.create(exercise).await?;
        info!(exercise_id = %stored.id(), "Exercise created");
        Ok(stored)
    }
}

/// Lists the exercise catalogue.
#[derive(Clone)]
pub struct GetExercises {
    exercises: Arc<dyn ExerciseRepositoryPort>,
}

impl GetExercises {
    /// Creates the use case over the given [`ExerciseRepositoryPort`].
    pub fn new(exercises: Arc<dyn ExerciseRepositoryPort>) -> Self {
        Self { exercises }
    }

    #[instrument(skip_all, err)]
    pub async fn execute(&self) -> Result<Vec<Exercise>, DomainError> {
        let all = self.exercises.get_all().await?;
        debug!(count = all.len(), "Exercises loaded");
        Ok(all)
    }
}

/// Looks up one exercise.
#[derive(Clone)]
pub struct GetExerciseById {
    exercises: Arc<dyn ExerciseRepositoryPort>,
}

impl GetExerciseById {
    /// Creates the use case over the given [`ExerciseRepositoryPort`].
    pub fn new(exercises: Arc<dyn ExerciseRepositoryPort>) -> Self {
        Self { exercises }
    }

    #[instrument(skip_all, fields(exercise_id = %id), err)]
    pub async fn execute(&self, id: &str) -> Result<Option<Exercise>, DomainError> {
        let id = ExerciseId::parse(id.to_owned())?;
        Ok(self.exercises.get_by_id(&id).await?)
    }
}

/// Revalidates a full exercise payload and stores it over the existing one.
#[derive(Clone)]
pub struct UpdateExercise {
    exercises: Arc<dyn ExerciseRepositoryPort>,
}

impl UpdateExercise {
    /// Creates the use case over the given [`ExerciseRepositoryPort`].
    pub fn new(exercises: Arc<dyn ExerciseRepositoryPort>) -> Self {
        Self { exercises }
    }

    #[instrument(skip_all, fields(exercise_id = %input.id), err)]
    pub async fn execute(&self, input: RawExercise) -> Result<Exercise, DomainError> {
        let exercise = Exercise::parse(input)?;
        let stored = self.exercises.update(exercise).await?;
        info!("Exercise updated");
        Ok(stored)
    }
}

/// Deletes an exercise by identifier.
#[derive(Clone)]
pub struct DeleteExercise {
    exercises: Arc<dyn ExerciseRepositoryPort>,
}

impl DeleteExercise {
    /// Creates the use case over the given [`ExerciseRepositoryPort`].
    pub fn new(exercises: Arc<dyn ExerciseRepositoryPort>) -> Self {
        Self { exercises }
    }

    #[instrument(skip_all, fields(exercise_id = %id), err)]
    pub async fn execute(&self, id: &str) -> Result<(), DomainError> {
        let id = ExerciseId::parse(id.to_owned())?;
        self.exercises.delete(&id).await?;
        info!("Exercise deleted");
        Ok(())
    }
}

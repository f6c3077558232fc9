//! Per-entity repository ports

use async_trait::async_trait;

use crate::entities::{Exercise, Workout, WorkoutLog};
use crate::errors::PortError;
use crate::identifiers::{ExerciseId, WorkoutId, WorkoutLogId};

/// Persistence for the exercise catalogue.
#[async_trait]
pub trait ExerciseRepositoryPort: Send + Sync {
    /// Stores a new exercise and returns it as stored.
    async fn create(&self, exercise: Exercise) -> Result<Exercise, PortError>;

    /// Every stored exercise, in adapter-defined order.
    async fn get_all(&self) -> Result<Vec<Exercise>, PortError>;

    async fn get_by_id(&self, id: &ExerciseId) -> Result<Option<Exercise>, PortError>;

    /// Replaces the stored exercise with the same identifier.
    ///
    /// Updating an unknown identifier is adapter-defined.
    async fn update(&self, exercise: Exercise) -> Result<Exercise, PortError>;

    async fn delete(&self, id: &ExerciseId) -> Result<(), PortError>;
}

/// Persistence for workout templates.
#[async_trait]
pub trait WorkoutRepositoryPort: Send + Sync {
    /// Stores a new workout and returns it as stored.
    async fn create(&self, workout: Workout) -> Result<Workout, PortError>;

    /// Every stored workout, in adapter-defined order.
    async fn get_all(&self) -> Result<Vec<Workout>, PortError>;

    async fn get_by_id(&self, id: &WorkoutId) -> Result<Option<Workout>, PortError>;

    /// Replaces the stored workout with the same identifier.
    async fn update(&self, workout: Workout) -> Result<Workout, PortError>;

    async fn delete(&self, id: &WorkoutId) -> Result<(), PortError>;
}

/// Persistence for workout sessions.
///
/// Logs are never deleted through the domain; retention is the adapter's call.
#[async_trait]
pub trait WorkoutLogRepositoryPort: Send + Sync {
    /// Stores a new log and returns it as stored.
    async fn create(&self, log: WorkoutLog) -> Result<WorkoutLog, PortError>;

    /// Every stored log, in adapter-defined order.
    async fn get_all(&self) -> Result<Vec<WorkoutLog>, PortError>;

    async fn get_by_id(&self, id: &WorkoutLogId) -> Result<Option<WorkoutLog>, PortError>;

    /// Replaces the stored log with the same identifier.
    async fn update(&self, log: WorkoutLog) -> Result<WorkoutLog, PortError>;
}

//! Workout session use cases.
//!
//! A session moves from in-progress to completed through [`CompleteWorkout`]
//! only. The read-modify-write use cases here issue two independent port calls
//! with no atomicity; concurrent writers to one log race, last write wins.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use tracker::{
    DomainError, EntityKind, ExerciseId, LoggedExerciseSet, NewWorkoutLog, NotFoundError, Parse,
    RawLoggedExerciseSet, Seconds, Timestamp, Validator, WorkoutLog, WorkoutLogId,
    WorkoutLogRepositoryPort,
};

/// Input for [`StartWorkout`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartWorkoutInput {
    pub workout_id: String,
}

/// Input for [`LogExerciseSet`]: the target log plus the set's own fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogExerciseSetInput {
    pub workout_log_id: String,
    #[serde(flatten)]
    pub set: RawLoggedExerciseSet,
}

/// Input for [`UpdateSetRestDuration`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSetRestDurationInput {
    pub workout_log_id: String,
    pub exercise_id: String,
    pub set_number: i64,
    pub new_rest_duration: f64,
}

struct SetToLog {
    log_id: WorkoutLogId,
    set: LoggedExerciseSet,
}

impl Parse for SetToLog {
    type Raw = LogExerciseSetInput;

    fn validate(raw: LogExerciseSetInput, v: &mut Validator) -> Option<Self> {
        let log_id = v.field("workoutLogId", |v| WorkoutLogId::validate(raw.workout_log_id, v));
        let set = LoggedExerciseSet::validate(raw.set, v);
        Some(Self {
            log_id: log_id?,
            set: set?,
        })
    }
}

struct RestDurationChange {
    log_id: WorkoutLogId,
    exercise_id: ExerciseId,
    set_number: u32,
    rest_duration: Seconds,
}

impl Parse for RestDurationChange {
    type Raw = UpdateSetRestDurationInput;

    fn validate(raw: UpdateSetRestDurationInput, v: &mut Validator) -> Option<Self> {
        let log_id = v.field("workoutLogId", |v| WorkoutLogId::validate(raw.workout_log_id, v));
        let exercise_id = v.field("exerciseId", |v| ExerciseId::validate(raw.exercise_id, v));
        let set_number = v.field("setNumber", |v| v.count(raw.set_number, 1));
        let rest_duration = v.field("newRestDuration", |v| v.seconds(raw.new_rest_duration));
        Some(Self {
            log_id: log_id?,
            exercise_id: exercise_id?,
            set_number: set_number?,
            rest_duration: rest_duration?,
        })
    }
}

async fn load(
    logs: &dyn WorkoutLogRepositoryPort,
    id: &WorkoutLogId,
) -> Result<WorkoutLog, DomainError> {
    logs.get_by_id(id)
        .await?
        .ok_or_else(|| NotFoundError::new(EntityKind::WorkoutLog, id.as_str()).into())
}

/// Opens a new in-progress session of a workout.
#[derive(Clone)]
pub struct StartWorkout {
    logs: Arc<dyn WorkoutLogRepositoryPort>,
}

impl StartWorkout {
    /// Creates the use case over the given [`WorkoutLogRepositoryPort`].
    pub fn new(logs: Arc<dyn WorkoutLogRepositoryPort>) -> Self {
        Self { logs }
    }

    #[instrument(skip_all, fields(workout_id = %input.workout_id), err)]
    pub async fn execute(&self, input: StartWorkoutInput) -> Result<WorkoutLog, DomainError> {
        let log = WorkoutLog::create(NewWorkoutLog::starting(input.workout_id, Timestamp::now()))?;
        let stored = self.logs.create(log).await?;
        info!(workout_log_id = %stored.id(), "Workout started");
        Ok(stored)
    }
}

/// Appends a performed set to an existing session.
#[derive(Clone)]
pub struct LogExerciseSet {
    logs: Arc<dyn WorkoutLogRepositoryPort>,
}

impl LogExerciseSet {
    /// Creates the use case over the given [`WorkoutLogRepositoryPort`].
    pub fn new(logs: Arc<dyn WorkoutLogRepositoryPort>) -> Self {
        Self { logs }
    }

    #[instrument(skip_all, fields(workout_log_id = %input.workout_log_id), err)]
    pub async fn execute(&self, input: LogExerciseSetInput) -> Result<WorkoutLog, DomainError> {
        let SetToLog { log_id, set } = SetToLog::parse(input)?;
        let log = load(self.logs.as_ref(), &log_id).await?;
        if log.is_completed() {
            debug!("Logging a set against a completed workout");
        }
        let updated = log.add_logged_set(set)?;
        let stored = self.logs.update(updated).await?;
        debug!(sets = stored.exercise_sets().len(), "Exercise set logged");
        Ok(stored)
    }
}

/// Rewrites the rest duration of a logged set.
///
/// Every set matching the `(exercise, set number)` pair is rewritten, so
/// duplicate pairs within one log all receive the new value.
#[derive(Clone)]
pub struct UpdateSetRestDuration {
    logs: Arc<dyn WorkoutLogRepositoryPort>,
}

impl UpdateSetRestDuration {
    /// Creates the use case over the given [`WorkoutLogRepositoryPort`].
    pub fn new(logs: Arc<dyn WorkoutLogRepositoryPort>) -> Self {
        Self { logs }
    }

    #[instrument(
        skip_all,
        fields(
            workout_log_id = %input.workout_log_id,
            exercise_id = %input.exercise_id,
            set_number = input.set_number
        ),
        err
    )]
    pub async fn execute(
        &self,
        input: UpdateSetRestDurationInput,
    ) -> Result<WorkoutLog, DomainError> {
        let change = RestDurationChange::parse(input)?;
        let log = load(self.logs.as_ref(), &change.log_id).await?;
        let updated =
            log.update_rest_duration(&change.exercise_id, change.set_number, change.rest_duration)?;
        let stored = self.logs.update(updated).await?;
        debug!(rest_duration = %change.rest_duration, "Rest duration updated");
        Ok(stored)
    }
}

/// Marks a session completed now.
#[derive(Clone)]
pub struct CompleteWorkout {
    logs: Arc<dyn WorkoutLogRepositoryPort>,
}

impl CompleteWorkout {
    /// Creates the use case over the given [`WorkoutLogRepositoryPort`].
    pub fn new(logs: Arc<dyn WorkoutLogRepositoryPort>) -> Self {
        Self { logs }
    }

    #[instrument(skip_all, fields(workout_log_id = %workout_log_id), err)]
    pub async fn execute(&self, workout_log_id: &str) -> Result<WorkoutLog, DomainError> {
        let id = WorkoutLogId::parse(workout_log_id.to_owned())?;
        let log = load(self.logs.as_ref(), &id).await?;
        let completed = log.complete(Timestamp::now())?;
        let stored = self.logs.update(completed).await?;
        info!(sets = stored.exercise_sets().len(), "Workout completed");
        Ok(stored)
    }
}

/// Lists every session.
#[derive(Clone)]
pub struct GetWorkoutLogs {
    logs: Arc<dyn WorkoutLogRepositoryPort>,
}

impl GetWorkoutLogs {
    /// Creates the use case over the given [`WorkoutLogRepositoryPort`].
    pub fn new(logs: Arc<dyn WorkoutLogRepositoryPort>) -> Self {
        Self { logs }
    }

    #[instrument(skip_all, err)]
    pub async fn execute(&self) -> Result<Vec<WorkoutLog>, DomainError> {
        Ok(self.logs.get_all().await?)
    }
}

/// Looks up one session.
#[derive(Clone)]
pub struct GetWorkoutLogById {
    logs: Arc<dyn WorkoutLogRepositoryPort>,
}

impl GetWorkoutLogById {
    /// Creates the use case over the given [`WorkoutLogRepositoryPort`].
    pub fn new(logs: Arc<dyn WorkoutLogRepositoryPort>) -> Self {
        Self { logs }
    }

    #[instrument(skip_all, fields(workout_log_id = %id), err)]
    pub async fn execute(&self, id: &str) -> Result<Option<WorkoutLog>, DomainError> {
        let id = WorkoutLogId::parse(id.to_owned())?;
        Ok(self.logs.get_by_id(&id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker::testing::InMemoryWorkoutLogRepository;
    use tracker::{RawTimestamp, WorkoutLogStatus};

    fn repo() -> Arc<InMemoryWorkoutLogRepository> {
        Arc::new(InMemoryWorkoutLogRepository::new())
    }

    fn set_input(log_id: &str, exercise_id: &str, set_number: i64) -> LogExerciseSetInput {
        LogExerciseSetInput {
            workout_log_id: log_id.to_string(),
            set: RawLoggedExerciseSet {
                exercise_id: exercise_id.to_string(),
                set_number,
                weight: Some(50.0),
                time: None,
                reps: Some(8),
                exercise_duration: 30.0,
                rest_duration: 60.0,
                completed_at: RawTimestamp::from("2024-05-01T09:30:00Z"),
            },
        }
    }

    async fn started(repo: &Arc<InMemoryWorkoutLogRepository>) -> WorkoutLog {
        StartWorkout::new(repo.clone())
            .execute(StartWorkoutInput {
                workout_id: "w1".to_string(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn start_creates_in_progress_empty_log() {
        let repo = repo();
        let log = started(&repo).await;
        assert_eq!(log.workout_id().as_str(), "w1");
        assert_eq!(log.status(), WorkoutLogStatus::InProgress);
        assert!(log.exercise_sets().is_empty());
        assert_eq!(repo.snapshot(), vec![log]);
    }

    #[tokio::test]
    async fn start_rejects_empty_workout_id() {
        let repo = repo();
        let err = StartWorkout::new(repo.clone())
            .execute(StartWorkoutInput {
                workout_id: String::new(),
            })
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn log_set_appends_validated_set() {
        let repo = repo();
        let log = started(&repo).await;
        let input = set_input(log.id().as_str(), "e1", 1);
        let expected = LoggedExerciseSet::parse(input.set.clone()).unwrap();

        let updated = LogExerciseSet::new(repo.clone()).execute(input).await.unwrap();
        assert_eq!(updated.exercise_sets(), &[expected]);
        assert_eq!(repo.snapshot()[0], updated);
    }

    #[tokio::test]
    async fn log_set_on_missing_log_is_not_found() {
        let err = LogExerciseSet::new(repo())
            .execute(set_input("nope", "e1", 1))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Workout log not found");
    }

    #[tokio::test]
    async fn log_set_validates_before_loading() {
        let repo = repo();
        let log = started(&repo).await;
        let calls = repo.calls();
        let err = LogExerciseSet::new(repo.clone())
            .execute(set_input(log.id().as_str(), "e1", 0))
            .await
            .unwrap_err();
        match err {
            DomainError::Validation(v) => assert_eq!(v.path, "setNumber"),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(repo.calls(), calls);
    }

    #[tokio::test]
    async fn complete_sets_timestamp_and_keeps_sets() {
        let repo = repo();
        let log = started(&repo).await;
        LogExerciseSet::new(repo.clone())
            .execute(set_input(log.id().as_str(), "e1", 1))
            .await
            .unwrap();

        let done = CompleteWorkout::new(repo.clone())
            .execute(log.id().as_str())
            .await
            .unwrap();
        assert!(done.completed_at().is_some());
        assert!(done.completed_at() >= Some(done.started_at()));
        assert_eq!(done.exercise_sets().len(), 1);
    }

    #[tokio::test]
    async fn complete_on_missing_log_is_not_found() {
        let err = CompleteWorkout::new(repo()).execute("nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn rest_duration_update_hits_every_duplicate_pair() {
        let repo = repo();
        let log = started(&repo).await;
        let log_set = LogExerciseSet::new(repo.clone());
        log_set.execute(set_input(log.id().as_str(), "e1", 1)).await.unwrap();
        log_set.execute(set_input(log.id().as_str(), "e1", 1)).await.unwrap();
        log_set.execute(set_input(log.id().as_str(), "e1", 2)).await.unwrap();

        let updated = UpdateSetRestDuration::new(repo.clone())
            .execute(UpdateSetRestDurationInput {
                workout_log_id: log.id().to_string(),
                exercise_id: "e1".to_string(),
                set_number: 1,
                new_rest_duration: 90.0,
            })
            .await
            .unwrap();
        let rests: Vec<f64> = updated
            .exercise_sets()
            .iter()
            .map(|s| s.rest_duration().as_f64())
            .collect();
        assert_eq!(rests, vec![90.0, 90.0, 60.0]);
    }

    #[tokio::test]
    async fn rest_duration_update_on_missing_log_is_not_found() {
        let err = UpdateSetRestDuration::new(repo())
            .execute(UpdateSetRestDurationInput {
                workout_log_id: "nope".to_string(),
                exercise_id: "e1".to_string(),
                set_number: 1,
                new_rest_duration: 90.0,
            })
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn rest_duration_update_rejects_negative_rest() {
        let err = UpdateSetRestDuration::new(repo())
            .execute(UpdateSetRestDurationInput {
                workout_log_id: "log".to_string(),
                exercise_id: "e1".to_string(),
                set_number: 1,
                new_rest_duration: -1.0,
            })
            .await
            .unwrap_err();
        match err {
            DomainError::Validation(v) => assert_eq!(v.path, "newRestDuration"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn reads_pass_through() {
        let repo = repo();
        let log = started(&repo).await;
        assert_eq!(
            GetWorkoutLogById::new(repo.clone())
                .execute(log.id().as_str())
                .await
                .unwrap(),
            Some(log.clone())
        );
        assert_eq!(GetWorkoutLogById::new(repo.clone()).execute("x").await.unwrap(), None);
        assert_eq!(GetWorkoutLogs::new(repo).execute().await.unwrap(), vec![log]);
    }

    #[test]
    fn log_set_input_deserializes_flat_payload() {
        let json = serde_json::json!({
            "workoutLogId": "log-1",
            "exerciseId": "e1",
            "setNumber": 1,
            "weight": 50,
            "time": null,
            "reps": 8,
            "exerciseDuration": 30,
            "restDuration": 60,
            "completedAt": "2024-05-01T09:30:00Z"
        });
        let input: LogExerciseSetInput = serde_json::from_value(json).unwrap();
        assert_eq!(input.workout_log_id, "log-1");
        assert_eq!(input.set.set_number, 1);
    }
}

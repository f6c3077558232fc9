//! Subcommand bodies. Each one wires its use cases against the in-memory
//! ports and returns a value for `main` to print.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracker::testing::{
    InMemoryExerciseRepository, InMemoryStorage, InMemoryWorkoutLogRepository,
    InMemoryWorkoutRepository,
};
use tracker::{
    NewExercise, NewWorkout, RawLoggedExerciseSet, RawTimestamp, RawWorkoutExercise, Timestamp,
    WorkoutLog,
};
use usecases::{
    CounterUseCases, LogExerciseSetInput, StartWorkoutInput, UpdateSetRestDurationInput,
    WorkoutTrackerPorts, WorkoutTrackerUseCases,
};

use crate::config::CounterConfig;

/// Increments the configured counter `times` times and returns its final value.
pub async fn counter(config: &CounterConfig, times: u32) -> Result<i64> {
    let counter = CounterUseCases::with_key(Arc::new(InMemoryStorage::new()), &config.key);
    for _ in 0..times {
        counter.increment_counter.execute().await?;
    }
    let value = counter.get_counter.execute().await?;
    info!(key = %config.key, value, "Counter finished");
    Ok(value)
}

/// Runs a scripted session: catalogue two exercises, build a workout from
/// them, log every planned set, stretch one rest, and complete the log.
pub async fn demo() -> Result<WorkoutLog> {
    let tracker = WorkoutTrackerUseCases::new(WorkoutTrackerPorts {
        exercises: Arc::new(InMemoryExerciseRepository::new()),
        workouts: Arc::new(InMemoryWorkoutRepository::new()),
        workout_logs: Arc::new(InMemoryWorkoutLogRepository::new()),
    });

    let squat = tracker
        .create_exercise
        .execute(NewExercise {
            uses_weight: true,
            uses_reps: true,
            ..NewExercise::named("Back squat")
        })
        .await?;
    let plank = tracker
        .create_exercise
        .execute(NewExercise {
            uses_time: true,
            ..NewExercise::named("Plank")
        })
        .await?;

    let workout = tracker
        .create_workout
        .execute(NewWorkout {
            id: None,
            name: "Demo session".to_string(),
            exercises: vec![
                RawWorkoutExercise {
                    exercise_id: squat.id().to_string(),
                    sets: 3,
                },
                RawWorkoutExercise {
                    exercise_id: plank.id().to_string(),
                    sets: 2,
                },
            ],
        })
        .await?;

    let log = tracker
        .start_workout
        .execute(StartWorkoutInput {
            workout_id: workout.id().to_string(),
        })
        .await?;
    let log_id = log.id().to_string();

    for planned in workout.exercises() {
        let timed = planned.exercise_id() == plank.id();
        for set_number in 1..=planned.sets() {
            tracker
                .log_exercise_set
                .execute(LogExerciseSetInput {
                    workout_log_id: log_id.clone(),
                    set: RawLoggedExerciseSet {
                        exercise_id: planned.exercise_id().to_string(),
                        set_number: i64::from(set_number),
                        weight: (!timed).then_some(100.0),
                        time: timed.then_some(45.0),
                        reps: (!timed).then_some(5),
                        exercise_duration: if timed { 45.0 } else { 20.0 },
                        rest_duration: 90.0,
                        completed_at: RawTimestamp::from(Timestamp::now()),
                    },
                })
                .await?;
        }
    }

    tracker
        .update_set_rest_duration
        .execute(UpdateSetRestDurationInput {
            workout_log_id: log_id.clone(),
            exercise_id: squat.id().to_string(),
            set_number: 3,
            new_rest_duration: 180.0,
        })
        .await?;

    let done = tracker.complete_workout.execute(&log_id).await?;
    let stored = tracker
        .get_workout_log_by_id
        .execute(&log_id)
        .await?
        .context("completed workout log disappeared from storage")?;
    info!(workout_log_id = %done.id(), sets = stored.exercise_sets().len(), "Demo finished");
    Ok(stored)
}

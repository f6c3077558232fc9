//! Dependency-injection entry point for the workout tracker.
//!
//! A caller supplies concrete port implementations once, at wiring time, and
//! receives every workout use case already bound to them. There is no global
//! registry: two bundles built from different ports never share state.

use std::sync::Arc;

use tracker::{ExerciseRepositoryPort, WorkoutLogRepositoryPort, WorkoutRepositoryPort};

use crate::exercises::{
    CreateExercise, DeleteExercise, GetExerciseById, GetExercises, UpdateExercise,
};
use crate::workout_logs::{
    CompleteWorkout, GetWorkoutLogById, GetWorkoutLogs, LogExerciseSet, StartWorkout,
    UpdateSetRestDuration,
};
use crate::workouts::{CreateWorkout, DeleteWorkout, GetWorkoutById, GetWorkouts, UpdateWorkout};

/// Ports required by [`WorkoutTrackerUseCases`].
#[derive(Clone)]
pub struct WorkoutTrackerPorts {
    pub exercises: Arc<dyn ExerciseRepositoryPort>,
    pub workouts: Arc<dyn WorkoutRepositoryPort>,
    pub workout_logs: Arc<dyn WorkoutLogRepositoryPort>,
}

/// Every workout-tracker use case, bound to one set of ports.
#[derive(Clone)]
pub struct WorkoutTrackerUseCases {
    pub create_exercise: CreateExercise,
    pub get_exercises: GetExercises,
    pub get_exercise_by_id: GetExerciseById,
    pub update_exercise: UpdateExercise,
    pub delete_exercise: DeleteExercise,

    pub create_workout: CreateWorkout,
    pub get_workouts: GetWorkouts,
    pub get_workout_by_id: GetWorkoutById,
    pub update_workout: UpdateWorkout,
    pub delete_workout: DeleteWorkout,

    pub start_workout: StartWorkout,
    pub log_exercise_set: LogExerciseSet,
    pub update_set_rest_duration: UpdateSetRestDuration,
    pub complete_workout: CompleteWorkout,
    pub get_workout_logs: GetWorkoutLogs,
    pub get_workout_log_by_id: GetWorkoutLogById,
}

impl WorkoutTrackerUseCases {
    /// Binds every workout use case to `ports`.
    pub fn new(ports: WorkoutTrackerPorts) -> Self {
        let WorkoutTrackerPorts {
            exercises,
            workouts,
            workout_logs,
        } = ports;

        Self {
            create_exercise: CreateExercise::new(Arc::clone(&exercises)),
            get_exercises: GetExercises::new(Arc::clone(&exercises)),
            get_exercise_by_id: GetExerciseById::new(Arc::clone(&exercises)),
            update_exercise: UpdateExercise::new(Arc::clone(&exercises)),
            delete_exercise: DeleteExercise::new(exercises),

            create_workout: CreateWorkout::new(Arc::clone(&workouts)),
            get_workouts: GetWorkouts::new(Arc::clone(&workouts)),
            get_workout_by_id: GetWorkoutById::new(Arc::clone(&workouts)),
            update_workout: UpdateWorkout::new(Arc::clone(&workouts)),
            delete_workout: DeleteWorkout::new(workouts),

            start_workout: StartWorkout::new(Arc::clone(&workout_logs)),
            log_exercise_set: LogExerciseSet::new(Arc::clone(&workout_logs)),
            update_set_rest_duration: UpdateSetRestDuration::new(Arc::clone(&workout_logs)),
            complete_workout: CompleteWorkout::new(Arc::clone(&workout_logs)),
            get_workout_logs: GetWorkoutLogs::new(Arc::clone(&workout_logs)),
            get_workout_log_by_id: GetWorkoutLogById::new(workout_logs),
        }
    }
}

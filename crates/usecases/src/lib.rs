//! LiftLog use cases.
//!
//! Each business operation is one struct constructed with the ports it needs
//! and exposing a single `execute` method. Use cases parse and validate their
//! input into domain values, call one or more port operations, and return a
//! validated entity or a [`tracker::DomainError`].
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** Use cases sequence calls between the domain rules
//! in the [`tracker`] crate and the port traits it defines. They contain no
//! domain rules of their own and never name a concrete adapter.
//!
//! ## Bundles
//!
//! | Bundle | Ports |
//! |--------|-------|
//! | [`CounterUseCases`] | [`tracker::StoragePort`] |
//! | [`WorkoutTrackerUseCases`] | exercise, workout, and workout-log repositories |

pub mod counter;
pub mod exercises;
pub mod factory;
pub mod workout_logs;
pub mod workouts;

pub use counter::{CounterUseCases, GetCounter, IncrementCounter, DEFAULT_COUNTER_KEY};
pub use exercises::{CreateExercise, DeleteExercise, GetExerciseById, GetExercises, UpdateExercise};
pub use factory::{WorkoutTrackerPorts, WorkoutTrackerUseCases};
pub use workout_logs::{
    CompleteWorkout, GetWorkoutLogById, GetWorkoutLogs, LogExerciseSet, LogExerciseSetInput,
    StartWorkout, StartWorkoutInput, UpdateSetRestDuration, UpdateSetRestDurationInput,
};
pub use workouts::{CreateWorkout, DeleteWorkout, GetWorkoutById, GetWorkouts, UpdateWorkout};

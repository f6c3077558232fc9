//! Identity-bearing domain entities.
//!
//! Entities are immutable values. Each offers the same construction surface:
//! strict and tolerant parsing through [`Parse`](crate::Parse), `create` for
//! brand-new instances with a generated identifier, and copy-with-revalidate
//! `update` methods in place of setters.

mod exercise;
mod workout;
mod workout_log;

pub use exercise::{Exercise, NewExercise, RawExercise};
pub use workout::{NewWorkout, RawWorkout, Workout};
pub use workout_log::{NewWorkoutLog, RawWorkoutLog, WorkoutLog, WorkoutLogStatus};

//! Value objects embedded in entities.
//!
//! Equality is structural; none of these carries an identity of its own.

mod logged_exercise_set;
mod workout_exercise;

pub use logged_exercise_set::{LoggedExerciseSet, RawLoggedExerciseSet};
pub use workout_exercise::{RawWorkoutExercise, WorkoutExercise};

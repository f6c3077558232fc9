//! An exercise's slot within a workout template.

use serde::{Deserialize, Serialize};

use crate::entities::Exercise;
use crate::identifiers::ExerciseId;
use crate::validation::{Parse, Validator};

/// Unvalidated payload for a [`WorkoutExercise`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWorkoutExercise {
    pub exercise_id: String,
    pub sets: i64,
}

/// An exercise planned within a [`Workout`](crate::Workout), with the number
/// of sets to perform.
///
/// The optional `exercise` is a denormalized lookup convenience. It is never
/// serialized and stays absent unless a caller attaches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWorkoutExercise", into = "RawWorkoutExercise")]
pub struct WorkoutExercise {
    exercise_id: ExerciseId,
    sets: u32,
    exercise: Option<Exercise>,
}

impl WorkoutExercise {
    /// Returns the planned exercise's identifier.
    pub fn exercise_id(&self) -> &ExerciseId {
        &self.exercise_id
    }

    /// Planned number of sets, at least 1.
    pub fn sets(&self) -> u32 {
        self.sets
    }

    /// The attached exercise, if any.
    pub fn exercise(&self) -> Option<&Exercise> {
        self.exercise.as_ref()
    }

    /// Attaches the referenced exercise for display purposes.
    ///
    /// The reference is not checked against `exercise_id`.
    #[must_use]
    pub fn with_exercise(self, exercise: Exercise) -> Self {
        Self {
            exercise: Some(exercise),
            ..self
        }
    }

    /// Converts back to the unvalidated payload shape.
    pub fn to_raw(&self) -> RawWorkoutExercise {
        RawWorkoutExercise {
            exercise_id: self.exercise_id.to_string(),
            sets: i64::from(self.sets),
        }
    }
}

impl Parse for WorkoutExercise {
    type Raw = RawWorkoutExercise;

    fn validate(raw: RawWorkoutExercise, v: &mut Validator) -> Option<Self> {
        let exercise_id = v.field("exerciseId", |v| ExerciseId::validate(raw.exercise_id, v));
        let sets = v.field("sets", |v| v.count(raw.sets, 1));
        Some(Self {
            exercise_id: exercise_id?,
            sets: sets?,
            exercise: None,
        })
    }
}

impl TryFrom<RawWorkoutExercise> for WorkoutExercise {
    type Error = crate::ValidationReport;

    fn try_from(raw: RawWorkoutExercise) -> Result<Self, Self::Error> {
        Self::safe_parse(raw)
    }
}

impl From<WorkoutExercise> for RawWorkoutExercise {
    fn from(we: WorkoutExercise) -> Self {
        we.to_raw()
    }
}

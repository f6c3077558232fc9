//! The Workout entity: a named, ordered plan of exercises.

use serde::{Deserialize, Serialize};

use crate::entities::Exercise;
use crate::errors::{ValidationError, ValidationReport};
use crate::identifiers::WorkoutId;
use crate::validation::{Parse, Validator};
use crate::value_objects::{RawWorkoutExercise, WorkoutExercise};

/// Unvalidated payload for a [`Workout`] with a known identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWorkout {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<RawWorkoutExercise>,
}

/// Payload for creating a [`Workout`]; the identifier is generated when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkout {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<RawWorkoutExercise>,
}

/// A workout template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWorkout", into = "RawWorkout")]
pub struct Workout {
    id: WorkoutId,
    name: String,
    exercises: Vec<WorkoutExercise>,
}

impl Workout {
    /// Builds a brand-new workout, generating an identifier unless one is
    /// supplied.
    pub fn create(new: NewWorkout) -> Result<Self, ValidationError> {
        Self::parse(RawWorkout {
            id: new.id.unwrap_or_else(|| WorkoutId::generate().into_string()),
            name: new.name,
            exercises: new.exercises,
        })
    }

    /// Returns a revalidated copy with `change` applied; the identifier is kept.
    ///
    /// Attached exercise references do not survive an update.
    pub fn update(&self, change: impl FnOnce(&mut RawWorkout)) -> Result<Self, ValidationError> {
        let mut raw = self.to_raw();
        change(&mut raw);
        raw.id = self.id.to_string();
        Self::parse(raw)
    }

    /// Returns the workout's identifier.
    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Planned exercises in order.
    pub fn exercises(&self) -> &[WorkoutExercise] {
        &self.exercises
    }

    /// Total number of planned sets across all exercises.
    pub fn total_sets(&self) -> u64 {
        self.exercises.iter().map(|we| u64::from(we.sets())).sum()
    }

    /// Attaches every catalogue exercise whose identifier appears in the plan.
    ///
    /// Entries with no match in `catalogue` keep their current attachment.
    #[must_use]
    pub fn with_exercises_attached(self, catalogue: &[Exercise]) -> Self {
        let exercises = self
            .exercises
            .into_iter()
            .map(|we| {
                match catalogue.iter().find(|e| e.id() == we.exercise_id()) {
                    Some(exercise) => we.with_exercise(exercise.clone()),
                    None => we,
                }
            })
            .collect();
        Self { exercises, ..self }
    }

    /// Converts back to the unvalidated payload shape.
    pub fn to_raw(&self) -> RawWorkout {
        RawWorkout {
            id: self.id.to_string(),
            name: self.name.clone(),
            exercises: self.exercises.iter().map(WorkoutExercise::to_raw).collect(),
        }
    }
}

impl Parse for Workout {
    type Raw = RawWorkout;

    fn validate(raw: RawWorkout, v: &mut Validator) -> Option<Self> {
        let id = v.field("id", |v| WorkoutId::validate(raw.id, v));
        let name = v.field("name", |v| v.non_empty(raw.name));
        let exercises = v.field("exercises", |v| {
            v.each(raw.exercises, WorkoutExercise::validate)
        });
        Some(Self {
            id: id?,
            name: name?,
            exercises: exercises?,
        })
    }
}

impl TryFrom<RawWorkout> for Workout {
    type Error = ValidationReport;

    fn try_from(raw: RawWorkout) -> Result<Self, Self::Error> {
        Self::safe_parse(raw)
    }
}

impl From<Workout> for RawWorkout {
    fn from(workout: Workout) -> Self {
        workout.to_raw()
    }
}

//! A single set performed during a workout session.

use serde::{Deserialize, Serialize};

use crate::identifiers::ExerciseId;
use crate::types::{RawTimestamp, Seconds, Timestamp};
use crate::validation::{Parse, Validator};

/// Unvalidated payload for a [`LoggedExerciseSet`].
///
/// Numeric fields are deliberately wider than their validated counterparts so
/// that out-of-range input (`setNumber: 0`, `reps: -2`) reaches validation and
/// is reported with a path instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLoggedExerciseSet {
    pub exercise_id: String,
    pub set_number: i64,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub time: Option<f64>,
    #[serde(default)]
    pub reps: Option<i64>,
    pub exercise_duration: f64,
    pub rest_duration: f64,
    pub completed_at: RawTimestamp,
}

/// One logged set, embedded in a [`WorkoutLog`](crate::WorkoutLog).
///
/// Which of `weight`, `time`, and `reps` are meaningful depends on the
/// referenced exercise's `uses_*` flags. That cross-check is not enforced
/// here: any combination of present and absent metrics is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLoggedExerciseSet", into = "RawLoggedExerciseSet")]
pub struct LoggedExerciseSet {
    exercise_id: ExerciseId,
    set_number: u32,
    weight: Option<f64>,
    time: Option<f64>,
    reps: Option<u32>,
    exercise_duration: Seconds,
    rest_duration: Seconds,
    completed_at: Timestamp,
}

impl LoggedExerciseSet {
    /// Returns the exercise this set was performed for.
    pub fn exercise_id(&self) -> &ExerciseId {
        &self.exercise_id
    }

    /// 1-based position of this set within its exercise.
    pub fn set_number(&self) -> u32 {
        self.set_number
    }

    /// Returns the weight lifted, if recorded.
    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    /// Returns the time metric, if recorded.
    pub fn time(&self) -> Option<f64> {
        self.time
    }

    /// Returns the repetitions performed, if recorded.
    pub fn reps(&self) -> Option<u32> {
        self.reps
    }

    /// Time spent actively performing the set.
    pub fn exercise_duration(&self) -> Seconds {
        self.exercise_duration
    }

    /// Rest taken before the next set.
    pub fn rest_duration(&self) -> Seconds {
        self.rest_duration
    }

    /// Returns when the set was finished.
    pub fn completed_at(&self) -> Timestamp {
        self.completed_at
    }

    /// Returns `true` if this set is `set_number` of `exercise_id`.
    pub fn is_set(&self, exercise_id: &ExerciseId, set_number: u32) -> bool {
        self.exercise_id == *exercise_id && self.set_number == set_number
    }

    /// Converts back to the unvalidated payload shape.
    pub fn to_raw(&self) -> RawLoggedExerciseSet {
        RawLoggedExerciseSet {
            exercise_id: self.exercise_id.to_string(),
            set_number: i64::from(self.set_number),
            weight: self.weight,
            time: self.time,
            reps: self.reps.map(i64::from),
            exercise_duration: self.exercise_duration.as_f64(),
            rest_duration: self.rest_duration.as_f64(),
            completed_at: self.completed_at.into(),
        }
    }
}

impl Parse for LoggedExerciseSet {
    type Raw = RawLoggedExerciseSet;

    fn validate(raw: RawLoggedExerciseSet, v: &mut Validator) -> Option<Self> {
        let exercise_id = v.field("exerciseId", |v| ExerciseId::validate(raw.exercise_id, v));
        let set_number = v.field("setNumber", |v| v.count(raw.set_number, 1));
        let weight = v.field("weight", |v| optional(raw.weight, |w| v.finite(w)));
        let time = v.field("time", |v| optional(raw.time, |t| v.finite(t)));
        let reps = v.field("reps", |v| optional(raw.reps, |r| v.count(r, 0)));
        let exercise_duration = v.field("exerciseDuration", |v| v.seconds(raw.exercise_duration));
        let rest_duration = v.field("restDuration", |v| v.seconds(raw.rest_duration));
        let completed_at = v.field("completedAt", |v| Timestamp::validate(raw.completed_at, v));

        Some(Self {
            exercise_id: exercise_id?,
            set_number: set_number?,
            weight: weight?,
            time: time?,
            reps: reps?,
            exercise_duration: exercise_duration?,
            rest_duration: rest_duration?,
            completed_at: completed_at?,
        })
    }
}

/// Validates an optional field: absent is valid, present must pass `check`.
///
/// The outer `Option` is the validation outcome, the inner one the field value.
fn optional<T, U>(value: Option<T>, check: impl FnOnce(T) -> Option<U>) -> Option<Option<U>> {
    match value {
        None => Some(None),
        Some(value) => check(value).map(Some),
    }
}

impl TryFrom<RawLoggedExerciseSet> for LoggedExerciseSet {
    type Error = crate::ValidationReport;

    fn try_from(raw: RawLoggedExerciseSet) -> Result<Self, Self::Error> {
        Self::safe_parse(raw)
    }
}

impl From<LoggedExerciseSet> for RawLoggedExerciseSet {
    fn from(set: LoggedExerciseSet) -> Self {
        set.to_raw()
    }
}

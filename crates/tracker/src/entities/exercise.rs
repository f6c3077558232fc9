//! The Exercise entity.

use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, ValidationReport};
use crate::identifiers::ExerciseId;
use crate::validation::{Parse, Validator};

/// Unvalidated payload for an [`Exercise`] with a known identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExercise {
    pub id: String,
    pub name: String,
    pub uses_weight: bool,
    pub uses_time: bool,
    pub uses_reps: bool,
    #[serde(default)]
    pub is_two_sided: bool,
}

/// Payload for creating an [`Exercise`]; the identifier is generated when
/// absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExercise {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub uses_weight: bool,
    pub uses_time: bool,
    pub uses_reps: bool,
    #[serde(default)]
    pub is_two_sided: bool,
}

impl NewExercise {
    /// A new exercise with the given name and every metric flag off.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            uses_weight: false,
            uses_time: false,
            uses_reps: false,
            is_two_sided: false,
        }
    }
}

/// A movement in the exercise catalogue.
///
/// The `uses_*` flags describe which metrics a logged set of this exercise may
/// carry; `is_two_sided` means sets are performed once per side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawExercise", into = "RawExercise")]
pub struct Exercise {
    id: ExerciseId,
    name: String,
    uses_weight: bool,
    uses_time: bool,
    uses_reps: bool,
    is_two_sided: bool,
}

impl Exercise {
    /// Builds a brand-new exercise, generating an identifier unless one is
    /// supplied.
    pub fn create(new: NewExercise) -> Result<Self, ValidationError> {
        Self::parse(RawExercise {
            id: new.id.unwrap_or_else(|| ExerciseId::generate().into_string()),
            name: new.name,
            uses_weight: new.uses_weight,
            uses_time: new.uses_time,
            uses_reps: new.uses_reps,
            is_two_sided: new.is_two_sided,
        })
    }

    /// Returns a revalidated copy with `change` applied; the identifier is kept.
    pub fn update(&self, change: impl FnOnce(&mut RawExercise)) -> Result<Self, ValidationError> {
        let mut raw = self.to_raw();
        change(&mut raw);
        raw.id = self.id.to_string();
        Self::parse(raw)
    }

    /// Returns the exercise's identifier.
    pub fn id(&self) -> &ExerciseId {
        &self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if logged sets record a weight.
    pub fn uses_weight(&self) -> bool {
        self.uses_weight
    }

    /// Returns `true` if logged sets record a time.
    pub fn uses_time(&self) -> bool {
        self.uses_time
    }

    /// Returns `true` if logged sets record repetitions.
    pub fn uses_reps(&self) -> bool {
        self.uses_reps
    }

    /// Returns `true` if the exercise is performed once per side.
    pub fn is_two_sided(&self) -> bool {
        self.is_two_sided
    }

    /// Converts back to the unvalidated payload shape.
    pub fn to_raw(&self) -> RawExercise {
        RawExercise {
            id: self.id.to_string(),
            name: self.name.clone(),
            uses_weight: self.uses_weight,
            uses_time: self.uses_time,
            uses_reps: self.uses_reps,
            is_two_sided: self.is_two_sided,
        }
    }
}

impl Parse for Exercise {
    type Raw = RawExercise;

    fn validate(raw: RawExercise, v: &mut Validator) -> Option<Self> {
        let id = v.field("id", |v| ExerciseId::validate(raw.id, v));
        let name = v.field("name", |v| v.non_empty(raw.name));
        Some(Self {
            id: id?,
            name: name?,
            uses_weight: raw.uses_weight,
            uses_time: raw.uses_time,
            uses_reps: raw.uses_reps,
            is_two_sided: raw.is_two_sided,
        })
    }
}

impl TryFrom<RawExercise> for Exercise {
    type Error = ValidationReport;

    fn try_from(raw: RawExercise) -> Result<Self, Self::Error> {
        Self::safe_parse(raw)
    }
}

impl From<Exercise> for RawExercise {
    fn from(exercise: Exercise) -> Self {
        exercise.to_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_bench() -> RawExercise {
        RawExercise {
            id: "bench".to_string(),
            name: "Bench press".to_string(),
            uses_weight: true,
            uses_time: false,
            uses_reps: true,
            is_two_sided: false,
        }
    }

    #[test]
    fn parse_accepts_valid_payload() {
        let exercise = Exercise::parse(raw_bench()).unwrap();
        assert_eq!(exercise.id().as_str(), "bench");
        assert_eq!(exercise.name(), "Bench press");
        assert!(exercise.uses_weight());
        assert!(!exercise.uses_time());
        assert!(exercise.uses_reps());
        assert!(!exercise.is_two_sided());
    }

    #[test]
    fn parse_rejects_empty_name() {
        let err = Exercise::parse(RawExercise {
            name: String::new(),
            ..raw_bench()
        })
        .unwrap_err();
        assert_eq!(err.path, "name");
    }

    #[test]
    fn safe_parse_reports_id_and_name_together() {
        let report = Exercise::safe_parse(RawExercise {
            id: String::new(),
            name: String::new(),
            ..raw_bench()
        })
        .unwrap_err();
        assert_eq!(report.len(), 2);
        assert_eq!(report.first().path, "id");
    }

    #[test]
    fn create_generates_distinct_ids() {
        let a = Exercise::create(NewExercise::named("Plank")).unwrap();
        let b = Exercise::create(NewExercise::named("Plank")).unwrap();
        assert!(!a.id().as_str().is_empty());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn create_keeps_supplied_id() {
        let exercise = Exercise::create(NewExercise {
            id: Some("plank".to_string()),
            uses_time: true,
            ..NewExercise::named("Plank")
        })
        .unwrap();
        assert_eq!(exercise.id().as_str(), "plank");
        assert!(exercise.uses_time());
    }

    #[test]
    fn create_rejects_empty_supplied_id() {
        let err = Exercise::create(NewExercise {
            id: Some(String::new()),
            ..NewExercise::named("Plank")
        })
        .unwrap_err();
        assert_eq!(err.path, "id");
    }

    #[test]
    fn update_revalidates_and_keeps_identity() {
        let exercise = Exercise::parse(raw_bench()).unwrap();
        let renamed = exercise
            .update(|raw| {
                raw.name = "Incline bench".to_string();
                raw.id = "hijacked".to_string();
            })
            .unwrap();
        assert_eq!(renamed.id(), exercise.id());
        assert_eq!(renamed.name(), "Incline bench");
        assert_eq!(exercise.name(), "Bench press");

        assert!(exercise.update(|raw| raw.name.clear()).is_err());
    }

    #[test]
    fn is_two_sided_defaults_to_false_when_missing() {
        let json = r#"{"id":"lunge","name":"Lunge","usesWeight":true,"usesTime":false,"usesReps":true}"#;
        let exercise: Exercise = serde_json::from_str(json).unwrap();
        assert!(!exercise.is_two_sided());
    }

    #[test]
    fn serde_round_trip_is_lossless() {
        let exercise = Exercise::parse(RawExercise {
            is_two_sided: true,
            ..raw_bench()
        })
        .unwrap();
        let json = serde_json::to_string(&exercise).unwrap();
        assert!(json.contains("\"isTwoSided\":true"));
        let back: Exercise = serde_json::from_str(&json).unwrap();
        assert_eq!(back, exercise);
    }
}

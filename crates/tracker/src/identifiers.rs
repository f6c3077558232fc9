//! Newtype domain identifiers.
//!
//! Every entity kind has its own identifier type wrapping a non-empty
//! `String`. The runtime representation is identical across kinds, but the
//! types are nominal: passing a [`WorkoutId`] where an [`ExerciseId`] is
//! expected does not compile.
//!
//! Identifiers are either parsed from caller-supplied strings or generated
//! fresh (random UUID v4 text) when a new entity is created.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ValidationError, ValidationReport};
use crate::validation::{Parse, Validator};

// ---------------------------------------------------------------------------
// Macro for String-wrapped identifiers.
// Generates: struct, Parse impl (non-empty), generate(), as_str(), Display,
// FromStr, TryFrom<String>, and a serde form validated on the way in.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Generates a fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the identifier, returning the underlying string.
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl Parse for $name {
            type Raw = String;

            fn validate(raw: String, v: &mut Validator) -> Option<Self> {
                v.non_empty(raw).map(Self)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s.to_owned())
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationReport;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::safe_parse(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = ValidationReport;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::safe_parse(value.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id! {
    /// Identifies an [`Exercise`](crate::Exercise) in the exercise catalogue.
    ExerciseId
}

string_id! {
    /// Identifies a [`Workout`](crate::Workout) template.
    WorkoutId
}

string_id! {
    /// Identifies a single performed (or in-progress) workout session.
    WorkoutLogId
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn parse_accepts_non_empty_string() {
        let id = ExerciseId::parse("e1".to_string()).unwrap();
        assert_eq!(id.as_str(), "e1");
        assert_eq!(id.to_string(), "e1");
    }

    #[test]
    fn parse_rejects_empty_string() {
        let err = WorkoutId::parse(String::new()).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn safe_parse_reports_instead_of_failing_fast() {
        let report = WorkoutLogId::safe_parse(String::new()).unwrap_err();
        assert_eq!(report.len(), 1);
        assert!(WorkoutLogId::safe_parse("log-1".to_string()).is_ok());
    }

    #[test]
    fn whitespace_only_is_accepted() {
        // Only emptiness is checked; trimming is the caller's concern.
        assert!(ExerciseId::parse(" ".to_string()).is_ok());
    }

    #[test]
    fn from_str_round_trips() {
        let id: WorkoutId = "w1".parse().unwrap();
        assert_eq!(id, WorkoutId::parse("w1".to_string()).unwrap());
        assert!("".parse::<WorkoutId>().is_err());
    }

    #[test]
    fn generated_ids_are_non_empty_and_unique() {
        let ids: HashSet<ExerciseId> = (0..256).map(|_| ExerciseId::generate()).collect();
        assert_eq!(ids.len(), 256);
        assert!(ids.iter().all(|id| !id.as_str().is_empty()));
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let id: ExerciseId = serde_json::from_str("\"bench\"").unwrap();
        assert_eq!(id.as_str(), "bench");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"bench\"");
        assert!(serde_json::from_str::<ExerciseId>("\"\"").is_err());
    }
}

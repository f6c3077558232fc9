//! Workout-tracker domain for LiftLog.
//!
//! This crate contains every domain concept, newtype identifier, value object,
//! entity, and port trait used by the use cases. Adapters implement the ports
//! defined here; they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; adapters define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`ExerciseId`, `WorkoutId`, `WorkoutLogId`) |
//! | [`types`] | Shared value types (`Seconds`, `Timestamp`, `RawTimestamp`) |
//! | [`validation`] | The [`Parse`] trait and the [`Validator`] it walks payloads with |
//! | [`value_objects`] | `LoggedExerciseSet`, `WorkoutExercise` |
//! | [`entities`] | `Exercise`, `Workout`, `WorkoutLog` |
//! | [`ports`] | Repository and key/value storage traits |
//! | [`errors`] | `ValidationError`, `NotFoundError`, `PortError`, `DomainError` |
//! | `testing` | In-memory port doubles (feature `testing`) |

pub mod entities;
pub mod errors;
pub mod identifiers;
pub mod ports;
pub mod types;
pub mod validation;
pub mod value_objects;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use entities::{
    Exercise, NewExercise, NewWorkout, NewWorkoutLog, RawExercise, RawWorkout, RawWorkoutLog,
    Workout, WorkoutLog, WorkoutLogStatus,
};
pub use errors::{
    DomainError, EntityKind, NotFoundError, PortError, ValidationError, ValidationReport,
};
pub use identifiers::{ExerciseId, WorkoutId, WorkoutLogId};
pub use ports::{
    ExerciseRepositoryPort, StoragePort, WorkoutLogRepositoryPort, WorkoutRepositoryPort,
};
pub use types::{RawTimestamp, Seconds, Timestamp};
pub use validation::{Parse, Validator};
pub use value_objects::{
    LoggedExerciseSet, RawLoggedExerciseSet, RawWorkoutExercise, WorkoutExercise,
};

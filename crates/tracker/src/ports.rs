//! Port definitions for the hexagonal architecture.
//!
//! These traits are the only boundary between the domain and persistence.
//! Adapters implement them outside this crate; use cases receive them as
//! `Arc<dyn ...>` at wiring time and never name a concrete adapter.
//!
//! Every operation may suspend. A read that finds nothing returns `Ok(None)`;
//! an `Err` always carries an adapter-defined [`PortError`](crate::PortError).

pub mod repositories;
pub mod storage;

pub use repositories::{ExerciseRepositoryPort, WorkoutLogRepositoryPort, WorkoutRepositoryPort};
pub use storage::StoragePort;

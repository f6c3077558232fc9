//! In-memory port implementations for tests and demonstrations.
//!
//! These are test doubles, not storage adapters: state lives for the lifetime
//! of the value, and failure can be switched on to exercise error paths. Every
//! port call is counted so tests can assert that invalid input never reached
//! storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use thiserror::Error;

use crate::entities::{Exercise, Workout, WorkoutLog};
use crate::errors::PortError;
use crate::identifiers::{ExerciseId, WorkoutId, WorkoutLogId};
use crate::ports::{
    ExerciseRepositoryPort, StoragePort, WorkoutLogRepositoryPort, WorkoutRepositoryPort,
};

/// Failures raised by the in-memory doubles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InMemoryError {
    /// Failure injected with `fail_with`.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// `create` was called with an identifier already stored.
    #[error("Duplicate id: {0}")]
    Duplicate(String),

    /// `update` or `delete` was called with an unknown identifier.
    #[error("Record not found: id={0}")]
    NotFound(String),
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ---------------------------------------------------------------------------
// Repositories
// ---------------------------------------------------------------------------

/// Entities the generic repository can store, keyed by their identifier.
pub trait Keyed: Clone + Send + Sync {
    /// Identifier type records are looked up by.
    type Key: PartialEq + std::fmt::Display + Send + Sync;

    /// Returns the record's identifier.
    fn key(&self) -> &Self::Key;
}

impl Keyed for Exercise {
    type Key = ExerciseId;

    fn key(&self) -> &ExerciseId {
        self.id()
    }
}

impl Keyed for Workout {
    type Key = WorkoutId;

    fn key(&self) -> &WorkoutId {
        self.id()
    }
}

impl Keyed for WorkoutLog {
    type Key = WorkoutLogId;

    fn key(&self) -> &WorkoutLogId {
        self.id()
    }
}

/// Insertion-ordered in-memory repository.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    records: Mutex<Vec<T>>,
    failure: Mutex<Option<String>>,
    calls: AtomicUsize,
}

pub type InMemoryExerciseRepository = InMemoryRepository<Exercise>;
pub type InMemoryWorkoutRepository = InMemoryRepository<Workout>;
pub type InMemoryWorkoutLogRepository = InMemoryRepository<WorkoutLog>;

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }
}

impl<T: Keyed> InMemoryRepository<T> {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository pre-populated with `records`.
    pub fn with_records(records: impl IntoIterator<Item = T>) -> Self {
        let repo = Self::default();
        lock(&repo.records).extend(records);
        repo
    }

    /// Makes every subsequent call fail with `message`; `None` heals the store.
    pub fn fail_with(&self, message: Option<&str>) {
        *lock(&self.failure) = message.map(str::to_owned);
    }

    /// Number of port calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Copy of the stored records, in insertion order.
    pub fn snapshot(&self) -> Vec<T> {
        lock(&self.records).clone()
    }

    fn enter(&self) -> Result<(), PortError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match lock(&self.failure).as_deref() {
            Some(message) => Err(PortError::new(InMemoryError::Unavailable(message.to_owned()))),
            None => Ok(()),
        }
    }

    fn insert(&self, record: T) -> Result<T, PortError> {
        self.enter()?;
        let mut records = lock(&self.records);
        if records.iter().any(|r| r.key() == record.key()) {
            return Err(PortError::new(InMemoryError::Duplicate(record.key().to_string())));
        }
        records.push(record.clone());
        Ok(record)
    }

    fn all(&self) -> Result<Vec<T>, PortError> {
        self.enter()?;
        Ok(self.snapshot())
    }

    fn find(&self, key: &T::Key) -> Result<Option<T>, PortError> {
        self.enter()?;
        Ok(lock(&self.records).iter().find(|r| r.key() == key).cloned())
    }

    fn replace(&self, record: T) -> Result<T, PortError> {
        self.enter()?;
        let mut records = lock(&self.records);
        match records.iter_mut().find(|r| r.key() == record.key()) {
            Some(slot) => {
                *slot = record.clone();
                Ok(record)
            }
            None => Err(PortError::new(InMemoryError::NotFound(record.key().to_string()))),
        }
    }

    fn remove(&self, key: &T::Key) -> Result<(), PortError> {
        self.enter()?;
        let mut records = lock(&self.records);
        let before = records.len();
        records.retain(|r| r.key() != key);
        if records.len() == before {
            Err(PortError::new(InMemoryError::NotFound(key.to_string())))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ExerciseRepositoryPort for InMemoryRepository<Exercise> {
    async fn create(&self, exercise: Exercise) -> Result<Exercise, PortError> {
        self.insert(exercise)
    }

    async fn get_all(&self) -> Result<Vec<Exercise>, PortError> {
        self.all()
    }

    async fn get_by_id(&self, id: &ExerciseId) -> Result<Option<Exercise>, PortError> {
        self.find(id)
    }

    async fn update(&self, exercise: Exercise) -> Result<Exercise, PortError> {
        self.replace(exercise)
    }

    async fn delete(&self, id: &ExerciseId) -> Result<(), PortError> {
        self.remove(id)
    }
}

#[async_trait]
impl WorkoutRepositoryPort for InMemoryRepository<Workout> {
    async fn create(&self, workout: Workout) -> Result<Workout, PortError> {
        self.insert(workout)
    }

    async fn get_all(&self) -> Result<Vec<Workout>, PortError> {
        self.all()
    }

    async fn get_by_id(&self, id: &WorkoutId) -> Result<Option<Workout>, PortError> {
        self.find(id)
    }

    async fn update(&self, workout: Workout) -> Result<Workout, PortError> {
        self.replace(workout)
    }

    async fn delete(&self, id: &WorkoutId) -> Result<(), PortError> {
        self.remove(id)
    }
}

#[async_trait]
impl WorkoutLogRepositoryPort for InMemoryRepository<WorkoutLog> {
    async fn create(&self, log: WorkoutLog) -> Result<WorkoutLog, PortError> {
        self.insert(log)
    }

    async fn get_all(&self) -> Result<Vec<WorkoutLog>, PortError> {
        self.all()
    }

    async fn get_by_id(&self, id: &WorkoutLogId) -> Result<Option<WorkoutLog>, PortError> {
        self.find(id)
    }

    async fn update(&self, log: WorkoutLog) -> Result<WorkoutLog, PortError> {
        self.replace(log)
    }
}

// ---------------------------------------------------------------------------
// Key/value storage
// ---------------------------------------------------------------------------

/// In-memory numeric key/value store.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    values: Mutex<HashMap<String, i64>>,
    failure: Mutex<Option<String>>,
}

impl InMemoryStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with `message`; `None` heals the store.
    pub fn fail_with(&self, message: Option<&str>) {
        *lock(&self.failure) = message.map(str::to_owned);
    }

    fn check(&self) -> Result<(), PortError> {
        match lock(&self.failure).as_deref() {
            Some(message) => Err(PortError::new(InMemoryError::Unavailable(message.to_owned()))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl StoragePort for InMemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<i64>, PortError> {
        self.check()?;
        Ok(lock(&self.values).get(key).copied())
    }

    async fn set(&self, key: &str, value: i64) -> Result<(), PortError> {
        self.check()?;
        lock(&self.values).insert(key.to_owned(), value);
        Ok(())
    }
}

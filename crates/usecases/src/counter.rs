//! Counter demonstration use cases over the numeric [`StoragePort`].

use std::sync::Arc;

use tracing::{debug, instrument};
use tracker::{DomainError, StoragePort, ValidationError};

/// Storage key used when none is configured.
pub const DEFAULT_COUNTER_KEY: &str = "counter";

/// Reads the counter, adds one, stores it, and returns the new value.
///
/// A counter already at `i64::MAX` is left untouched and reported as a
/// validation error.
#[derive(Clone)]
pub struct IncrementCounter {
    storage: Arc<dyn StoragePort>,
    key: String,
}

impl IncrementCounter {
    /// Creates the use case over `storage`, reading and writing `key`.
    pub fn new(storage: Arc<dyn StoragePort>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    #[instrument(skip_all, fields(key = %self.key), err)]
    pub async fn execute(&self) -> Result<i64, DomainError> {
        let current = self.storage.get(&self.key).await?.unwrap_or(0);
        let next = current.checked_add(1).ok_or_else(|| {
            ValidationError::new(self.key.as_str(), format!("must be less than {}", i64::MAX))
        })?;
        self.storage.set(&self.key, next).await?;
        debug!(value = next, "Counter incremented");
        Ok(next)
    }
}

/// Reads the counter; a counter never written reads as zero.
#[derive(Clone)]
pub struct GetCounter {
    storage: Arc<dyn StoragePort>,
    key: String,
}

impl GetCounter {
    /// Creates the use case over `storage`, reading and writing `key`.
    pub fn new(storage: Arc<dyn StoragePort>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    #[instrument(skip_all, fields(key = %self.key), err)]
    pub async fn execute(&self) -> Result<i64, DomainError> {
        Ok(self.storage.get(&self.key).await?.unwrap_or(0))
    }
}

/// Every counter use case, wired to one storage port.
#[derive(Clone)]
pub struct CounterUseCases {
    pub increment_counter: IncrementCounter,
    pub get_counter: GetCounter,
}

impl CounterUseCases {
    /// Wires the counter use cases against [`DEFAULT_COUNTER_KEY`].
    /// Creates the use case over the given [`StoragePort`].
    pub fn new(storage: Arc<dyn StoragePort>) -> Self {
        Self::with_key(storage, DEFAULT_COUNTER_KEY)
    }

    /// Wires the counter use cases against a custom storage key.
    pub fn with_key(storage: Arc<dyn StoragePort>, key: &str) -> Self {
        Self {
            increment_counter: IncrementCounter::new(Arc::clone(&storage), key),
            get_counter: GetCounter::new(storage, key),
        }
    }
}

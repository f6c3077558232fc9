//! Numeric key/value storage port

use async_trait::async_trait;

use crate::errors::PortError;

/// Minimal numeric key/value store backing the counter use cases.
#[async_trait]
pub trait StoragePort: Send + Sync {
    /// Reads the value stored under `key`, `None` if never set.
    async fn get(&self, key: &str) -> Result<Option<i64>, PortError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: i64) -> Result<(), PortError>;
}

//! Durable string-keyed storage.

use crate::error::Result;

/// Key-value store holding JSON blobs under string keys.
///
/// Every write is last-write-wins for its key; there are no transactions.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

//! Key-value store implementations.

pub mod atomic_json;
pub mod json_file_store;
pub mod memory_store;

pub use atomic_json::AtomicJsonFile;
pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;

use std::sync::Arc;

use genr_core::storage::KeyValueStore;
use genr_core::{GenrError, Result};

/// Runs `f` against `store` on the blocking pool. File-backed stores do
/// synchronous I/O and may wait on a file lock.
pub(crate) async fn run_blocking<T, F>(store: &Arc<dyn KeyValueStore>, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&dyn KeyValueStore) -> Result<T> + Send + 'static,
{
    let store = store.clone();
    tokio::task::spawn_blocking(move || f(store.as_ref()))
        .await
        .map_err(|e| GenrError::internal(format!("Failed to join task: {e}")))?
}

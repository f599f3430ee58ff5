//! Per-user snapshot repository over a key-value store.

use std::sync::Arc;

use async_trait::async_trait;
use genr_core::error::Result;
use genr_core::state::model::ApplicationState;
use genr_core::state::repository::StateRepository;
use genr_core::storage::KeyValueStore;
use tracing::debug;

use crate::storage::run_blocking;

const STATE_KEY_PREFIX: &str = "sunoPromptGenR_user_";
const STATE_KEY_VERSION: &str = "_v4";

/// Storage key of the snapshot of `username`.
pub fn state_key(username: &str) -> String {
    format!("{STATE_KEY_PREFIX}{username}{STATE_KEY_VERSION}")
}

/// Stores each user's [`ApplicationState`] as one JSON document.
///
/// Store calls run on the blocking pool since file-backed stores do
/// synchronous I/O.
#[derive(Clone)]
pub struct KvStateRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvStateRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl StateRepository for KvStateRepository {
    async fn load(&self, username: &str) -> Result<Option<ApplicationState>> {
        let key = state_key(username);
        let Some(raw) = run_blocking(&self.store, move |store| store.get(&key)).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    async fn save(&self, username: &str, state: &ApplicationState) -> Result<()> {
        let key = state_key(username);
        let json = serde_json::to_string(state)?;
        debug!(%key, bytes = json.len(), "Saving application state");
        run_blocking(&self.store, move |store| store.set(&key, &json)).await
    }

    async fn discard(&self, username: &str) -> Result<()> {
        let key = state_key(username);
        run_blocking(&self.store, move |store| store.remove(&key)).await
    }
}

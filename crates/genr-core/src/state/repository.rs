//! Per-user state repository trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::state::model::ApplicationState;

/// Durable storage of one [`ApplicationState`] snapshot per username.
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// Loads the snapshot of `username`.
    ///
    /// Returns `Ok(None)` when nothing was saved yet, and a serialization
    /// error when the stored snapshot cannot be decoded.
    async fn load(&self, username: &str) -> Result<Option<ApplicationState>>;

    /// Replaces the snapshot of `username`.
    async fn save(&self, username: &str, state: &ApplicationState) -> Result<()>;

    /// Removes the snapshot of `username`.
    async fn discard(&self, username: &str) -> Result<()>;
}

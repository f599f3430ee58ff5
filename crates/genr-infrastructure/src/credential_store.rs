//! Account registry over a key-value store.
//!
//! The registry is one JSON object mapping usernames to `salt$digest`, where
//! the digest is BLAKE3 over the salt followed by the password.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use genr_core::error::Result;
use genr_core::storage::KeyValueStore;
use genr_core::user::{AuthError, CredentialStore, SEED_PASSWORD, SEED_USERNAME};
use rand::RngCore;
use tracing::{info, warn};

use crate::storage::run_blocking;

pub const USER_REGISTRY_KEY: &str = "sunoPromptGenRUserRegistry";
pub const LOGGED_IN_USER_KEY: &str = "sunoPromptGenRLoggedInUser";

const SALT_BYTES: usize = 16;

type Registry = BTreeMap<String, String>;

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn digest(salt: &str, password: &str) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hasher.finalize()
}

/// Produces a fresh `salt$digest` credential for `password`.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_BYTES];
    rand::thread_rng().fill_bytes(&mut salt);
    let salt = to_hex(&salt);
    format!("{salt}${}", digest(&salt, password).to_hex())
}

/// Checks `password` against a stored credential. Malformed entries never
/// match.
pub fn verify_password(stored: &str, password: &str) -> bool {
    let Some((salt, expected)) = stored.split_once('$') else {
        return false;
    };
    match blake3::Hash::from_hex(expected) {
        // `Hash` equality is constant-time.
        Ok(expected) => digest(salt, password) == expected,
        Err(_) => false,
    }
}

/// Reads the registry. A registry that cannot be decoded is discarded and
/// treated as empty.
fn read_registry(store: &dyn KeyValueStore) -> Result<Registry> {
    let Some(raw) = store.get(USER_REGISTRY_KEY)? else {
        return Ok(Registry::new());
    };
    match serde_json::from_str(&raw) {
        Ok(registry) => Ok(registry),
        Err(e) => {
            warn!(error = %e, "Discarding unreadable user registry");
            store.remove(USER_REGISTRY_KEY)?;
            Ok(Registry::new())
        }
    }
}

fn write_registry(store: &dyn KeyValueStore, registry: &Registry) -> Result<()> {
    store.set(USER_REGISTRY_KEY, &serde_json::to_string(registry)?)
}

/// Credential store over a [`KeyValueStore`]. Every store access runs on the
/// blocking pool, like [`crate::KvStateRepository`].
pub struct KvCredentialStore {
    store: Arc<dyn KeyValueStore>,
}

impl KvCredentialStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CredentialStore for KvCredentialStore {
    async fn ensure_seeded(&self) -> Result<bool> {
        let seeded = run_blocking(&self.store, |store| {
            let mut registry = read_registry(store)?;
            if !registry.is_empty() {
                return Ok(false);
            }
            registry.insert(SEED_USERNAME.to_string(), hash_password(SEED_PASSWORD));
            write_registry(store, &registry)?;
            Ok(true)
        })
        .await?;
        if seeded {
            info!(username = SEED_USERNAME, "Seeded default account");
        }
        Ok(seeded)
    }

    async fn verify(&self, username: &str, password: &str) -> Result<bool> {
        let registry = run_blocking(&self.store, |store| read_registry(store)).await?;
        Ok(registry
            .get(username)
            .is_some_and(|stored| verify_password(stored, password)))
    }

    async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> std::result::Result<(), AuthError> {
        let name = username.to_string();
        let credential = hash_password(password);
        let added = run_blocking(&self.store, move |store| {
            let mut registry = read_registry(store)?;
            if registry.contains_key(&name) {
                return Ok(false);
            }
            registry.insert(name, credential);
            write_registry(store, &registry)?;
            Ok(true)
        })
        .await?;
        if !added {
            return Err(AuthError::UsernameTaken(username.to_string()));
        }
        info!(username, "Registered account");
        Ok(())
    }

    async fn remembered_user(&self) -> Result<Option<String>> {
        let remembered = run_blocking(&self.store, |store| store.get(LOGGED_IN_USER_KEY)).await?;
        Ok(remembered.filter(|name| !name.is_empty()))
    }

    async fn remember_user(&self, username: &str) -> Result<()> {
        let username = username.to_string();
        run_blocking(&self.store, move |store| store.set(LOGGED_IN_USER_KEY, &username)).await
    }

    async fn forget_user(&self) -> Result<()> {
        run_blocking(&self.store, |store| store.remove(LOGGED_IN_USER_KEY)).await
    }
}

pub mod config_service;
pub mod credential_store;
pub mod paths;
pub mod state_repository;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::credential_store::KvCredentialStore;
pub use crate::paths::GenrPaths;
pub use crate::state_repository::KvStateRepository;
pub use crate::storage::{JsonFileStore, MemoryStore};

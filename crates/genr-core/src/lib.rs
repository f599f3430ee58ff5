pub mod collection;
pub mod components;
pub mod config;
pub mod error;
pub mod gateway;
pub mod notification;
pub mod preferences;
pub mod prompt;
pub mod state;
pub mod storage;
pub mod user;
pub mod workflow;

// Re-export common error type
pub use error::{GenrError, Result};

//! Unified path management for GenR files.
//!
//! ```text
//! ~/.config/genr/
//! ├── config.toml        # Application configuration
//! ├── store.json         # Key-value store (accounts, per-user snapshots)
//! └── logs/
//!     └── genr.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

use genr_core::GenrError;

const APP_DIR: &str = "genr";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for GenrError {
    fn from(err: PathError) -> Self {
        GenrError::config(err.to_string())
    }
}

pub struct GenrPaths;

impl GenrPaths {
    /// Returns the GenR configuration directory (e.g. `~/.config/genr/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the default key-value store file.
    pub fn store_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("store.json"))
    }

    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_in_config_dir() {
        let Ok(dir) = GenrPaths::config_dir() else {
            return;
        };
        assert!(dir.ends_with("genr"));
        assert_eq!(GenrPaths::config_file().unwrap(), dir.join("config.toml"));
        assert_eq!(GenrPaths::store_file().unwrap(), dir.join("store.json"));
        assert_eq!(GenrPaths::logs_dir().unwrap(), dir.join("logs"));
    }
}

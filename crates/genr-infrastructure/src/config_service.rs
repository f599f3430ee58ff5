//! Configuration service.
//!
//! Loads [`AppConfig`] from `config.toml` and caches it. A missing file means
//! defaults. The `GEMINI_API_KEY` environment variable overrides the key from
//! the file.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use genr_core::config::AppConfig;
use genr_core::{GenrError, Result};
use tracing::{debug, info};

use crate::paths::GenrPaths;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Uses `path`, or `~/.config/genr/config.toml` when `None`.
    pub fn new(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => GenrPaths::config_file()?,
        };
        Ok(Self {
            path,
            config: Arc::new(RwLock::new(None)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the configuration, reading the file on first access.
    pub fn get_config(&self) -> Result<AppConfig> {
        {
            let cached = self
                .config
                .read()
                .map_err(|_| GenrError::internal("config cache lock poisoned"))?;
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let mut loaded = Self::read_file(&self.path)?;
        Self::apply_env(&mut loaded, std::env::var(API_KEY_ENV).ok());

        let mut cached = self
            .config
            .write()
            .map_err(|_| GenrError::internal("config cache lock poisoned"))?;
        *cached = Some(loaded.clone());
        Ok(loaded)
    }

    /// Forces a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut cached) = self.config.write() {
            *cached = None;
        }
    }

    /// Key-value store file: configured path or the default location.
    pub fn store_path(&self) -> Result<PathBuf> {
        match self.get_config()?.storage.path {
            Some(path) => Ok(path),
            None => Ok(GenrPaths::store_file()?),
        }
    }

    fn read_file(path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(AppConfig::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)
            .map_err(|e| GenrError::config(format!("{}: {e}", path.display())))?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    fn apply_env(config: &mut AppConfig, api_key: Option<String>) {
        if let Some(key) = api_key.filter(|key| !key.trim().is_empty()) {
            config.gemini.api_key = Some(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(ConfigService::read_file(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_reads_file_and_caches() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[gemini]\nmodel = \"gemini-2.0-flash\"\n\n[storage]\npath = \"/tmp/s.json\"\n",
        )
        .unwrap();

        let service = ConfigService::new(Some(&path)).unwrap();
        let config = service.get_config().unwrap();
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        assert_eq!(service.store_path().unwrap(), PathBuf::from("/tmp/s.json"));

        std::fs::write(&path, "[gemini]\nmodel = \"other\"\n").unwrap();
        assert_eq!(service.get_config().unwrap().gemini.model, "gemini-2.0-flash");
        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().gemini.model, "other");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[gemini\n").unwrap();
        let err = ConfigService::read_file(&path).unwrap_err();
        assert!(matches!(err, GenrError::Config(_)));
    }

    #[test]
    fn test_env_key_overrides_file() {
        let mut config = AppConfig::default();
        config.gemini.api_key = Some("from-file".into());

        ConfigService::apply_env(&mut config, Some(String::new()));
        assert_eq!(config.gemini.api_key(), Some("from-file"));

        ConfigService::apply_env(&mut config, Some("from-env".into()));
        assert_eq!(config.gemini.api_key(), Some("from-env"));
    }
}

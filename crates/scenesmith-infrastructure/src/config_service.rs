//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the client configuration
//! from the configuration file (~/.config/scenesmith/config.toml).

use crate::config::ClientConfig;
use crate::paths::ScenesmithPaths;
use scenesmith_core::{Result, ScenesmithError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Environment variable overriding `api_base_url`.
pub const API_URL_ENV: &str = "SCENESMITH_API_URL";

/// Configuration service that loads and caches the client configuration.
///
/// A missing file is created with default values on first load.
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: ScenesmithPaths,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    pub fn new(paths: ScenesmithPaths) -> Self {
        Self {
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the client configuration, loading from file if not cached.
    ///
    /// `SCENESMITH_API_URL` overrides the file's base URL.
    pub fn get_config(&self) -> Result<ClientConfig> {
        {
            let cached = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let mut loaded = self.load_config()?;
        if let Ok(url) = std::env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            tracing::debug!("[ConfigService] {} overrides api_base_url", API_URL_ENV);
            loaded.api_base_url = url;
        }

        let mut cache = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *cache = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut cache = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *cache = None;
    }

    /// Path of the backing config file.
    pub fn config_path(&self) -> Result<PathBuf> {
        self.paths
            .config_file()
            .map_err(|e| ScenesmithError::config(e.to_string()))
    }

    fn load_config(&self) -> Result<ClientConfig> {
        let path = self.config_path()?;

        if !path.exists() {
            let defaults = ClientConfig::default();
            tracing::info!("[ConfigService] Creating default config at {:?}", path);
            write_atomically(&path, &toml::to_string_pretty(&defaults)?)?;
            return Ok(defaults);
        }

        let content = fs::read_to_string(&path)?;
        toml::from_str(&content).map_err(|e| {
            ScenesmithError::config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}

/// Writes through a temporary sibling file and renames it into place.
fn write_atomically(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service(dir: &TempDir) -> ConfigService {
        ConfigService::new(ScenesmithPaths::new(Some(dir.path().to_path_buf())))
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);

        let config = service.get_config().unwrap();
        assert_eq!(config.request_timeout_secs, ClientConfig::default().request_timeout_secs);
        assert!(dir.path().join("config.toml").exists());
    }

    #[test]
    fn test_reads_existing_file_and_caches() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "request_timeout_secs = 5\n[retry]\nmax_retries = 4\n",
        )
        .unwrap();
        let service = service(&dir);

        let config = service.get_config().unwrap();
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.retry.max_retries, 4);

        fs::write(dir.path().join("config.toml"), "request_timeout_secs = 9\n").unwrap();
        assert_eq!(service.get_config().unwrap().request_timeout_secs, 5);

        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().request_timeout_secs, 9);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "request_timeout_secs = \"soon\"\n").unwrap();

        let err = service(&dir).get_config().unwrap_err();
        assert!(matches!(err, ScenesmithError::Config(_)));
    }
}

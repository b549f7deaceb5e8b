//! Path management for scenesmith configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/scenesmith/        # Config directory
//! ├── config.toml              # Client configuration
//! └── logs/                    # Application logs
//!     └── scenesmith.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

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

/// Resolves scenesmith paths, optionally under a custom base directory.
#[derive(Debug, Clone, Default)]
pub struct ScenesmithPaths {
    base: Option<PathBuf>,
}

impl ScenesmithPaths {
    const APP_DIR: &'static str = "scenesmith";

    /// Creates a resolver. With `Some(base)` every path lives under `base`
    /// instead of the platform config directory.
    pub fn new(base: Option<PathBuf>) -> Self {
        Self { base }
    }

    /// Returns the scenesmith configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/scenesmith/`)
    /// - `Err(PathError::ConfigDirNotFound)`: Could not determine directory
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(Self::APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    /// Returns the path to `config.toml`.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the log directory.
    pub fn log_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}

//! Unified path management for RATH configuration and storage files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/rath/              # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/rath/         # Data directory
//! ├── local_storage.toml       # Durable key-value preferences
//! └── data_config/             # Namespaced configuration records
//!     └── dataSource.json
//! ```
//!
//! With a base override both directories collapse into the base directory.

use std::path::PathBuf;

const APP_DIR: &str = "rath";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for rath_core::RathError {
    fn from(err: PathError) -> Self {
        rath_core::RathError::config(err.to_string())
    }
}

/// Kinds of files managed by RATH.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    Config,
    LocalStorage,
    DataConfig,
}

/// Path resolver, optionally rooted at a custom base directory.
#[derive(Debug, Clone, Default)]
pub struct RathPaths {
    base: Option<PathBuf>,
    data_override: Option<PathBuf>,
}

impl RathPaths {
    /// Creates a resolver. `Some(base)` puts every file under `base`.
    pub fn new(base: Option<PathBuf>) -> Self {
        Self {
            base,
            data_override: None,
        }
    }

    /// Redirects the data directory (local storage and data config).
    pub fn with_storage_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.data_override = dir;
        self
    }

    /// Returns the configuration directory (e.g. `~/.config/rath/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the data directory (e.g. `~/.local/share/rath/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(dir) = &self.data_override {
            return Ok(dir.clone());
        }
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the file or directory backing a service.
    pub fn get_path(&self, service: ServiceType) -> Result<PathBuf, PathError> {
        Ok(match service {
            ServiceType::Config => self.config_dir()?.join("config.toml"),
            ServiceType::LocalStorage => self.data_dir()?.join("local_storage.toml"),
            ServiceType::DataConfig => self.data_dir()?.join("data_config"),
        })
    }
}

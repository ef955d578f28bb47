//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the root configuration
//! from the configuration file (~/.config/rath/config.toml).

use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use rath_core::config::RathConfig;
use rath_core::error::Result;

use crate::paths::{RathPaths, ServiceType};
use crate::storage::atomic_file::read_optional;

/// Configuration service that loads and caches the root configuration.
#[derive(Debug)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: RwLock<Option<RathConfig>>,
}

impl ConfigService {
    pub fn new(paths: &RathPaths) -> Result<Self> {
        Ok(Self::from_path(paths.get_path(ServiceType::Config)?))
    }

    pub fn from_path(path: PathBuf) -> Self {
        Self {
            path,
            config: RwLock::new(None),
        }
    }

    /// Gets the root configuration, loading from file if not cached.
    ///
    /// A missing file yields the default configuration; a malformed one is
    /// an error.
    pub fn get_config(&self) -> Result<RathConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = match read_optional(&self.path)? {
            Some(content) => toml::from_str(&content)?,
            None => {
                tracing::debug!("[ConfigService] No config at {:?}, using defaults", self.path);
                RathConfig::default()
            }
        };

        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = Some(loaded.clone());
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rath_core::config::ClickHouseConfig;
    use rath_core::engine::ComputationEngine;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(&RathPaths::new(Some(temp_dir.path().to_path_buf())))
            .unwrap();
        assert_eq!(service.get_config().unwrap(), RathConfig::default());
    }

    #[test]
    fn test_loads_file_and_serves_cached_copy() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "default_engine = \"clickhouse\"\n\n[clickhouse]\nendpoint = \"http://localhost:2333\"\n",
        )
        .unwrap();

        let service = ConfigService::from_path(path.clone());
        let config = service.get_config().unwrap();
        assert_eq!(config.default_engine, ComputationEngine::ClickHouse);
        assert_eq!(
            config.clickhouse,
            Some(ClickHouseConfig {
                endpoint: "http://localhost:2333".to_string(),
            })
        );

        std::fs::write(&path, "log_level = \"debug\"\n").unwrap();
        assert_eq!(service.get_config().unwrap(), config);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "default_engine = \"spark\"\n").unwrap();
        let service = ConfigService::from_path(path);
        assert!(service.get_config().unwrap_err().is_serialization());
    }
}

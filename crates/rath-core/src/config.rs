//! Application configuration model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::dataset::Dataset;
use crate::engine::ComputationEngine;

/// Connection settings for the ClickHouse connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickHouseConfig {
    /// Base URL of the connector service, e.g. `http://localhost:2333`.
    pub endpoint: String,
}

/// Root of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RathConfig {
    /// Tracing filter directive, e.g. `info` or `rath_core=debug`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Engine started when no persisted engine exists.
    #[serde(default)]
    pub default_engine: ComputationEngine,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clickhouse: Option<ClickHouseConfig>,

    /// Overrides the directory holding local storage and data config.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,

    /// Datasets offered by the data source picker.
    #[serde(default, rename = "dataset", skip_serializing_if = "Vec::is_empty")]
    pub datasets: Vec<Dataset>,
}

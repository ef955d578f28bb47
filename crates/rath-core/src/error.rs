//! Error types for the RATH client core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for every RATH crate.
///
/// Variants are structured so that the session store can decide which
/// failures become user-visible notices and which stay in the log.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum RathError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Key-value or config storage rejected a read or write
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A computation engine failed to tear down, start or answer a task
    #[error("Engine '{engine}' failed: {message}")]
    Engine { engine: String, message: String },

    /// No engine worker is currently running
    #[error("No computation engine worker is running")]
    EngineUnavailable,

    /// Persisted configuration could not be read
    #[error("Failed to load persisted configuration: {0}")]
    LoadFailed(String),

    /// Persisted configuration was read but could not be understood
    #[error("Persisted configuration '{namespace}' is corrupt: {message}")]
    ConfigCorrupt { namespace: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RathError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Engine error for the named engine
    pub fn engine(engine: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Engine {
            engine: engine.into(),
            message: message.into(),
        }
    }

    /// Creates a LoadFailed error
    pub fn load_failed(message: impl Into<String>) -> Self {
        Self::LoadFailed(message.into())
    }

    /// Creates a ConfigCorrupt error for a persistence namespace
    pub fn config_corrupt(namespace: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigCorrupt {
            namespace: namespace.into(),
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an engine lifecycle error
    pub fn is_engine(&self) -> bool {
        matches!(self, Self::Engine { .. } | Self::EngineUnavailable)
    }

    /// Check if this is a persistence read failure
    pub fn is_load_failed(&self) -> bool {
        matches!(self, Self::LoadFailed(_))
    }

    /// Check if this is a corrupt persisted payload
    pub fn is_config_corrupt(&self) -> bool {
        matches!(self, Self::ConfigCorrupt { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for RathError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for RathError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RathError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for RathError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for RathError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Conversion from String (for error messages)
impl From<String> for RathError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, RathError>`.
pub type Result<T> = std::result::Result<T, RathError>;

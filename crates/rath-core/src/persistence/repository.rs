//! Storage traits.

use async_trait::async_trait;

use crate::error::Result;

/// Durable, synchronous string key-value storage.
///
/// Holds small scalar preferences that must be available before any async
/// work has happened (the task mode is read during store construction).
pub trait KeyValueStorage: Send + Sync {
    /// Returns the stored value, or `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Asynchronous namespaced configuration store.
///
/// Records are written as JSON and handed back as the raw stored text, so
/// that the caller decides how to treat content it cannot parse.
#[async_trait]
pub trait DataConfigRepository: Send + Sync {
    /// Replaces the record stored under `namespace`.
    async fn update_data_config(&self, namespace: &str, record: &serde_json::Value) -> Result<()>;

    /// Returns the raw JSON text stored under `namespace`, if any.
    async fn get_data_config(&self, namespace: &str) -> Result<Option<String>>;
}

//! File-backed configuration store.
//!
//! Each namespace is a JSON file in the data config directory
//! (`data_config/dataSource.json`). Content is returned verbatim so the
//! caller can classify text it cannot parse.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rath_core::error::{RathError, Result};
use rath_core::persistence::DataConfigRepository;

use super::atomic_file::{FileLock, write_atomic};

pub struct FileDataConfigRepository {
    dir: PathBuf,
}

impl FileDataConfigRepository {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn namespace_path(&self, namespace: &str) -> Result<PathBuf> {
        let valid = !namespace.is_empty()
            && namespace
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(RathError::storage(format!(
                "Invalid config namespace '{}'",
                namespace
            )));
        }
        Ok(self.dir.join(format!("{}.json", namespace)))
    }
}

fn write_record(path: &Path, content: &str) -> Result<()> {
    let _lock = FileLock::acquire(path)?;
    write_atomic(path, content)?;
    Ok(())
}

#[async_trait]
impl DataConfigRepository for FileDataConfigRepository {
    async fn update_data_config(&self, namespace: &str, record: &serde_json::Value) -> Result<()> {
        let path = self.namespace_path(namespace)?;
        let content = serde_json::to_string_pretty(record)?;

        // Save to file storage in blocking context
        tokio::task::spawn_blocking(move || write_record(&path, &content))
            .await
            .map_err(|e| RathError::internal(format!("Failed to join task: {}", e)))??;

        tracing::debug!("[DataConfig] Updated namespace '{}'", namespace);
        Ok(())
    }

    async fn get_data_config(&self, namespace: &str) -> Result<Option<String>> {
        let path = self.namespace_path(namespace)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

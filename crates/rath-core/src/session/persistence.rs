//! Saving and restoring the `dataSource` configuration record.

use super::model::Severity;
use super::store::CommonStore;
use crate::error::{RathError, Result};
use crate::persistence::{DATA_SOURCE_NAMESPACE, DataSourceConfig};

impl CommonStore {
    /// Builds the record persisted under `dataSource` from the current state.
    pub fn data_source_config(&self) -> DataSourceConfig {
        let state = self.snapshot();
        DataSourceConfig {
            cube_storage_manage_mode: Some(self.pipeline.cube_storage_manage_mode()),
            explore_mode: Some(state.explore_mode),
            computation_engine: Some(state.computation_engine),
            task_mode: Some(state.task_mode),
        }
    }

    /// Writes the data source record to the configuration store.
    ///
    /// A failed write is pushed as an error notice and returned. The caller
    /// may await the result or detach the future.
    pub async fn save_configuration(&self) -> Result<()> {
        let record = serde_json::to_value(self.data_source_config())?;

        if let Err(e) = self
            .data_config
            .update_data_config(DATA_SOURCE_NAMESPACE, &record)
            .await
        {
            tracing::warn!("[CommonStore] Failed to save configuration: {}", e);
            self.show_error(Severity::Error, format!("Failed to save configuration: {}", e));
            return Err(e);
        }

        tracing::debug!("[CommonStore] Saved configuration: {}", record);
        Ok(())
    }

    /// Restores the data source record from the configuration store.
    ///
    /// Returns `Ok(false)` when nothing was persisted. A read failure yields
    /// [`RathError::LoadFailed`] and malformed content yields
    /// [`RathError::ConfigCorrupt`]; both leave the state untouched and are
    /// pushed as error notices. A persisted engine is started through the
    /// regular engine switch, so a failing worker keeps the current engine.
    /// A restored task mode that cannot be written to local storage is
    /// applied anyway and reported as an error notice.
    pub async fn load_configuration(&self) -> Result<bool> {
        let raw = match self.data_config.get_data_config(DATA_SOURCE_NAMESPACE).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("[CommonStore] No persisted configuration found");
                return Ok(false);
            }
            Err(e) => {
                return Err(self.report_load_error(RathError::load_failed(e.to_string())));
            }
        };

        let record: DataSourceConfig = serde_json::from_str(&raw).map_err(|e| {
            self.report_load_error(RathError::config_corrupt(DATA_SOURCE_NAMESPACE, e.to_string()))
        })?;

        self.apply_data_source_config(record).await;
        Ok(true)
    }

    fn report_load_error(&self, err: RathError) -> RathError {
        tracing::warn!("[CommonStore] {}", err);
        self.show_error(Severity::Error, err.to_string());
        err
    }

    async fn apply_data_source_config(&self, record: DataSourceConfig) {
        if let Some(mode) = record.cube_storage_manage_mode {
            self.pipeline.set_cube_storage_manage_mode(mode);
        }

        if record.explore_mode.is_some() || record.task_mode.is_some() {
            self.update(|state| {
                if let Some(mode) = record.explore_mode {
                    state.explore_mode = mode;
                }
                if let Some(mode) = record.task_mode {
                    state.task_mode = mode;
                }
            });
        }

        // Local storage stays the source of the task mode at construction.
        if let Some(mode) = record.task_mode
            && let Err(e) = self.persist_task_mode(mode)
        {
            self.show_error(
                Severity::Error,
                format!("Failed to persist restored task mode '{}': {}", mode, e),
            );
        }

        if let Some(engine) = record.computation_engine
            && (engine != self.snapshot().computation_engine || !self.is_engine_live())
        {
            self.set_computation_engine(engine).await;
        }
    }
}

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use rath_core::config::RathConfig;
use rath_core::session::{CommonStore, CommonStorePorts};
use rath_core::viz::VegaSubsetTransform;
use rath_infrastructure::{
    ConfigService, FileDataConfigRepository, FileKeyValueStorage, InMemoryPipelineStore,
    RathPaths, ServiceType, WorkerEngine,
};

use crate::dataset_catalog::DatasetCatalog;

/// Everything a running client holds on to.
pub struct AppSession {
    pub store: Arc<CommonStore>,
    pub datasets: Arc<DatasetCatalog>,
    pub pipeline: Arc<InMemoryPipelineStore>,
    pub config: RathConfig,
    pub paths: RathPaths,
    /// Outcome of restoring the `dataSource` record during start.
    pub restored: rath_core::Result<bool>,
}

/// Builds an [`AppSession`] from file-backed adapters.
pub struct SessionBootstrap {
    home: Option<PathBuf>,
}

impl SessionBootstrap {
    /// `home` overrides the platform config/data directories.
    pub fn new(home: Option<PathBuf>) -> Self {
        Self { home }
    }

    /// Loads the config file only.
    ///
    /// Split out so the caller can set up logging from `log_level` before
    /// the session starts.
    pub fn load_config(&self) -> Result<RathConfig> {
        let paths = RathPaths::new(self.home.clone());
        let config_service = ConfigService::new(&paths).context("Failed to resolve config path")?;
        config_service
            .get_config()
            .context("Failed to load config.toml")
    }

    /// Creates the session store and brings up a computation engine.
    ///
    /// This method:
    /// 1. Wires the store to local storage, the data config store and a worker engine
    /// 2. Restores the persisted `dataSource` record, if any
    /// 3. Starts the configured default engine when no persisted engine came up
    ///
    /// Restore and engine failures are logged and surfaced as notices on the
    /// store; they do not fail the bootstrap.
    pub async fn start(&self, config: RathConfig) -> Result<AppSession> {
        let paths =
            RathPaths::new(self.home.clone()).with_storage_dir(config.storage_dir.clone());

        let local_storage = Arc::new(FileKeyValueStorage::new(
            paths
                .get_path(ServiceType::LocalStorage)
                .context("Failed to resolve local storage path")?,
        ));
        let data_config = Arc::new(FileDataConfigRepository::new(
            paths
                .get_path(ServiceType::DataConfig)
                .context("Failed to resolve data config path")?,
        ));
        let pipeline = Arc::new(InMemoryPipelineStore::default());

        let store = Arc::new(CommonStore::new(CommonStorePorts {
            engine: Box::new(WorkerEngine::new(config.clickhouse.clone())),
            local_storage,
            data_config,
            pipeline: pipeline.clone(),
            viz_transform: Arc::new(VegaSubsetTransform),
        }));

        let restored = store.load_configuration().await;
        match &restored {
            Ok(true) => tracing::info!("[Bootstrap] Restored persisted configuration"),
            Ok(false) => tracing::info!("[Bootstrap] No persisted configuration, using defaults"),
            Err(e) => tracing::warn!("[Bootstrap] Continuing with defaults: {}", e),
        }

        // Either nothing was persisted or the persisted engine failed to start.
        if !store.is_engine_live() {
            store.set_computation_engine(config.default_engine).await;
        }

        let datasets = Arc::new(DatasetCatalog::new(config.datasets.clone()));

        Ok(AppSession {
            store,
            datasets,
            pipeline,
            config,
            paths,
            restored,
        })
    }
}

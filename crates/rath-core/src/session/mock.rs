//! In-memory port implementations shared by the session store tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::store::CommonStorePorts;
use crate::engine::{ComputationEngine, EngineLifecycle, EngineTask};
use crate::error::{RathError, Result};
use crate::persistence::{DataConfigRepository, KeyValueStorage};
use crate::pipeline::{CubeStorageManageMode, PipelineStore};
use crate::viz::VegaSubsetTransform;

// Mock engine recording every lifecycle call
#[derive(Default)]
pub(crate) struct MockEngine {
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_destroy: bool,
    pub fail_init: Option<ComputationEngine>,
    pub fail_task: bool,
}

impl MockEngine {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl EngineLifecycle for MockEngine {
    async fn destroy(&self) -> Result<()> {
        tokio::task::yield_now().await;
        self.record("destroy".to_string());
        if self.fail_destroy {
            return Err(RathError::engine("mock", "worker refused to terminate"));
        }
        Ok(())
    }

    async fn init(&self, engine: ComputationEngine) -> Result<()> {
        tokio::task::yield_now().await;
        self.record(format!("init:{}", engine));
        if self.fail_init == Some(engine) {
            return Err(RathError::engine(engine.to_string(), "worker failed to start"));
        }
        Ok(())
    }

    async fn send_task(&self, task: EngineTask) -> Result<serde_json::Value> {
        tokio::task::yield_now().await;
        match task.props.as_str() {
            Some(props) => self.record(format!("task:{}:{}", task.task, props)),
            None => self.record(format!("task:{}", task.task)),
        }
        if self.fail_task {
            return Err(RathError::engine("mock", "task rejected"));
        }
        Ok(serde_json::json!({ "ok": true, "props": task.props }))
    }
}

// Mock local storage
#[derive(Default)]
pub(crate) struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(RathError::storage("quota exceeded"));
        }
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// Mock data config store
#[derive(Default)]
pub(crate) struct MemoryDataConfig {
    pub records: Mutex<HashMap<String, String>>,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl MemoryDataConfig {
    pub fn put_raw(&self, namespace: &str, raw: &str) {
        self.records
            .lock()
            .unwrap()
            .insert(namespace.to_string(), raw.to_string());
    }

    pub fn raw(&self, namespace: &str) -> Option<String> {
        self.records.lock().unwrap().get(namespace).cloned()
    }
}

#[async_trait]
impl DataConfigRepository for MemoryDataConfig {
    async fn update_data_config(&self, namespace: &str, record: &serde_json::Value) -> Result<()> {
        if self.fail_writes {
            return Err(RathError::storage("database closed"));
        }
        self.put_raw(namespace, &serde_json::to_string(record)?);
        Ok(())
    }

    async fn get_data_config(&self, namespace: &str) -> Result<Option<String>> {
        if self.fail_reads {
            return Err(RathError::storage("database closed"));
        }
        Ok(self.raw(namespace))
    }
}

// Mock pipeline store
#[derive(Default)]
pub(crate) struct MemoryPipeline {
    mode: Mutex<CubeStorageManageMode>,
}

impl PipelineStore for MemoryPipeline {
    fn cube_storage_manage_mode(&self) -> CubeStorageManageMode {
        *self.mode.lock().unwrap()
    }

    fn set_cube_storage_manage_mode(&self, mode: CubeStorageManageMode) {
        *self.mode.lock().unwrap() = mode;
    }
}

pub(crate) fn ports_with(engine: MockEngine, storage: Arc<MemoryStorage>) -> CommonStorePorts {
    ports_full(
        engine,
        storage,
        Arc::new(MemoryDataConfig::default()),
        Arc::new(MemoryPipeline::default()),
    )
}

pub(crate) fn ports_full(
    engine: MockEngine,
    storage: Arc<MemoryStorage>,
    data_config: Arc<MemoryDataConfig>,
    pipeline: Arc<MemoryPipeline>,
) -> CommonStorePorts {
    CommonStorePorts {
        engine: Box::new(engine),
        local_storage: storage,
        data_config,
        pipeline,
        viz_transform: Arc::new(VegaSubsetTransform),
    }
}

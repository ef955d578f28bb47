//! Engine lifecycle adapter backed by in-process workers.

use async_trait::async_trait;
use rath_core::config::ClickHouseConfig;
use rath_core::engine::{ComputationEngine, EngineLifecycle, EngineTask};
use rath_core::error::{RathError, Result};
use tokio::sync::{Mutex, oneshot};

use super::worker::{WorkerHandle, WorkerRequest};

/// Owns at most one running worker.
///
/// `clickhouse` must be configured before the ClickHouse engine can start.
pub struct WorkerEngine {
    worker: Mutex<Option<WorkerHandle>>,
    clickhouse: Option<ClickHouseConfig>,
}

impl WorkerEngine {
    pub fn new(clickhouse: Option<ClickHouseConfig>) -> Self {
        Self {
            worker: Mutex::new(None),
            clickhouse,
        }
    }
}

#[async_trait]
impl EngineLifecycle for WorkerEngine {
    async fn destroy(&self) -> Result<()> {
        let handle = self.worker.lock().await.take();
        if let Some(handle) = handle {
            let (id, engine) = (handle.id, handle.engine);
            handle.terminate().await;
            tracing::info!("[Engine] Destroyed {} worker {}", engine, id);
        }
        Ok(())
    }

    async fn init(&self, engine: ComputationEngine) -> Result<()> {
        let clickhouse = match engine {
            ComputationEngine::WebWorker => None,
            ComputationEngine::ClickHouse => Some(self.clickhouse.clone().ok_or_else(|| {
                RathError::engine(engine.to_string(), "no ClickHouse connector endpoint configured")
            })?),
        };

        let previous = {
            let mut worker = self.worker.lock().await;
            let handle = WorkerHandle::spawn(engine, clickhouse);
            tracing::info!("[Engine] Started {} worker {}", engine, handle.id);
            worker.replace(handle)
        };
        if let Some(previous) = previous {
            tracing::warn!(
                "[Engine] Replacing {} worker {} that was not destroyed",
                previous.engine,
                previous.id
            );
            previous.terminate().await;
        }
        Ok(())
    }

    async fn send_task(&self, task: EngineTask) -> Result<serde_json::Value> {
        let (engine, sender) = {
            let worker = self.worker.lock().await;
            let handle = worker.as_ref().ok_or(RathError::EngineUnavailable)?;
            (handle.engine, handle.sender())
        };

        let (reply, response) = oneshot::channel();
        sender
            .send(WorkerRequest { task, reply })
            .await
            .map_err(|_| RathError::engine(engine.to_string(), "worker is not accepting tasks"))?;

        response
            .await
            .map_err(|_| RathError::engine(engine.to_string(), "worker dropped the task"))?
    }
}

//! In-process computation worker.
//!
//! A worker is a spawned tokio task that owns its engine context and answers
//! requests arriving on an `mpsc` channel, one at a time and in order.

use rath_core::config::ClickHouseConfig;
use rath_core::engine::{ComputationEngine, EngineTask, INIT_TASK, STATUS_TASK};
use rath_core::error::{RathError, Result};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use uuid::Uuid;

const REQUEST_BUFFER: usize = 32;

/// A task together with the channel its reply goes back on.
pub(crate) struct WorkerRequest {
    pub task: EngineTask,
    pub reply: oneshot::Sender<Result<serde_json::Value>>,
}

/// Handle to a running worker task.
pub(crate) struct WorkerHandle {
    pub id: Uuid,
    pub engine: ComputationEngine,
    sender: mpsc::Sender<WorkerRequest>,
    join: JoinHandle<()>,
}

impl WorkerHandle {
    /// Spawns a worker for `engine`.
    pub fn spawn(engine: ComputationEngine, clickhouse: Option<ClickHouseConfig>) -> Self {
        let (sender, receiver) = mpsc::channel(REQUEST_BUFFER);
        let id = Uuid::new_v4();
        let context = WorkerContext {
            id,
            engine,
            clickhouse,
            initialized: false,
        };
        let join = tokio::spawn(context.run(receiver));

        Self {
            id,
            engine,
            sender,
            join,
        }
    }

    pub fn sender(&self) -> mpsc::Sender<WorkerRequest> {
        self.sender.clone()
    }

    /// Closes the request channel and waits for the worker to drain and exit.
    pub async fn terminate(self) {
        let Self {
            id, sender, join, ..
        } = self;
        drop(sender);
        if let Err(e) = join.await {
            tracing::warn!("[Engine] Worker {} exited abnormally: {}", id, e);
        }
    }
}

struct WorkerContext {
    id: Uuid,
    engine: ComputationEngine,
    clickhouse: Option<ClickHouseConfig>,
    initialized: bool,
}

impl WorkerContext {
    async fn run(mut self, mut receiver: mpsc::Receiver<WorkerRequest>) {
        tracing::debug!("[Engine] Worker {} ({}) started", self.id, self.engine);
        while let Some(request) = receiver.recv().await {
            let result = self.handle(&request.task);
            // The caller may have given up waiting; nothing to do then.
            let _ = request.reply.send(result);
        }
        tracing::debug!("[Engine] Worker {} ({}) stopped", self.id, self.engine);
    }

    fn handle(&mut self, task: &EngineTask) -> Result<serde_json::Value> {
        match task.task.as_str() {
            INIT_TASK => self.init(task),
            STATUS_TASK => Ok(serde_json::json!({
                "worker": self.id.to_string(),
                "engine": self.engine,
                "initialized": self.initialized,
            })),
            other if !self.initialized => Err(self.error(format!(
                "task '{}' received before init",
                other
            ))),
            other => Err(self.error(format!("unsupported task '{}'", other))),
        }
    }

    fn init(&mut self, task: &EngineTask) -> Result<serde_json::Value> {
        let requested = task.props.as_str().unwrap_or_default();
        if requested != self.engine.as_ref() {
            return Err(self.error(format!(
                "init requested engine '{}' but worker serves '{}'",
                requested, self.engine
            )));
        }

        let mut reply = serde_json::json!({ "engine": self.engine });
        if let Some(clickhouse) = &self.clickhouse
            && self.engine == ComputationEngine::ClickHouse
        {
            reply["endpoint"] = serde_json::Value::String(clickhouse.endpoint.clone());
        }

        self.initialized = true;
        Ok(reply)
    }

    fn error(&self, message: String) -> RathError {
        RathError::engine(self.engine.to_string(), message)
    }
}

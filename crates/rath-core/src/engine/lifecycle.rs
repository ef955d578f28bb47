//! Engine lifecycle adapter trait.

use async_trait::async_trait;

use super::model::{ComputationEngine, EngineTask};
use crate::error::Result;

/// Tears down, starts and talks to the single computation worker.
///
/// The session store is the only owner of an implementation, so
/// implementations may assume calls never overlap for one switch.
#[async_trait]
pub trait EngineLifecycle: Send + Sync {
    /// Stops the running worker. Must succeed when no worker is running.
    async fn destroy(&self) -> Result<()>;

    /// Starts a new worker for `engine`.
    async fn init(&self, engine: ComputationEngine) -> Result<()>;

    /// Sends a task to the running worker and waits for its reply.
    async fn send_task(&self, task: EngineTask) -> Result<serde_json::Value>;
}

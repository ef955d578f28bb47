use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Task name that boots a freshly started worker.
pub const INIT_TASK: &str = "init";

/// Task name that asks a running worker which engine it serves.
pub const STATUS_TASK: &str = "status";

/// Known computation backends.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ComputationEngine {
    /// In-process worker, always available.
    #[default]
    WebWorker,
    /// Remote ClickHouse connector.
    ClickHouse,
}

/// A request sent to the engine worker.
///
/// Serialized as `{ "task": "init", "props": "webworker" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineTask {
    pub task: String,
    #[serde(default)]
    pub props: serde_json::Value,
}

impl EngineTask {
    pub fn new(task: impl Into<String>, props: serde_json::Value) -> Self {
        Self {
            task: task.into(),
            props,
        }
    }

    /// The boot task carrying the engine identifier as its payload.
    pub fn init(engine: ComputationEngine) -> Self {
        Self::new(INIT_TASK, serde_json::Value::String(engine.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_engine_identifiers() {
        assert_eq!(ComputationEngine::WebWorker.to_string(), "webworker");
        assert_eq!(
            ComputationEngine::from_str("clickhouse").unwrap(),
            ComputationEngine::ClickHouse
        );
        assert!(ComputationEngine::from_str("spark").is_err());
    }

    #[test]
    fn test_init_task_wire_shape() {
        let task = EngineTask::init(ComputationEngine::WebWorker);
        assert_eq!(task.task, INIT_TASK);
        assert_eq!(
            serde_json::to_value(&task).unwrap(),
            serde_json::json!({"task": "init", "props": "webworker"})
        );
    }
}

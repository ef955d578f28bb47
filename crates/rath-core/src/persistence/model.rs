use serde::{Deserialize, Serialize};

use crate::engine::ComputationEngine;
use crate::pipeline::CubeStorageManageMode;
use crate::session::{ExploreMode, TaskTestMode};

/// Namespace of the persisted data-source record.
pub const DATA_SOURCE_NAMESPACE: &str = "dataSource";

/// Local storage key holding the task test mode.
pub const TASK_TEST_MODE_KEY: &str = "task_test_mode";

/// Flat record persisted under [`DATA_SOURCE_NAMESPACE`].
///
/// Every field is optional on read so that a record written by an older
/// client still applies whatever it does contain. Unknown enum values are a
/// parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cube_storage_manage_mode: Option<CubeStorageManageMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explore_mode: Option<ExploreMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computation_engine: Option<ComputationEngine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_mode: Option<TaskTestMode>,
}

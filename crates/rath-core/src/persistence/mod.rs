//! Persistence ports and the persisted data-source record.
//!
//! - `repository`: storage traits implemented by the infrastructure crate
//! - `model`: the `dataSource` record written by the session store

mod model;
mod repository;

pub use model::{DATA_SOURCE_NAMESPACE, DataSourceConfig, TASK_TEST_MODE_KEY};
pub use repository::{DataConfigRepository, KeyValueStorage};

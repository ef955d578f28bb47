//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: view keys, modes, notices and the `CommonState` snapshot
//! - `store`: the `CommonStore` state machine and its engine lifecycle
//! - `persistence`: saving and restoring the `dataSource` record
//!
//! # Usage
//!
//! ```ignore
//! use rath_core::session::{CommonStore, CommonStorePorts, Severity};
//!
//! let store = CommonStore::new(ports);
//! store.show_error(Severity::Info, "Dataset loaded");
//! store.set_computation_engine(ComputationEngine::WebWorker).await;
//! ```

mod model;
mod persistence;
mod store;

#[cfg(test)]
pub(crate) mod mock;

// Re-export public API
pub use model::{CommonState, ExploreMode, NavMode, Notice, PivotKey, Severity, TaskTestMode};
pub use store::{CommonStore, CommonStorePorts};

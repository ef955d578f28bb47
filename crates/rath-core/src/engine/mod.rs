//! Computation engine domain module.
//!
//! - `model`: engine identifiers and the task envelope sent to a worker
//! - `lifecycle`: the adapter trait the session store drives

mod lifecycle;
mod model;

pub use lifecycle::EngineLifecycle;
pub use model::{ComputationEngine, EngineTask, INIT_TASK, STATUS_TASK};

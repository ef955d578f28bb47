pub mod config_service;
pub mod engine;
pub mod paths;
pub mod pipeline_store;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::engine::WorkerEngine;
pub use crate::paths::{RathPaths, ServiceType};
pub use crate::pipeline_store::InMemoryPipelineStore;
pub use crate::storage::{FileDataConfigRepository, FileKeyValueStorage};

//! In-memory pipeline store.

use std::sync::{PoisonError, RwLock};

use rath_core::pipeline::{CubeStorageManageMode, PipelineStore};

/// Holds the pipeline settings the session store persists alongside its own.
#[derive(Debug, Default)]
pub struct InMemoryPipelineStore {
    cube_storage_manage_mode: RwLock<CubeStorageManageMode>,
}

impl InMemoryPipelineStore {
    pub fn new(mode: CubeStorageManageMode) -> Self {
        Self {
            cube_storage_manage_mode: RwLock::new(mode),
        }
    }
}

impl PipelineStore for InMemoryPipelineStore {
    fn cube_storage_manage_mode(&self) -> CubeStorageManageMode {
        *self
            .cube_storage_manage_mode
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn set_cube_storage_manage_mode(&self, mode: CubeStorageManageMode) {
        *self
            .cube_storage_manage_mode
            .write()
            .unwrap_or_else(PoisonError::into_inner) = mode;
    }
}

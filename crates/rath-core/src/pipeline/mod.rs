//! Sibling pipeline store port.
//!
//! Only the cube storage mode crosses into the session store; the rest of
//! the pipeline store is opaque here.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Where the analysis pipeline keeps its cube cache.
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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CubeStorageManageMode {
    LocalCache,
    LocalDisk,
    #[default]
    LocalMix,
}

/// Read/write access to the pipeline store's cube storage mode.
pub trait PipelineStore: Send + Sync {
    fn cube_storage_manage_mode(&self) -> CubeStorageManageMode;

    fn set_cube_storage_manage_mode(&self, mode: CubeStorageManageMode);
}

//! Session state types.
//!
//! `CommonState` is the single snapshot that views render from. It is only
//! ever replaced as a whole by the store, never shared mutably.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::engine::ComputationEngine;
use crate::viz::Specification;

/// Top-level application views.
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
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum PivotKey {
    #[default]
    DataSource,
    Editor,
    Support,
    NoteBook,
    Lts,
    MegaAuto,
    SemiAuto,
    DashBoard,
    Painter,
    Collection,
    Causal,
    Connection,
}

/// Analysis depth used by the automated exploration pipeline.
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
pub enum ExploreMode {
    #[default]
    Comprehensive,
    Familiar,
    Manual,
}

/// Whether analysis tasks run against the local worker or a remote target.
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
pub enum TaskTestMode {
    #[default]
    Local,
    Remote,
}

/// Navigation rendering style.
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
pub enum NavMode {
    #[default]
    Text,
    Icon,
}

/// Severity of a notice shown in the message bar.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Error,
    Info,
    Success,
}

/// One entry in the notification log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub content: String,
}

impl Notice {
    pub fn new(severity: Severity, content: impl Into<String>) -> Self {
        Self {
            severity,
            content: content.into(),
        }
    }
}

/// Snapshot of every session-scoped UI field.
///
/// `revision` increases by exactly one for each change group the store
/// publishes, so a subscriber can tell how many updates it has missed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonState {
    pub app_key: PivotKey,
    pub computation_engine: ComputationEngine,
    pub explore_mode: ExploreMode,
    pub task_mode: TaskTestMode,
    pub messages: Vec<Notice>,
    pub show_storage_modal: bool,
    pub show_analysis_config: bool,
    pub config_open: bool,
    pub nav_mode: NavMode,
    pub graphic_walker_spec: Specification,
    pub config_key: String,
    pub revision: u64,
}

impl CommonState {
    /// Initial state for a fresh session with a hydrated task mode.
    pub fn new(task_mode: TaskTestMode) -> Self {
        Self {
            app_key: PivotKey::default(),
            computation_engine: ComputationEngine::default(),
            explore_mode: ExploreMode::default(),
            task_mode,
            messages: Vec::new(),
            show_storage_modal: false,
            show_analysis_config: false,
            config_open: false,
            nav_mode: NavMode::default(),
            graphic_walker_spec: Specification::default(),
            config_key: String::new(),
            revision: 0,
        }
    }
}

impl Default for CommonState {
    fn default() -> Self {
        Self::new(TaskTestMode::default())
    }
}

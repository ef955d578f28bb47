//! Dataset picker segment.
//!
//! [`DataSourceSegment::render`] is a pure function of the dataset store and
//! the caller-supplied readiness flag. User actions go back through
//! [`DataSourceSegment::dispatch`], which calls exactly one store operation.

use rath_core::dataset::DatasetStore;
use serde::Serialize;

pub const CURRENT_DATASET_LABEL: &str = "Current dataset";
pub const BUILD_DATASET_LABEL: &str = "Create dataset";
pub const BUILDER_MODAL_TITLE: &str = "Create data source";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetOption {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

/// Readiness indicator shown after the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusIcon {
    /// Pre-work finished (green check).
    Ready,
    /// Pre-work still running (yellow refresh).
    Pending,
}

/// Everything the segment displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentView {
    pub show_spinner: bool,
    pub label: &'static str,
    pub selected_id: Option<String>,
    pub options: Vec<DatasetOption>,
    pub build_button_label: &'static str,
    /// Title of the creation modal, present only while it is open.
    pub builder_modal: Option<&'static str>,
    pub status: StatusIcon,
}

/// Actions the segment can emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentAction {
    SelectDataset(String),
    StartBuilding,
    CloseBuilder,
}

pub struct DataSourceSegment;

impl DataSourceSegment {
    pub fn render(store: &dyn DatasetStore, pre_work_done: bool) -> SegmentView {
        let selected_id = store.current_dataset().map(|ds| ds.id);
        let options = store
            .datasets()
            .into_iter()
            .map(|ds| DatasetOption {
                selected: selected_id.as_deref() == Some(ds.id.as_str()),
                id: ds.id,
                name: ds.name,
            })
            .collect();

        SegmentView {
            show_spinner: !pre_work_done,
            label: CURRENT_DATASET_LABEL,
            selected_id,
            options,
            build_button_label: BUILD_DATASET_LABEL,
            builder_modal: store.show_ds_panel().then_some(BUILDER_MODAL_TITLE),
            status: if pre_work_done {
                StatusIcon::Ready
            } else {
                StatusIcon::Pending
            },
        }
    }

    pub fn dispatch(store: &dyn DatasetStore, action: SegmentAction) {
        match action {
            SegmentAction::SelectDataset(id) => store.use_ds(&id),
            SegmentAction::StartBuilding => store.start_ds_building_task(),
            SegmentAction::CloseBuilder => store.set_show_ds_panel(false),
        }
    }
}

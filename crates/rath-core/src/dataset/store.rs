use super::model::Dataset;

/// Dataset store operations used by the data source view.
pub trait DatasetStore: Send + Sync {
    /// The dataset currently selected for analysis, if any exist.
    fn current_dataset(&self) -> Option<Dataset>;

    /// Every dataset available for selection, in display order.
    fn datasets(&self) -> Vec<Dataset>;

    /// Whether the dataset creation panel is open.
    fn show_ds_panel(&self) -> bool;

    /// Selects the dataset with `id`.
    fn use_ds(&self, id: &str);

    /// Opens the dataset creation flow.
    fn start_ds_building_task(&self);

    fn set_show_ds_panel(&self, show: bool);
}

//! In-memory dataset store.

use std::sync::{PoisonError, RwLock};

use rath_core::dataset::{Dataset, DatasetStore};

#[derive(Debug, Default)]
struct CatalogState {
    datasets: Vec<Dataset>,
    current: Option<String>,
    show_ds_panel: bool,
}

/// Dataset store holding the registered datasets and the current selection.
#[derive(Debug, Default)]
pub struct DatasetCatalog {
    state: RwLock<CatalogState>,
}

impl DatasetCatalog {
    /// Creates a catalog selecting the first dataset.
    pub fn new(datasets: Vec<Dataset>) -> Self {
        let current = datasets.first().map(|ds| ds.id.clone());
        Self {
            state: RwLock::new(CatalogState {
                datasets,
                current,
                show_ds_panel: false,
            }),
        }
    }
}

impl DatasetStore for DatasetCatalog {
    fn current_dataset(&self) -> Option<Dataset> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let current = state.current.as_deref()?;
        state.datasets.iter().find(|ds| ds.id == current).cloned()
    }

    fn datasets(&self) -> Vec<Dataset> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .datasets
            .clone()
    }

    fn show_ds_panel(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .show_ds_panel
    }

    fn use_ds(&self, id: &str) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.datasets.iter().any(|ds| ds.id == id) {
            state.current = Some(id.to_string());
        } else {
            tracing::warn!("[DatasetCatalog] Ignoring selection of unknown dataset '{}'", id);
        }
    }

    fn start_ds_building_task(&self) {
        self.set_show_ds_panel(true);
    }

    fn set_show_ds_panel(&self, show: bool) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .show_ds_panel = show;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> DatasetCatalog {
        DatasetCatalog::new(vec![
            Dataset::new("ds-1", "Titanic"),
            Dataset::new("ds-2", "Bike sharing"),
        ])
    }

    #[test]
    fn test_first_dataset_is_current() {
        assert_eq!(catalog().current_dataset().unwrap().id, "ds-1");
        assert!(DatasetCatalog::default().current_dataset().is_none());
    }

    #[test]
    fn test_use_unknown_dataset_keeps_selection() {
        let catalog = catalog();
        catalog.use_ds("ds-2");
        catalog.use_ds("missing");
        assert_eq!(catalog.current_dataset().unwrap().id, "ds-2");
    }

    #[test]
    fn test_building_flow_toggles_panel() {
        let catalog = catalog();
        catalog.start_ds_building_task();
        assert!(catalog.show_ds_panel());

        catalog.set_show_ds_panel(false);
        assert!(!catalog.show_ds_panel());
        assert_eq!(catalog.current_dataset().unwrap().id, "ds-1");
    }
}

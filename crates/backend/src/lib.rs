pub mod api;
pub mod dashboards;
pub mod routes;
pub mod shared;
pub mod system;

use contracts::dashboards::d400_superstore::Selection;

use crate::shared::data::SalesDataset;

/// Shared, read-only state of the running server
pub struct AppState {
    pub dataset: SalesDataset,
    /// Initial selection, already fitted to the dataset
    pub defaults: Selection,
}

impl AppState {
    pub fn new(dataset: SalesDataset, defaults: Selection) -> Self {
        Self { dataset, defaults }
    }
}

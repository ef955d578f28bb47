//! Dataset domain types.
//!
//! Datasets belong to their own store. The session store never touches
//! them; only the data source view reads and dispatches to both.

mod model;
mod store;

pub use model::Dataset;
pub use store::DatasetStore;

pub mod bootstrap;
pub mod data_source_segment;
pub mod dataset_catalog;

pub use bootstrap::{AppSession, SessionBootstrap};
pub use data_source_segment::{DataSourceSegment, SegmentAction, SegmentView};
pub use dataset_catalog::DatasetCatalog;

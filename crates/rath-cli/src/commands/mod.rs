pub mod config;
pub mod datasets;
pub mod engine;
pub mod mode;
pub mod status;

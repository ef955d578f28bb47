pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod persistence;
pub mod pipeline;
pub mod session;
pub mod viz;

// Re-export common error type
pub use error::{RathError, Result};

//! File-backed storage adapters.

pub mod atomic_file;
pub mod data_config;
pub mod local_storage;

pub use data_config::FileDataConfigRepository;
pub use local_storage::FileKeyValueStorage;

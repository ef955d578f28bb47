//! Computation engine adapters.

mod worker;
mod worker_engine;

pub use worker_engine::WorkerEngine;

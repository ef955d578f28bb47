//! Visualization specs exchanged with the embedded graphic editor.

mod model;
mod transform;

pub use model::{EncodingChannel, Specification, VegaSubset};
pub use transform::{VegaSubsetTransform, VizTransform};

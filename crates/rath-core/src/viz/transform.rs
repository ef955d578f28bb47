//! Vega subset to editor specification transform.

use super::model::{Specification, VegaSubset};

/// Maps an externally authored chart onto the editor's schema.
///
/// Implementations must be total: every input yields a specification.
pub trait VizTransform: Send + Sync {
    fn transform(&self, spec: &VegaSubset) -> Specification;
}

/// Channel mapping used by the analysis views.
///
/// | Vega channel | Editor slot |
/// |---|---|
/// | `x`, `y` | `position` |
/// | `color` | `color` |
/// | `size` | `size` |
/// | `shape` | `shape` |
/// | `opacity` | `opacity` |
/// | `row`, `column` | `facets` |
/// | mark | `geomType` |
#[derive(Debug, Clone, Copy, Default)]
pub struct VegaSubsetTransform;

impl VizTransform for VegaSubsetTransform {
    fn transform(&self, spec: &VegaSubset) -> Specification {
        let collect = |channels: &[&str]| -> Vec<String> {
            channels
                .iter()
                .filter_map(|c| spec.channel_field(c))
                .map(str::to_string)
                .collect()
        };

        Specification {
            position: collect(&["x", "y"]),
            color: collect(&["color"]),
            size: collect(&["size"]),
            shape: collect(&["shape"]),
            opacity: collect(&["opacity"]),
            facets: collect(&["row", "column"]),
            page: Vec::new(),
            filter: Vec::new(),
            geom_type: spec.mark_type().map(|m| vec![m.to_string()]).unwrap_or_default(),
        }
    }
}

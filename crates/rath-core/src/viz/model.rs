use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single Vega-Lite encoding channel, e.g. `{ "field": "price", "type": "quantitative" }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncodingChannel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<String>,
    /// Keys this crate does not interpret (scale, axis, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl EncodingChannel {
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            field: Some(name.into()),
            ..Self::default()
        }
    }
}

/// The subset of Vega-Lite produced by the analysis pipelines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VegaSubset {
    /// Either a mark name (`"bar"`) or a mark object (`{ "type": "bar" }`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mark: Option<serde_json::Value>,
    #[serde(default)]
    pub encoding: BTreeMap<String, EncodingChannel>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl VegaSubset {
    pub fn mark_type(&self) -> Option<&str> {
        match self.mark.as_ref()? {
            serde_json::Value::String(name) => Some(name.as_str()),
            serde_json::Value::Object(obj) => obj.get("type").and_then(|v| v.as_str()),
            _ => None,
        }
    }

    pub fn channel_field(&self, channel: &str) -> Option<&str> {
        self.encoding
            .get(channel)
            .and_then(|c| c.field.as_deref())
    }
}

/// Editor-side chart description. Every slot lists field names.
///
/// The default value is the empty object the editor starts with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specification {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub position: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub color: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub size: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shape: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub opacity: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub facets: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub page: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub geom_type: Vec<String>,
}

impl Specification {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

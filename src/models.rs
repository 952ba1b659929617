use serde::{Deserialize, Serialize};

use crate::style::Interpolation;

/// One domain entry as it appears in JSON: a number or a category label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomainValue {
    Number(f64),
    Label(String),
}

impl DomainValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            DomainValue::Number(v) => Some(*v),
            DomainValue::Label(_) => None,
        }
    }

    /// Text used when the value is treated as a category.
    pub fn as_label(&self) -> String {
        match self {
            DomainValue::Number(v) => v.to_string(),
            DomainValue::Label(s) => s.clone(),
        }
    }
}

/// Quantile breakpoints may be requested (`true`, computed from the domain samples)
/// or given explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuantileSpec {
    Computed(bool),
    Explicit(Vec<f64>),
}

/// Serializable description of a color scale, as read from a JSON file.
///
/// The optional fields are capabilities: which of them are present decides the
/// scale shape (see [`crate::scale::ColorScale::detect`]).
///
/// ```json
/// { "domain": [0, 100], "range": ["#eff3ff", "#6baed6", "#08519c"], "thresholds": [25, 75] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleDescriptor {
    #[serde(default)]
    pub domain: Vec<DomainValue>,
    /// CSS color strings.
    #[serde(default)]
    pub range: Vec<String>,
    /// Explicit breakpoints. An empty list asks for evenly spaced ones
    /// (one fewer than the number of colors).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantiles: Option<QuantileSpec>,
    /// Presence marks the scale as continuous (invertible numeric mapping).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpolate: Option<Interpolation>,
}

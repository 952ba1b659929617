//! Error type shared by scale construction, layout, and drawing.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LegendError {
    #[error("scale domain is empty")]
    EmptyDomain,

    #[error("scale range has no colors")]
    EmptyRange,

    #[error("scale domain contains a non-finite value: {0}")]
    NonFiniteDomain(f64),

    #[error("invalid color {0:?}: {1}")]
    InvalidColor(String, String),

    #[error("breakpoints must be ascending, got {0:?}")]
    ThresholdsNotAscending(Vec<f64>),

    #[error("expected {expected} colors for this scale, got {actual}")]
    ColorCountMismatch { expected: usize, actual: usize },

    #[error("unsupported scale: {0}")]
    UnsupportedScale(String),

    #[error("invalid legend configuration: {0}")]
    InvalidConfig(String),

    #[error("target {width}x{height} leaves no room for the color bar")]
    TargetTooSmall { width: u32, height: u32 },

    #[error("drawing backend error: {0}")]
    Draw(String),
}

pub type Result<T> = std::result::Result<T, LegendError>;

//! Public types and constants for the visualization module.

use serde::{Deserialize, Serialize};

use crate::error::{LegendError, Result};
use crate::scale::ScaleKind;
use crate::style::{BLACK, Rgba, WHITE};

pub const COLORBAR_CLASS: &str = "legend colorbar";
pub const AXIS_CLASS: &str = "legend axis";

/// Tunable layout of a legend. Every field has a default, so a JSON config only
/// needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    /// Inward margin on both sides of the color bar (px).
    pub margin_horizontal: f64,
    pub margin_top: f64,
    /// Space below the bar reserved for axis labels (px).
    pub margin_bottom: f64,
    /// Swatch width when sampling a continuous scale. Larger values draw fewer rects.
    pub continuous_step_pixels: f64,
    /// Fraction of the domain span padded onto both ends before mapping to pixels.
    pub domain_extend_fraction: f64,
    /// Gap between the bottom of the bar and the axis line (px).
    pub axis_gap: f64,
    /// Inner and outer padding of nominal bands, as a fraction of the band step.
    pub band_padding: f64,
    /// Approximate number of ticks on a linear axis.
    pub tick_count: usize,
    /// Significant digits of numeric tick labels.
    pub label_precision: usize,
    /// Round the axis domain outward to nice values.
    pub nice: bool,
    /// Stroke drawn around in-range continuous swatches.
    pub separator_color: Rgba,
    pub axis_color: Rgba,
    pub tick_size: f64,
    pub font_px: u32,
    /// Locale tag for the decimal separator of labels (`en`, `de`, `fr`, …).
    pub locale: String,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            margin_horizontal: 10.0,
            margin_top: 2.0,
            margin_bottom: 24.0,
            continuous_step_pixels: 40.0,
            domain_extend_fraction: 0.0,
            axis_gap: 5.0,
            band_padding: 0.05,
            tick_count: 10,
            label_precision: 2,
            nice: false,
            separator_color: WHITE,
            axis_color: BLACK,
            tick_size: 6.0,
            font_px: 10,
            locale: "en".to_string(),
        }
    }
}

impl LegendConfig {
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("margin_horizontal", self.margin_horizontal),
            ("margin_top", self.margin_top),
            ("margin_bottom", self.margin_bottom),
            ("domain_extend_fraction", self.domain_extend_fraction),
            ("axis_gap", self.axis_gap),
            ("tick_size", self.tick_size),
        ];
        for (name, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(LegendError::InvalidConfig(format!(
                    "{name} must be a finite, non-negative number, got {v}"
                )));
            }
        }
        if !self.continuous_step_pixels.is_finite() || self.continuous_step_pixels <= 0.0 {
            return Err(LegendError::InvalidConfig(format!(
                "continuous_step_pixels must be positive, got {}",
                self.continuous_step_pixels
            )));
        }
        if !(0.0..1.0).contains(&self.band_padding) {
            return Err(LegendError::InvalidConfig(format!(
                "band_padding must be in [0, 1), got {}",
                self.band_padding
            )));
        }
        if !(1..=21).contains(&self.label_precision) {
            return Err(LegendError::InvalidConfig(format!(
                "label_precision must be between 1 and 21, got {}",
                self.label_precision
            )));
        }
        Ok(())
    }
}

/// Pixel layout derived from the target size and the config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendGeometry {
    pub bar_width: f64,
    pub bar_height: f64,
    /// Translation of the colorbar group.
    pub colorbar_origin: (f64, f64),
    /// Translation of the axis group.
    pub axis_origin: (f64, f64),
}

/// One drawing primitive, in coordinates local to its group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Primitive {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Rgba,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stroke: Option<Rgba>,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: Rgba,
    },
    /// A label centered horizontally on `x`, hanging from `y`.
    Text {
        x: f64,
        y: f64,
        text: String,
        font_px: u32,
        fill: Rgba,
    },
}

/// A translated group of primitives, the unit appended to a render target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub class: String,
    pub translate: (f64, f64),
    pub children: Vec<Primitive>,
}

impl Group {
    pub fn new(class: &str, translate: (f64, f64)) -> Self {
        Self {
            class: class.to_string(),
            translate,
            children: Vec::new(),
        }
    }

    pub fn rects(&self) -> impl Iterator<Item = &Primitive> {
        self.children
            .iter()
            .filter(|p| matches!(p, Primitive::Rect { .. }))
    }
}

/// A labelled tick, positioned in axis-local pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub position: f64,
    pub label: String,
    /// The domain value behind a numeric tick.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// Everything a single render appends to its target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendSpec {
    pub kind: ScaleKind,
    pub geometry: LegendGeometry,
    /// Domain shown by the axis after extension (and rounding, when `nice`).
    /// `None` for nominal scales.
    pub axis_domain: Option<(f64, f64)>,
    pub ticks: Vec<Tick>,
    pub colorbar: Group,
    pub axis: Group,
}

impl LegendSpec {
    /// Number of color swatches in the colorbar.
    pub fn swatch_count(&self) -> usize {
        self.colorbar.rects().count()
    }

    pub fn into_groups(self) -> [Group; 2] {
        [self.colorbar, self.axis]
    }
}

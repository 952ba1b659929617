//! Color scales understood by the legend renderer.
//!
//! A [`ColorScale`] is one of three shapes:
//! - **Binned**: an extent cut into segments by threshold or quantile breakpoints.
//! - **Continuous**: a numeric domain whose colors are interpolated between stops.
//! - **Nominal**: a set of category labels, one color each.
//!
//! Scales are usually built directly with the constructors below. When the scale
//! comes from JSON, [`ColorScale::detect`] picks the shape from the capabilities
//! the [`ScaleDescriptor`] carries, in the order binned → continuous → nominal.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{LegendError, Result};
use crate::models::{DomainValue, QuantileSpec, ScaleDescriptor};
use crate::style::{Interpolation, Rgba, interpolate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    Binned,
    Continuous,
    Nominal,
}

impl fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScaleKind::Binned => "binned",
            ScaleKind::Continuous => "continuous",
            ScaleKind::Nominal => "nominal",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColorScale {
    Binned(BinnedScale),
    Continuous(ContinuousScale),
    Nominal(NominalScale),
}

impl ColorScale {
    pub fn kind(&self) -> ScaleKind {
        match self {
            ColorScale::Binned(_) => ScaleKind::Binned,
            ColorScale::Continuous(_) => ScaleKind::Continuous,
            ColorScale::Nominal(_) => ScaleKind::Nominal,
        }
    }

    /// `[min, max]` of a numeric domain; `None` for nominal scales.
    pub fn extent(&self) -> Option<(f64, f64)> {
        match self {
            ColorScale::Binned(s) => Some(s.extent()),
            ColorScale::Continuous(s) => Some(s.extent()),
            ColorScale::Nominal(_) => None,
        }
    }

    /// Build a scale from a JSON descriptor.
    ///
    /// Shape detection is ordered; the first matching capability wins:
    /// 1. `thresholds` or `quantiles` (thresholds win when both are present) → binned
    /// 2. `interpolate` → continuous
    /// 3. a domain made only of labels, or only of numbers → nominal
    ///
    /// Anything else is rejected with [`LegendError::UnsupportedScale`].
    pub fn detect(desc: &ScaleDescriptor) -> Result<Self> {
        if desc.domain.is_empty() {
            return Err(LegendError::EmptyDomain);
        }
        let colors = parse_colors(&desc.range)?;

        let quantiles = match &desc.quantiles {
            Some(QuantileSpec::Computed(false)) | None => None,
            Some(q) => Some(q),
        };

        let scale: ColorScale = if let Some(thresholds) = &desc.thresholds {
            let values = numeric_domain(&desc.domain, ScaleKind::Binned)?;
            let extent = extent_of(&values)?;
            if thresholds.is_empty() {
                BinnedScale::quantize(extent, colors)?.into()
            } else {
                BinnedScale::threshold(extent, thresholds.clone(), colors)?.into()
            }
        } else if let Some(q) = quantiles {
            let values = numeric_domain(&desc.domain, ScaleKind::Binned)?;
            match q {
                QuantileSpec::Explicit(qs) => BinnedScale::from_breakpoints(
                    extent_of(&values)?,
                    Breakpoints::Quantiles(qs.clone()),
                    colors,
                )?
                .into(),
                _ => BinnedScale::quantile(values, colors)?.into(),
            }
        } else if let Some(space) = desc.interpolate {
            let values = numeric_domain(&desc.domain, ScaleKind::Continuous)?;
            ContinuousScale::new(values, colors, space)?.into()
        } else {
            let all_labels = desc
                .domain
                .iter()
                .all(|d| matches!(d, DomainValue::Label(_)));
            let all_numbers = desc
                .domain
                .iter()
                .all(|d| matches!(d, DomainValue::Number(_)));
            if !(all_labels || all_numbers) {
                return Err(LegendError::UnsupportedScale(
                    "domain mixes numbers and labels and declares no thresholds, quantiles, \
                     or interpolation"
                        .into(),
                ));
            }
            let labels = desc.domain.iter().map(DomainValue::as_label).collect();
            NominalScale::new(labels, colors)?.into()
        };

        debug!("detected {} scale from descriptor", scale.kind());
        Ok(scale)
    }
}

impl From<BinnedScale> for ColorScale {
    fn from(s: BinnedScale) -> Self {
        ColorScale::Binned(s)
    }
}

impl From<ContinuousScale> for ColorScale {
    fn from(s: ContinuousScale) -> Self {
        ColorScale::Continuous(s)
    }
}

impl From<NominalScale> for ColorScale {
    fn from(s: NominalScale) -> Self {
        ColorScale::Nominal(s)
    }
}

fn parse_colors(range: &[String]) -> Result<Vec<Rgba>> {
    if range.is_empty() {
        return Err(LegendError::EmptyRange);
    }
    range.iter().map(|s| Rgba::parse(s)).collect()
}

fn numeric_domain(domain: &[DomainValue], kind: ScaleKind) -> Result<Vec<f64>> {
    domain
        .iter()
        .map(|d| {
            d.as_number().ok_or_else(|| {
                LegendError::UnsupportedScale(format!(
                    "{kind} scale needs a numeric domain, found label {:?}",
                    d.as_label()
                ))
            })
        })
        .collect()
}

/// `[min, max]` of finite values.
pub(crate) fn extent_of(values: &[f64]) -> Result<(f64, f64)> {
    if values.is_empty() {
        return Err(LegendError::EmptyDomain);
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        if !v.is_finite() {
            return Err(LegendError::NonFiniteDomain(v));
        }
        min = min.min(v);
        max = max.max(v);
    }
    Ok((min, max))
}

fn ensure_ascending(values: &[f64]) -> Result<()> {
    if values.iter().any(|v| !v.is_finite()) || !values.windows(2).all(|w| w[0] <= w[1]) {
        return Err(LegendError::ThresholdsNotAscending(values.to_vec()));
    }
    Ok(())
}

/// Breakpoints of a binned scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoints {
    Thresholds(Vec<f64>),
    Quantiles(Vec<f64>),
}

impl Breakpoints {
    pub fn values(&self) -> &[f64] {
        match self {
            Breakpoints::Thresholds(v) | Breakpoints::Quantiles(v) => v,
        }
    }
}

/// A scale that maps each segment between breakpoints to one color.
#[derive(Debug, Clone, PartialEq)]
pub struct BinnedScale {
    extent: (f64, f64),
    breakpoints: Breakpoints,
    colors: Vec<Rgba>,
}

impl BinnedScale {
    /// General constructor: `colors.len()` must be `breakpoints.len() + 1`.
    pub fn from_breakpoints(
        extent: (f64, f64),
        breakpoints: Breakpoints,
        colors: Vec<Rgba>,
    ) -> Result<Self> {
        let extent = extent_of(&[extent.0, extent.1])?;
        ensure_ascending(breakpoints.values())?;
        let expected = breakpoints.values().len() + 1;
        if colors.len() != expected {
            return Err(LegendError::ColorCountMismatch {
                expected,
                actual: colors.len(),
            });
        }
        Ok(Self {
            extent,
            breakpoints,
            colors,
        })
    }

    /// Explicit thresholds inside `extent`.
    pub fn threshold(extent: (f64, f64), thresholds: Vec<f64>, colors: Vec<Rgba>) -> Result<Self> {
        Self::from_breakpoints(extent, Breakpoints::Thresholds(thresholds), colors)
    }

    /// Evenly split `extent` into `colors.len()` segments.
    pub fn quantize(extent: (f64, f64), colors: Vec<Rgba>) -> Result<Self> {
        if colors.is_empty() {
            return Err(LegendError::EmptyRange);
        }
        let (x0, x1) = extent_of(&[extent.0, extent.1])?;
        let k = colors.len() - 1;
        let thresholds = (0..k)
            .map(|i| ((i as f64 + 1.0) * x1 - (i as f64 - k as f64) * x0) / (k as f64 + 1.0))
            .collect();
        Self::from_breakpoints((x0, x1), Breakpoints::Thresholds(thresholds), colors)
    }

    /// Split sample values into `colors.len()` groups of equal count.
    pub fn quantile(mut samples: Vec<f64>, colors: Vec<Rgba>) -> Result<Self> {
        if colors.is_empty() {
            return Err(LegendError::EmptyRange);
        }
        let extent = extent_of(&samples)?;
        samples.sort_by(f64::total_cmp);
        let n = colors.len();
        let quantiles = (1..n)
            .map(|i| quantile_sorted(&samples, i as f64 / n as f64))
            .collect();
        Self::from_breakpoints(extent, Breakpoints::Quantiles(quantiles), colors)
    }

    pub fn extent(&self) -> (f64, f64) {
        self.extent
    }

    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    pub fn color(&self, v: f64) -> Rgba {
        let idx = self.breakpoints.values().partition_point(|t| *t <= v);
        self.colors[idx.min(self.colors.len() - 1)]
    }
}

/// Linear-interpolated quantile (R-7) of sorted, non-empty data.
fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 || p <= 0.0 {
        return sorted[0];
    }
    if p >= 1.0 {
        return sorted[n - 1];
    }
    let i = (n - 1) as f64 * p;
    let i0 = i.floor() as usize;
    let v0 = sorted[i0];
    v0 + (sorted[i0 + 1] - v0) * (i - i0 as f64)
}

/// A scale interpolating colors across numeric stops.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousScale {
    stops: Vec<f64>,
    colors: Vec<Rgba>,
    interpolation: Interpolation,
}

impl ContinuousScale {
    /// `domain` lists the stops. A two-stop domain with more colors spreads the
    /// colors evenly over it; otherwise the counts must match. A descending
    /// domain is accepted and reversed together with its colors.
    pub fn new(domain: Vec<f64>, colors: Vec<Rgba>, interpolation: Interpolation) -> Result<Self> {
        if colors.is_empty() {
            return Err(LegendError::EmptyRange);
        }
        extent_of(&domain)?;

        let mut stops = if domain.len() == 2 && colors.len() > 2 {
            let (a, b) = (domain[0], domain[1]);
            let n = colors.len() - 1;
            (0..=n).map(|i| a + (b - a) * i as f64 / n as f64).collect()
        } else {
            domain
        };
        if stops.len() != colors.len() {
            return Err(LegendError::ColorCountMismatch {
                expected: stops.len(),
                actual: colors.len(),
            });
        }

        let mut colors = colors;
        let descending = stops.windows(2).all(|w| w[0] >= w[1]);
        if descending && stops.first() > stops.last() {
            stops.reverse();
            colors.reverse();
        }
        if !stops.windows(2).all(|w| w[0] <= w[1]) {
            return Err(LegendError::UnsupportedScale(format!(
                "continuous domain must be monotonic, got {stops:?}"
            )));
        }

        Ok(Self {
            stops,
            colors,
            interpolation,
        })
    }

    /// Two-color scale over `[min, max]`.
    pub fn linear(min: f64, max: f64, from: Rgba, to: Rgba) -> Result<Self> {
        Self::new(vec![min, max], vec![from, to], Interpolation::Rgb)
    }

    pub fn extent(&self) -> (f64, f64) {
        (self.stops[0], self.stops[self.stops.len() - 1])
    }

    pub fn stops(&self) -> &[f64] {
        &self.stops
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Interpolated color; values outside the domain take the end colors.
    pub fn color(&self, v: f64) -> Rgba {
        let last = self.stops.len() - 1;
        if v.is_nan() || v <= self.stops[0] {
            return self.colors[0];
        }
        if v >= self.stops[last] {
            return self.colors[last];
        }
        let j = self.stops.partition_point(|s| *s <= v) - 1;
        let (s0, s1) = (self.stops[j], self.stops[j + 1]);
        if s1 == s0 {
            return self.colors[j + 1];
        }
        interpolate(
            self.colors[j],
            self.colors[j + 1],
            (v - s0) / (s1 - s0),
            self.interpolation,
        )
    }
}

/// A scale over category labels.
#[derive(Debug, Clone, PartialEq)]
pub struct NominalScale {
    labels: Vec<String>,
    colors: Vec<Rgba>,
}

impl NominalScale {
    /// Duplicate labels keep their first position. Colors repeat when there are
    /// fewer colors than labels.
    pub fn new(labels: Vec<String>, colors: Vec<Rgba>) -> Result<Self> {
        if labels.is_empty() {
            return Err(LegendError::EmptyDomain);
        }
        if colors.is_empty() {
            return Err(LegendError::EmptyRange);
        }
        let mut unique: Vec<String> = Vec::with_capacity(labels.len());
        for label in labels {
            if !unique.contains(&label) {
                unique.push(label);
            }
        }
        Ok(Self {
            labels: unique,
            colors,
        })
    }

    /// Labels in declaration order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Labels in ascending order, the order a legend lays them out.
    pub fn sorted_labels(&self) -> Vec<String> {
        let mut out = self.labels.clone();
        out.sort();
        out
    }

    pub fn color(&self, label: &str) -> Option<Rgba> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.colors[i % self.colors.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{BLACK, WHITE};

    fn palette(n: usize) -> Vec<Rgba> {
        (0..n).map(|i| Rgba::rgb(i as u8 * 10, 0, 0)).collect()
    }

    #[test]
    fn quantize_thresholds_are_even() {
        let s = BinnedScale::quantize((0.0, 100.0), palette(4)).unwrap();
        assert_eq!(s.breakpoints().values(), &[25.0, 50.0, 75.0]);
        assert_eq!(s.color(10.0), palette(4)[0]);
        assert_eq!(s.color(25.0), palette(4)[1]);
        assert_eq!(s.color(99.0), palette(4)[3]);
    }

    #[test]
    fn quantile_breakpoints() {
        let s = BinnedScale::quantile(vec![4.0, 1.0, 3.0, 2.0, 5.0], palette(2)).unwrap();
        assert_eq!(s.extent(), (1.0, 5.0));
        assert_eq!(s.breakpoints(), &Breakpoints::Quantiles(vec![3.0]));
    }

    #[test]
    fn threshold_color_count_checked() {
        let err = BinnedScale::threshold((0.0, 1.0), vec![0.5], palette(3)).unwrap_err();
        assert!(matches!(
            err,
            LegendError::ColorCountMismatch {
                expected: 2,
                actual: 3
            }
        ));
        let err = BinnedScale::threshold((0.0, 1.0), vec![0.7, 0.2], palette(3)).unwrap_err();
        assert!(matches!(err, LegendError::ThresholdsNotAscending(_)));
    }

    #[test]
    fn continuous_clamps_and_interpolates() {
        let s = ContinuousScale::linear(0.0, 10.0, BLACK, WHITE).unwrap();
        assert_eq!(s.color(-5.0), BLACK);
        assert_eq!(s.color(50.0), WHITE);
        assert_eq!(s.color(5.0), Rgba::rgb(128, 128, 128));
    }

    #[test]
    fn continuous_descending_domain_is_reversed() {
        let s = ContinuousScale::new(vec![10.0, 0.0], vec![WHITE, BLACK], Interpolation::Rgb)
            .unwrap();
        assert_eq!(s.extent(), (0.0, 10.0));
        assert_eq!(s.color(0.0), BLACK);
    }

    #[test]
    fn continuous_spreads_extra_colors() {
        let s = ContinuousScale::new(vec![0.0, 100.0], palette(5), Interpolation::Rgb).unwrap();
        assert_eq!(s.stops(), &[0.0, 25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn nominal_dedups_and_cycles() {
        let s = NominalScale::new(
            vec!["b".into(), "a".into(), "b".into(), "c".into()],
            palette(2),
        )
        .unwrap();
        assert_eq!(s.labels(), &["b", "a", "c"]);
        assert_eq!(s.sorted_labels(), vec!["a", "b", "c"]);
        assert_eq!(s.color("c"), Some(palette(2)[0]));
        assert_eq!(s.color("zzz"), None);
    }
}

//! Legend layout: turns a color scale into positioned swatches and an axis.
//!
//! Nothing here draws. [`build_legend`] returns a [`LegendSpec`] that a render
//! target (an in-memory [`super::Scene`] or a plotters drawing area) appends.

use log::{debug, trace};
use std::iter;

use super::axis::{BandAxis, LinearAxis};
use super::types::{
    AXIS_CLASS, COLORBAR_CLASS, Group, LegendConfig, LegendGeometry, LegendSpec, Primitive, Tick,
};
use super::util::format_si_locale;
use crate::error::{LegendError, Result};
use crate::scale::{BinnedScale, ColorScale, ContinuousScale, NominalScale};
use crate::style::Rgba;

/// Space between tick marks and the top of their labels (px).
const LABEL_PADDING: f64 = 3.0;

/// Bar and group placement for a `width` × `height` target.
///
/// Bar width is `width − 2·margin_horizontal`, bar height is
/// `height − margin_top − margin_bottom`; both must stay positive.
pub fn compute_geometry(width: u32, height: u32, config: &LegendConfig) -> Result<LegendGeometry> {
    let bar_width = width as f64 - 2.0 * config.margin_horizontal;
    let bar_height = height as f64 - config.margin_top - config.margin_bottom;
    if bar_width <= 0.0 || bar_height <= 0.0 {
        return Err(LegendError::TargetTooSmall { width, height });
    }
    Ok(LegendGeometry {
        bar_width,
        bar_height,
        colorbar_origin: (config.margin_horizontal, config.margin_top),
        axis_origin: (
            config.margin_horizontal,
            config.margin_top + bar_height + config.axis_gap,
        ),
    })
}

/// Lay out a legend for `scale` on a `width` × `height` target.
pub fn build_legend(
    width: u32,
    height: u32,
    scale: &ColorScale,
    config: &LegendConfig,
) -> Result<LegendSpec> {
    config.validate()?;
    let geometry = compute_geometry(width, height, config)?;
    let mut colorbar = Group::new(COLORBAR_CLASS, geometry.colorbar_origin);

    let (ticks, axis_domain) = match scale {
        ColorScale::Binned(s) => {
            let axis = linear_axis(s.extent(), &geometry, config);
            let ticks = binned_swatches(s, &axis, &geometry, config, &mut colorbar);
            (ticks, Some(axis.domain))
        }
        ColorScale::Continuous(s) => {
            let axis = linear_axis(s.extent(), &geometry, config);
            let ticks = continuous_swatches(s, &axis, &geometry, config, &mut colorbar);
            (ticks, Some(axis.domain))
        }
        ColorScale::Nominal(s) => (nominal_swatches(s, &geometry, config, &mut colorbar), None),
    };

    let axis = axis_group(&geometry, &ticks, config);
    let spec = LegendSpec {
        kind: scale.kind(),
        geometry,
        axis_domain,
        ticks,
        colorbar,
        axis,
    };
    debug!(
        "{} legend: bar {}x{}, {} swatches, {} ticks",
        spec.kind,
        geometry.bar_width,
        geometry.bar_height,
        spec.swatch_count(),
        spec.ticks.len()
    );
    Ok(spec)
}

/// Pixel axis over the (extended, optionally niced) scale extent.
fn linear_axis(extent: (f64, f64), geometry: &LegendGeometry, config: &LegendConfig) -> LinearAxis {
    let (min, max) = extent;
    let pad = (max - min) * config.domain_extend_fraction;
    let axis = LinearAxis::new((min - pad, max + pad), (0.0, geometry.bar_width));
    if config.nice {
        axis.nice(config.tick_count)
    } else {
        axis
    }
}

fn numeric_tick(axis: &LinearAxis, value: f64, config: &LegendConfig) -> Tick {
    Tick {
        position: axis.scale(value),
        label: format_si_locale(value, config.label_precision, &config.locale),
        value: Some(value),
    }
}

fn swatch(x: f64, width: f64, height: f64, fill: Rgba, stroke: Option<Rgba>) -> Primitive {
    Primitive::Rect {
        x,
        y: 0.0,
        width,
        height,
        fill,
        stroke,
    }
}

/// Min == max: one full-width swatch and a single centered tick.
fn degenerate_swatch(
    value: f64,
    fill: Rgba,
    axis: &LinearAxis,
    geometry: &LegendGeometry,
    config: &LegendConfig,
    colorbar: &mut Group,
) -> Vec<Tick> {
    colorbar.children.push(swatch(
        0.0,
        geometry.bar_width,
        geometry.bar_height,
        fill,
        None,
    ));
    vec![numeric_tick(axis, value, config)]
}

fn binned_swatches(
    scale: &BinnedScale,
    axis: &LinearAxis,
    geometry: &LegendGeometry,
    config: &LegendConfig,
    colorbar: &mut Group,
) -> Vec<Tick> {
    let (min, max) = scale.extent();
    if axis.is_degenerate() {
        return degenerate_swatch(min, scale.color(min), axis, geometry, config, colorbar);
    }

    let boundaries: Vec<f64> = iter::once(min)
        .chain(scale.breakpoints().values().iter().copied())
        .chain(iter::once(max))
        .collect();

    for pair in boundaries.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let (px0, px1) = (axis.scale(start), axis.scale(end));
        let mid = (start + end) / 2.0;
        trace!("bin [{start}, {end}] -> px [{px0}, {px1}]");
        colorbar.children.push(swatch(
            px0,
            px1 - px0,
            geometry.bar_height,
            scale.color(mid),
            None,
        ));
    }

    boundaries
        .iter()
        .map(|&v| numeric_tick(axis, v, config))
        .collect()
}

fn continuous_swatches(
    scale: &ContinuousScale,
    axis: &LinearAxis,
    geometry: &LegendGeometry,
    config: &LegendConfig,
    colorbar: &mut Group,
) -> Vec<Tick> {
    let (min, max) = scale.extent();
    if axis.is_degenerate() {
        return degenerate_swatch(min, scale.color(min), axis, geometry, config, colorbar);
    }

    let step = config.continuous_step_pixels;
    let count = (geometry.bar_width / step).ceil() as usize;
    for k in 0..count {
        let x = k as f64 * step;
        let value = axis.invert(x + step / 2.0);
        // Pixels outside the true domain (extended or niced axis) take the boundary color.
        let (fill, stroke) = if value < min {
            (scale.color(min), None)
        } else if value < max {
            (scale.color(value), Some(config.separator_color))
        } else {
            (scale.color(max), None)
        };
        colorbar
            .children
            .push(swatch(x, step, geometry.bar_height, fill, stroke));
    }

    axis.ticks(config.tick_count)
        .into_iter()
        .map(|v| numeric_tick(axis, v, config))
        .collect()
}

fn nominal_swatches(
    scale: &NominalScale,
    geometry: &LegendGeometry,
    config: &LegendConfig,
    colorbar: &mut Group,
) -> Vec<Tick> {
    let bands = BandAxis::new(
        scale.sorted_labels(),
        (0.0, geometry.bar_width),
        config.band_padding,
    );
    let bandwidth = bands.bandwidth();

    let mut ticks = Vec::with_capacity(bands.labels().len());
    for label in bands.labels() {
        let (Some(x), Some(fill)) = (bands.position(label), scale.color(label)) else {
            continue;
        };
        colorbar
            .children
            .push(swatch(x, bandwidth, geometry.bar_height, fill, None));
        ticks.push(Tick {
            position: x + bandwidth / 2.0,
            label: label.clone(),
            value: None,
        });
    }
    ticks
}

/// Axis line with outer ticks, one tick mark per tick, and a centered label below each.
fn axis_group(geometry: &LegendGeometry, ticks: &[Tick], config: &LegendConfig) -> Group {
    let mut group = Group::new(AXIS_CLASS, geometry.axis_origin);
    let w = geometry.bar_width;
    let size = config.tick_size;
    let stroke = config.axis_color;

    group.children.push(Primitive::Line {
        x1: 0.0,
        y1: 0.0,
        x2: w,
        y2: 0.0,
        stroke,
    });
    for x in [0.0, w] {
        group.children.push(Primitive::Line {
            x1: x,
            y1: 0.0,
            x2: x,
            y2: size,
            stroke,
        });
    }

    for tick in ticks {
        group.children.push(Primitive::Line {
            x1: tick.position,
            y1: 0.0,
            x2: tick.position,
            y2: size,
            stroke,
        });
        group.children.push(Primitive::Text {
            x: tick.position,
            y: size + LABEL_PADDING,
            text: tick.label.clone(),
            font_px: config.font_px,
            fill: stroke,
        });
    }
    group
}

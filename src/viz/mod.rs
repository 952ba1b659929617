//! Legend rendering: lay out a color legend and append it to a render target.
//!
//! - Binned scales: one swatch per segment between breakpoints, ticks on the breakpoints
//! - Continuous scales: fixed-width sampled swatches, ticks on round values
//! - Nominal scales: padded equal-width bands, one tick per category
//! - Targets: an in-memory [`Scene`], any plotters drawing area, or an SVG/PNG file
//!
//! Rendering only appends. Calling [`render`] twice on the same target draws the
//! legend twice; clear the target first if that is not wanted.

pub mod axis;
pub mod legend;
pub mod types;
pub mod util;

pub use legend::{build_legend, compute_geometry};
pub use types::{
    AXIS_CLASS, COLORBAR_CLASS, Group, LegendConfig, LegendGeometry, LegendSpec, Primitive, Tick,
};

use anyhow::{Context, anyhow, bail};
use log::info;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::Result;
use crate::scale::ColorScale;
use crate::viz_plotters_adapter::draw_group;

/// A surface a legend can be appended to.
pub trait RenderTarget {
    /// Pixel width and height.
    fn size(&self) -> (u32, u32);

    /// Append a group after whatever the target already holds.
    fn append(&mut self, group: &Group) -> Result<()>;
}

/// In-memory target that records appended groups in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub groups: Vec<Group>,
}

impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            groups: Vec::new(),
        }
    }

    pub fn primitive_count(&self) -> usize {
        self.groups.iter().map(|g| g.children.len()).sum()
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }
}

impl RenderTarget for Scene {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn append(&mut self, group: &Group) -> Result<()> {
        self.groups.push(group.clone());
        Ok(())
    }
}

impl<DB: DrawingBackend> RenderTarget for DrawingArea<DB, Shift> {
    fn size(&self) -> (u32, u32) {
        self.dim_in_pixel()
    }

    fn append(&mut self, group: &Group) -> Result<()> {
        draw_group(self, group)
    }
}

/// Lay out a legend for `scale` at the target's size and append its colorbar
/// and axis groups. Returns the appended layout.
pub fn render<T: RenderTarget + ?Sized>(
    target: &mut T,
    scale: &ColorScale,
    config: &LegendConfig,
) -> Result<LegendSpec> {
    let (width, height) = target.size();
    let spec = build_legend(width, height, scale, config)?;
    target.append(&spec.colorbar)?;
    target.append(&spec.axis)?;
    Ok(spec)
}

static FONT_REGISTERED: AtomicBool = AtomicBool::new(false);

/// Register a TrueType/OpenType file as the `sans-serif` family.
/// Required before PNG output because `ab_glyph` doesn't discover OS fonts.
pub fn register_font_file<P: AsRef<Path>>(path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
    // Plotters keeps a 'static reference for the lifetime of the process.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    plotters::style::register_font("sans-serif", plotters::style::FontStyle::Normal, bytes)
        .map_err(|_| anyhow!("invalid font file {}", path.display()))?;
    FONT_REGISTERED.store(true, Ordering::SeqCst);
    Ok(())
}

/// Render a legend into a fresh `.svg` (vector) or bitmap file (any other extension).
pub fn render_to_file<P: AsRef<Path>>(
    out_path: P,
    width: u32,
    height: u32,
    scale: &ColorScale,
    config: &LegendConfig,
) -> anyhow::Result<LegendSpec> {
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    let spec = if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_to_area(root, scale, config)?
    } else {
        if !FONT_REGISTERED.load(Ordering::SeqCst) {
            bail!(
                "bitmap output needs a font for tick labels; call register_font_file first \
                 (CLI: --font <file.ttf>)"
            );
        }
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_to_area(root, scale, config)?
    };
    info!(
        "wrote {} legend ({} swatches) to {}",
        spec.kind,
        spec.swatch_count(),
        out_path.display()
    );
    Ok(spec)
}

fn draw_to_area<DB>(
    mut root: DrawingArea<DB, Shift>,
    scale: &ColorScale,
    config: &LegendConfig,
) -> anyhow::Result<LegendSpec>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    let spec = render(&mut root, scale, config)?;
    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(spec)
}

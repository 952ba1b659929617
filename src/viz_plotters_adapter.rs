//! Adapter helpers to draw legend primitives with the plotters crate.
//!
//! Usage example:
//! ```ignore
//!     use plotters::prelude::*;
//!     use color_legend::viz::{self, LegendConfig};
//!
//!     let mut root = SVGBackend::new("legend.svg", (220, 50)).into_drawing_area();
//!     root.fill(&WHITE)?;
//!     // DrawingArea is a RenderTarget: render() appends the colorbar and axis groups.
//!     viz::render(&mut root, &scale, &LegendConfig::default())?;
//!     root.present()?;
//! ```

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::error::{LegendError, Result};
use crate::style::Rgba;
use crate::viz::types::{Group, Primitive};

pub fn rgba_color(c: Rgba) -> RGBAColor {
    RGBAColor(c.r, c.g, c.b, c.opacity())
}

/// Build a filled style for swatches.
pub fn fill_style(c: Rgba) -> ShapeStyle {
    rgba_color(c).filled()
}

/// Build a 1px outline style for lines and swatch separators.
pub fn stroke_style(c: Rgba) -> ShapeStyle {
    ShapeStyle {
        color: rgba_color(c),
        filled: false,
        stroke_width: 1,
    }
}

/// Labels are centered on their x and hang from their y.
fn text_style(font_px: u32, fill: Rgba) -> TextStyle<'static> {
    TextStyle {
        font: (FontFamily::SansSerif, font_px).into(),
        color: rgba_color(fill).to_backend_color(),
        pos: Pos::new(HPos::Center, VPos::Top),
    }
}

fn px(v: f64) -> i32 {
    v.round() as i32
}

fn draw_err<E: std::fmt::Debug>(e: E) -> LegendError {
    LegendError::Draw(format!("{e:?}"))
}

/// Draw every primitive of `group` onto `area`, offset by the group's translation.
pub fn draw_group<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, group: &Group) -> Result<()> {
    let (tx, ty) = group.translate;
    for prim in &group.children {
        match prim {
            Primitive::Rect {
                x,
                y,
                width,
                height,
                fill,
                stroke,
            } => {
                let corners = [
                    (px(tx + x), px(ty + y)),
                    (px(tx + x + width), px(ty + y + height)),
                ];
                area.draw(&Rectangle::new(corners, fill_style(*fill)))
                    .map_err(draw_err)?;
                if let Some(stroke) = stroke {
                    area.draw(&Rectangle::new(corners, stroke_style(*stroke)))
                        .map_err(draw_err)?;
                }
            }
            Primitive::Line {
                x1,
                y1,
                x2,
                y2,
                stroke,
            } => {
                area.draw(&PathElement::new(
                    vec![(px(tx + x1), px(ty + y1)), (px(tx + x2), px(ty + y2))],
                    stroke_style(*stroke),
                ))
                .map_err(draw_err)?;
            }
            Primitive::Text {
                x,
                y,
                text,
                font_px,
                fill,
            } => {
                area.draw(&Text::new(
                    text.as_str(),
                    (px(tx + x), px(ty + y)),
                    text_style(*font_px, *fill),
                ))
                .map_err(draw_err)?;
            }
        }
    }
    Ok(())
}

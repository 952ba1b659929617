//! color_legend
//!
//! Lay out and draw a color legend (a colorbar or a row of swatches plus an axis)
//! next to a data visualization. Pairs with the `color-legend` CLI.
//!
//! ### Features
//! - Binned (threshold / quantize / quantile), continuous, and nominal color scales
//! - Scale shape detection from a JSON descriptor, with explicit errors for unsupported shapes
//! - Pure layout (`viz::build_legend`) returning positioned rects, lines, and labels
//! - Render targets: in-memory `Scene`, any plotters drawing area, SVG/PNG files
//! - SI tick labels (`1.5k`, `500m`) with locale-aware decimal separators
//!
//! ### Example
//! ```no_run
//! use color_legend::scale::{BinnedScale, ColorScale};
//! use color_legend::style::Rgba;
//! use color_legend::viz::{self, LegendConfig, Scene};
//!
//! let colors = vec![Rgba::parse("#eff3ff")?, Rgba::parse("#6baed6")?, Rgba::parse("#08519c")?];
//! let scale: ColorScale = BinnedScale::threshold((0.0, 100.0), vec![25.0, 75.0], colors)?.into();
//!
//! let mut scene = Scene::new(220, 50);
//! let spec = viz::render(&mut scene, &scale, &LegendConfig::default())?;
//! assert_eq!(spec.swatch_count(), 3);
//! viz::render_to_file("legend.svg", 220, 50, &scale, &LegendConfig::default())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod error;
pub mod models;
pub mod scale;
pub mod storage;
pub mod style;
pub mod viz;
pub mod viz_plotters_adapter;

pub use error::LegendError;
pub use models::ScaleDescriptor;
pub use scale::{ColorScale, ScaleKind};
pub use viz::{LegendConfig, LegendSpec, RenderTarget, Scene, render};

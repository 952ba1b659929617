use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use color_legend::models::ScaleDescriptor;
use color_legend::scale::ColorScale;
use color_legend::storage;
use color_legend::viz::{self, LegendConfig, LegendSpec, Scene};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "color-legend",
    version,
    about = "Draw color legends (colorbars, binned swatches, category bands) as SVG, PNG, or JSON"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out a legend for a color scale (and optionally write SVG/PNG/JSON).
    Draw(DrawArgs),
}

#[derive(Args, Debug)]
struct DrawArgs {
    /// JSON scale descriptor: {"domain": [...], "range": [...], "thresholds"|"quantiles"|"interpolate": ...}
    #[arg(short, long)]
    scale: PathBuf,
    /// Write the drawn legend to this file (.svg, or .png with --font).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Write the legend layout (rects, axis, ticks) as JSON.
    #[arg(long)]
    spec_out: Option<PathBuf>,
    /// Print the legend layout as JSON to stdout.
    #[arg(long, default_value_t = false)]
    print: bool,
    /// JSON file with LegendConfig overrides.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Width of the legend surface (default 220).
    #[arg(long, default_value_t = 220)]
    width: u32,
    /// Height of the legend surface (default 50).
    #[arg(long, default_value_t = 50)]
    height: u32,
    /// Swatch width in pixels for continuous scales.
    #[arg(long)]
    step: Option<f64>,
    /// Fraction of the domain span to pad on both ends (e.g. 0.1).
    #[arg(long)]
    extend: Option<f64>,
    /// Round the axis domain outward to nice values.
    #[arg(long, default_value_t = false)]
    nice: bool,
    /// Locale for tick labels (en, de, fr, es, it, pt, nl).
    #[arg(long)]
    locale: Option<String>,
    /// TrueType font used for text in bitmap output.
    #[arg(long)]
    font: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Draw(args) => cmd_draw(args),
    }
}

fn build_config(args: &DrawArgs) -> Result<LegendConfig> {
    let mut config: LegendConfig = match &args.config {
        Some(path) => storage::load_json(path)?,
        None => LegendConfig::default(),
    };
    if let Some(step) = args.step {
        config.continuous_step_pixels = step;
    }
    if let Some(extend) = args.extend {
        config.domain_extend_fraction = extend;
    }
    if args.nice {
        config.nice = true;
    }
    if let Some(locale) = &args.locale {
        config.locale = locale.clone();
    }
    config.validate()?;
    Ok(config)
}

fn cmd_draw(args: DrawArgs) -> Result<()> {
    let descriptor: ScaleDescriptor = storage::load_json(&args.scale)?;
    let scale = ColorScale::detect(&descriptor)
        .with_context(|| format!("unusable scale in {}", args.scale.display()))?;
    let config = build_config(&args)?;

    if let Some(font) = args.font.as_ref() {
        viz::register_font_file(font)?;
    }

    let spec: LegendSpec = match args.out.as_ref() {
        Some(path) => {
            let spec = viz::render_to_file(path, args.width, args.height, &scale, &config)?;
            eprintln!("Wrote legend to {}", path.display());
            spec
        }
        None => {
            let mut scene = Scene::new(args.width, args.height);
            viz::render(&mut scene, &scale, &config)?
        }
    };

    if let Some(path) = args.spec_out.as_ref() {
        storage::save_json(&spec, path)?;
        eprintln!("Saved legend layout to {}", path.display());
    }

    if args.print {
        println!("{}", serde_json::to_string_pretty(&spec)?);
    }

    eprintln!(
        "{} legend: {} swatches, ticks [{}]",
        spec.kind,
        spec.swatch_count(),
        spec.ticks
            .iter()
            .map(|t| t.label.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(())
}

use std::path::PathBuf;

/// Choropleth and contour map renderer (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "choromap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Render feature records as a choropleth SVG
    Choropleth(ChoroplethArgs),

    /// Render iso-band contours of a numeric grid as SVG
    Contour(ContourArgs),
}

#[derive(clap::Args, Debug)]
pub struct ChoroplethArgs {
    /// Feature records (map_data.json), a path or an http(s) URL
    pub data: String,

    /// JSON options file; flags below override its values
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Output SVG file, defaults to "./map.svg"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Granularity level to render, e.g. tract or cbg
    #[arg(long)]
    pub geog: Option<String>,

    /// Fill for features without an estimate
    #[arg(long)]
    pub na_color: Option<String>,

    /// Apply a zoom of this scale before writing (may switch levels)
    #[arg(long)]
    pub zoom_level: Option<f64>,
}

#[derive(clap::Args, Debug)]
pub struct ContourArgs {
    /// Grid file: JSON array of rows
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub grid: String,

    /// JSON options file; flags below override its values
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Output SVG file, defaults to "./contour.svg"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Spacing between contour thresholds
    #[arg(long)]
    pub interval: Option<f64>,

    /// blues, greens, reds, or viridis
    #[arg(long)]
    pub color_choice: Option<String>,

    /// Pixels per grid cell
    #[arg(long)]
    pub pixel_resolution: Option<f64>,
}

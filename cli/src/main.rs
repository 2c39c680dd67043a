//! Forecast overlay map generator.
//!
//! Reads one GRIB2 forecast file, renders the configured fields into
//! transparent PNG overlays, and writes an interactive Leaflet map next to
//! them.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use forecast_map::config::RunConfig;
use forecast_map::pipeline;

#[derive(Parser, Debug)]
#[command(name = "forecast-map")]
#[command(about = "Render GRIB2 forecast fields onto an interactive map")]
struct Args {
    /// GRIB2 input file (overrides the config file's input)
    input: Option<PathBuf>,

    /// Run configuration file (YAML); defaults to the built-in field set
    #[arg(short, long, env = "FORECAST_MAP_CONFIG")]
    config: Option<PathBuf>,

    /// Output directory for images and the map document
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Initial map zoom level
    #[arg(long)]
    zoom: Option<u8>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(input) = args.input {
        config.input = input;
    }
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(zoom) = args.zoom {
        config.zoom = zoom;
    }
    config.validate()?;

    info!(
        input = %config.input.display(),
        fields = config.fields.len(),
        "starting forecast map run"
    );

    let map_path = pipeline::run(&config)?;
    info!(path = %map_path.display(), "map ready");

    Ok(())
}

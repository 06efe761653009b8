//! Snapshot tool for the weather field overlays.
//!
//! Renders the temperature overlay and a deterministic run of the wind
//! particle simulation to PNG files so the output can be inspected by eye.
//! Data comes from a JSON observation fixture or from the synthetic
//! generators; the simulation is driven frame by frame through the manual
//! scheduler instead of a real display loop.

mod mercator;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use field_model::{Observation, Viewport};
use field_overlay::{DataSource, ManualScheduler, OverlayConfig, ScalarOverlay, WindOverlay};
use field_render::png::encode_rgba;
use test_utils::{synthetic_stations, REGION};

use mercator::WebMercator;

#[derive(Parser, Debug)]
#[command(name = "snapshot")]
#[command(about = "Render weather field overlays to PNG snapshots")]
struct Args {
    /// Viewport width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 1000)]
    height: u32,

    /// Number of wind simulation frames to render
    #[arg(long, default_value_t = 120)]
    frames: usize,

    /// Write a PNG every Nth simulation frame
    #[arg(long, default_value_t = 30)]
    frame_stride: usize,

    /// Output directory
    #[arg(short, long, default_value = "snapshots")]
    out_dir: PathBuf,

    /// JSON observation fixture; synthetic stations are generated when
    /// omitted
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Number of synthetic stations when no fixture is given
    #[arg(long, default_value_t = 40)]
    stations: usize,

    /// Seed for particle spawns
    #[arg(long, default_value_t = 1)]
    seed: u64,

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
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let viewport = Viewport::new(args.width, args.height);
    let observations = load_observations(&args)?;
    info!(
        stations = observations.len(),
        width = viewport.width,
        height = viewport.height,
        "rendering snapshots"
    );

    let mut source = DataSource::new();
    source.set_observations(observations);
    let projection = WebMercator::fit(REGION, viewport);
    let config = OverlayConfig::from_env();
    config.validate().context("overlay configuration")?;

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    render_heatmaps(&args, viewport, &source, &projection, &config)?;
    render_wind_frames(&args, viewport, &source, &projection, &config)?;

    Ok(())
}

fn load_observations(args: &Args) -> Result<Vec<Observation>> {
    match &args.fixture {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading fixture {}", path.display()))?;
            let observations: Vec<Observation> =
                serde_json::from_str(&json).context("parsing fixture JSON")?;
            Ok(observations)
        }
        None => Ok(synthetic_stations(args.stations)),
    }
}

fn render_heatmaps(
    args: &Args,
    viewport: Viewport,
    source: &DataSource,
    projection: &WebMercator,
    config: &OverlayConfig,
) -> Result<()> {
    let overlays = [
        ("temperature.png", ScalarOverlay::temperature(viewport, config.clone())),
        ("wind_speed.png", ScalarOverlay::wind_speed(viewport, config.clone())),
    ];

    for (name, mut overlay) in overlays {
        overlay.set_visible(true, source, projection);
        let path = args.out_dir.join(name);
        write_png(&path, overlay.pixels(), viewport)?;
        info!(path = %path.display(), "wrote scalar overlay");
    }
    Ok(())
}

fn render_wind_frames(
    args: &Args,
    viewport: Viewport,
    source: &DataSource,
    projection: &WebMercator,
    config: &OverlayConfig,
) -> Result<()> {
    let mut overlay = WindOverlay::new(
        viewport,
        config.clone(),
        ManualScheduler::new(),
        Some(args.seed),
    );
    overlay.set_enabled(true, source, projection);

    let stride = args.frame_stride.max(1);
    for frame in 1..=args.frames {
        if overlay.scheduler_mut().pump() {
            overlay.on_frame();
        }
        if frame % stride == 0 || frame == args.frames {
            let path = args.out_dir.join(format!("wind_{:04}.png", frame));
            write_png(&path, &overlay.trail_rgba(), viewport)?;
            info!(path = %path.display(), frame, "wrote wind frame");
        }
    }
    Ok(())
}

fn write_png(path: &Path, pixels: &[u8], viewport: Viewport) -> Result<()> {
    let png = encode_rgba(pixels, viewport.width, viewport.height)
        .with_context(|| format!("encoding {}", path.display()))?;
    fs::write(path, png).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

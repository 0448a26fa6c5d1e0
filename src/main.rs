// src/main.rs
//
// Animate lattice slice output as a 3D surface video.
//
// Examples:
//
//   lattice-slices --input-dir data/coleman_128 --nbox 128 --name coleman
//       -> data/coleman_128/coleman.mp4 (or coleman_1.mp4, ... if taken)
//
//   lattice-slices --config runs/coleman.json --field 1 --overwrite
//       -> settings from JSON, flags on the command line win
//
//   lattice-slices --input-dir data --snapshot 0
//       -> single PNG of the first slice, no video
//
// Logging goes through env_logger; RUST_LOG=debug shows the ffmpeg call.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use lattice_slices::animate::{render_snapshot, render_video, SliceSet};
use lattice_slices::config::RenderConfig;

#[derive(Parser, Debug)]
#[command(name = "lattice-slices")]
#[command(about = "Render 2D lattice field slices as an animated 3D surface video", long_about = None)]
struct Cli {
    /// JSON file with render settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding slicetimes_0.dat and slices<field>_0.dat
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Directory for the video (defaults to the input directory)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Base name of the output video, without extension
    #[arg(long)]
    name: Option<String>,

    /// Replace an existing video instead of numbering a new one
    #[arg(long)]
    overwrite: bool,

    /// Field index (0 = phi, 1 = chi, ...)
    #[arg(long)]
    field: Option<usize>,

    /// Lattice points per side
    #[arg(long)]
    nbox: Option<usize>,

    /// Distance between lattice points on the plot axes
    #[arg(long)]
    grid_spacing: Option<f64>,

    /// Lower bound of the vertical axis
    #[arg(long, allow_hyphen_values = true)]
    low: Option<f64>,

    /// Upper bound of the vertical axis
    #[arg(long, allow_hyphen_values = true)]
    high: Option<f64>,

    /// Playback speed multiplier
    #[arg(long)]
    speed: Option<f64>,

    /// Camera azimuth in degrees
    #[arg(long, allow_hyphen_values = true)]
    azimuth: Option<f64>,

    /// Camera elevation in degrees
    #[arg(long, allow_hyphen_values = true)]
    elevation: Option<f64>,

    /// Frame width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Frame height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// ffmpeg executable
    #[arg(long)]
    ffmpeg: Option<String>,

    /// Keep the rendered PNG frames next to the video
    #[arg(long)]
    keep_frames: bool,

    /// Render only this slice index to a PNG
    #[arg(long)]
    snapshot: Option<usize>,
}

impl Cli {
    fn into_config(self) -> Result<(RenderConfig, Option<usize>)> {
        let mut cfg = match &self.config {
            Some(path) => RenderConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => RenderConfig::default(),
        };

        if let Some(v) = self.input_dir {
            cfg.input_dir = v;
        }
        if let Some(v) = self.output_dir {
            cfg.output_dir = Some(v);
        }
        if let Some(v) = self.name {
            cfg.output_name = v;
        }
        if self.overwrite {
            cfg.overwrite = true;
        }
        if let Some(v) = self.field {
            cfg.field = v;
        }
        if let Some(v) = self.nbox {
            cfg.nbox = v;
        }
        if let Some(v) = self.grid_spacing {
            cfg.grid_spacing = v;
        }
        if let Some(v) = self.low {
            cfg.low = v;
        }
        if let Some(v) = self.high {
            cfg.high = v;
        }
        if let Some(v) = self.speed {
            cfg.speed = v;
        }
        if let Some(v) = self.azimuth {
            cfg.camera.azimuth = v;
        }
        if let Some(v) = self.elevation {
            cfg.camera.elevation = v;
        }
        if let Some(v) = self.width {
            cfg.image.width = v;
        }
        if let Some(v) = self.height {
            cfg.image.height = v;
        }
        if let Some(v) = self.ffmpeg {
            cfg.ffmpeg = v;
        }
        if self.keep_frames {
            cfg.keep_frames = true;
        }

        Ok((cfg, self.snapshot))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (cfg, snapshot) = Cli::parse().into_config()?;
    cfg.validate()?;

    info!("--- lattice-slices config ---");
    info!("input:  {}", cfg.input_dir.display());
    info!("output: {}", cfg.output_dir().display());
    info!(
        "field={} nbox={} spacing={} z=[{}, {}] speed={}",
        cfg.field, cfg.nbox, cfg.grid_spacing, cfg.low, cfg.high, cfg.speed
    );

    let slices = SliceSet::load(&cfg)
        .with_context(|| format!("loading slices from {}", cfg.input_dir.display()))?;

    match snapshot {
        Some(index) => {
            render_snapshot(&cfg, &slices, index)?;
        }
        None => {
            render_video(&cfg, &slices)?;
        }
    }
    Ok(())
}

// src/visualisation.rs

use std::fmt::Display;
use std::path::Path;
use std::process::Command;

use log::{debug, info};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::colors::colormaps::{ColorMap, ViridisRGB};

use crate::config::RenderConfig;
use crate::error::{Result, SliceError};
use crate::frame::Frame;

/// Map `v` to viridis using the range [lo, hi].
///
/// A degenerate or non-finite range maps everything to the middle colour.
pub fn viridis(v: f64, lo: f64, hi: f64) -> RGBColor {
    let x = if lo.is_finite() && hi.is_finite() && (hi - lo).abs() > 1e-12 {
        ((v - lo) / (hi - lo)).clamp(0.0, 1.0)
    } else {
        0.5
    };
    let x = if x.is_nan() { 0.5 } else { x };

    ViridisRGB.get_color(x as f32)
}

/// Fixed plot settings shared by every frame of a video.
#[derive(Debug, Clone, Copy)]
pub struct PlotOptions {
    pub low: f64,
    pub high: f64,
    /// Degrees.
    pub azimuth: f64,
    /// Degrees.
    pub elevation: f64,
    pub width: u32,
    pub height: u32,
}

impl PlotOptions {
    pub fn from_config(cfg: &RenderConfig) -> Self {
        Self {
            low: cfg.low,
            high: cfg.high,
            azimuth: cfg.camera.azimuth,
            elevation: cfg.camera.elevation,
            width: cfg.image.width,
            height: cfg.image.height,
        }
    }
}

fn plot_err<E: Display>(e: E) -> SliceError {
    SliceError::Plot(e.to_string())
}

/// Draw one frame as a 3D surface onto `root`.
///
/// x runs along columns, depth along rows, and the vertical axis is fixed to
/// [low, high]. Patch colours are scaled to this frame's own min/max.
pub fn draw_surface<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    frame: &Frame,
    opts: &PlotOptions,
    caption: &str,
) -> Result<()> {
    let grid = frame.grid;
    let n = frame.nbox();
    if n < 2 {
        return Err(SliceError::Plot(format!(
            "need at least a 2x2 lattice to draw a surface, got nbox={}",
            n
        )));
    }

    root.fill(&WHITE).map_err(plot_err)?;

    let extent = grid.extent();
    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .caption(caption, ("sans-serif", 24))
        .build_cartesian_3d(0.0..extent, opts.low..opts.high, 0.0..extent)
        .map_err(plot_err)?;

    let yaw = opts.azimuth.to_radians();
    let pitch = opts.elevation.to_radians();
    chart.with_projection(|mut pb| {
        pb.yaw = yaw;
        pb.pitch = pitch;
        pb.scale = 0.8;
        pb.into_matrix()
    });

    let two_decimals = |v: &f64| format!("{:.2}", v);
    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.15))
        .max_light_lines(3)
        .y_formatter(&two_decimals)
        .draw()
        .map_err(plot_err)?;

    let (c_lo, c_hi) = frame.min_max().unwrap_or((opts.low, opts.high));

    // Surface callbacks get coordinates back, so recover the site index.
    let step = extent / (n - 1) as f64;
    let site = move |c: f64| ((c / step).round() as usize).min(n - 1);

    let colour = |v: &f64| viridis(*v, c_lo, c_hi).filled();
    chart
        .draw_series(
            SurfaceSeries::xoz(
                (0..n).map(|i| grid.coord(i)),
                (0..n).map(|i| grid.coord(i)),
                |x: f64, z: f64| frame.value(site(z), site(x)),
            )
            .style_func(&colour),
        )
        .map_err(plot_err)?;

    // Thin mesh lines over the patches.
    let edge = BLACK.mix(0.25);
    for (row, values) in frame.rows().enumerate() {
        let z = grid.coord(row);
        chart
            .draw_series(LineSeries::new(
                values.iter().enumerate().map(|(col, &v)| (grid.coord(col), v, z)),
                edge,
            ))
            .map_err(plot_err)?;
    }
    for col in 0..n {
        let x = grid.coord(col);
        chart
            .draw_series(LineSeries::new(
                (0..n).map(|row| (x, frame.value(row, col), grid.coord(row))),
                edge,
            ))
            .map_err(plot_err)?;
    }

    root.present().map_err(plot_err)?;
    Ok(())
}

/// Save one frame as a PNG.
pub fn save_surface_png(
    frame: &Frame,
    opts: &PlotOptions,
    caption: &str,
    filename: &Path,
) -> Result<()> {
    let root = BitMapBackend::new(filename, (opts.width, opts.height)).into_drawing_area();
    draw_surface(&root, frame, opts, caption)
}

/// Name of the `index`-th rendered frame; matches `FRAME_PATTERN`.
pub fn frame_file_name(index: usize) -> String {
    format!("frame_{:06}.png", index)
}

/// ffmpeg image-sequence pattern for `frame_file_name`.
pub const FRAME_PATTERN: &str = "frame_%06d.png";

/// Render every frame into `dir` as numbered PNGs.
pub fn render_frames(
    frames: &[Frame],
    times: &[f64],
    field: usize,
    opts: &PlotOptions,
    dir: &Path,
) -> Result<usize> {
    let total = frames.len();
    let report_every = (total / 10).max(1);

    for (i, frame) in frames.iter().enumerate() {
        let t = times.get(i).copied().unwrap_or(f64::NAN);
        let caption = format!("field {}   t = {:.4}", field, t);
        let path = dir.join(frame_file_name(i));
        save_surface_png(frame, opts, &caption, &path)?;

        if (i + 1) % report_every == 0 || i + 1 == total {
            info!("rendered frame {}/{}", i + 1, total);
        }
    }
    Ok(total)
}

/// Use `ffmpeg` to stitch `dir/frame_%06d.png` into an MP4 movie.
pub fn make_movie_with_ffmpeg(ffmpeg: &str, dir: &Path, fps: u32, output: &Path) -> Result<()> {
    let pattern = dir.join(FRAME_PATTERN);
    let fps_str = fps.to_string();
    debug!(
        "{} -framerate {} -i {} -> {}",
        ffmpeg,
        fps,
        pattern.display(),
        output.display()
    );

    let out = Command::new(ffmpeg)
        .arg("-hide_banner")
        .args(["-loglevel", "error"])
        .arg("-y")
        .args(["-framerate", fps_str.as_str()])
        .arg("-i")
        .arg(&pattern)
        // yuv420p needs even dimensions
        .args(["-vf", "pad=ceil(iw/2)*2:ceil(ih/2)*2"])
        .args(["-pix_fmt", "yuv420p"])
        .arg(output)
        .output()
        .map_err(|e| SliceError::Encoder(format!("could not run {:?}: {}", ffmpeg, e)))?;

    if !out.status.success() {
        let stderr = String::from_utf8_lossy(&out.stderr);
        return Err(SliceError::Encoder(format!(
            "{} exited with {}: {}",
            ffmpeg,
            out.status,
            stderr.trim()
        )));
    }
    Ok(())
}

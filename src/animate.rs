// src/animate.rs
//
// Load -> reshape -> render -> encode, one field at a time.

use std::fs::{create_dir_all, read_dir, remove_file};
use std::path::{Path, PathBuf};

use log::info;
use tempfile::TempDir;

use crate::config::{RenderConfig, RunRecord};
use crate::error::{Result, SliceError};
use crate::frame::{reshape_frames, Frame};
use crate::output::{resolve_output_path, sidecar_path};
use crate::slices::{read_slice_data, read_slice_times};
use crate::timing::{frame_interval_ms, frame_rate};
use crate::visualisation::{make_movie_with_ffmpeg, render_frames, save_surface_png, PlotOptions};

/// Slice times and the matching frames of one field.
#[derive(Debug, Clone)]
pub struct SliceSet {
    pub times: Vec<f64>,
    pub frames: Vec<Frame>,
}

impl SliceSet {
    /// Read both slice files from `cfg.input_dir` and reshape the samples.
    pub fn load(cfg: &RenderConfig) -> Result<Self> {
        let times = read_slice_times(&cfg.input_dir)?;
        let data = read_slice_data(&cfg.input_dir, cfg.field)?;
        let frames = reshape_frames(&data, cfg.grid(), times.len())?;
        info!(
            "field {}: {} frames of {}x{}",
            cfg.field,
            frames.len(),
            cfg.nbox,
            cfg.nbox
        );
        Ok(Self { times, frames })
    }

    pub fn num_times(&self) -> usize {
        self.times.len()
    }

    pub fn last_time(&self) -> f64 {
        self.times.last().copied().unwrap_or(0.0)
    }
}

/// Where the PNG frames live while the video is encoded.
enum FrameDir {
    Temp(TempDir),
    Kept(PathBuf),
}

impl FrameDir {
    fn create(cfg: &RenderConfig, video: &Path) -> Result<Self> {
        let out_dir = cfg.output_dir();
        if cfg.keep_frames {
            let stem = video
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| cfg.output_name.clone());
            let dir = out_dir.join(format!("{}_frames", stem));
            create_dir_all(&dir).map_err(|e| SliceError::io(&dir, e))?;
            clear_frames(&dir)?;
            Ok(FrameDir::Kept(dir))
        } else {
            let tmp = tempfile::Builder::new()
                .prefix(".frames-")
                .tempdir_in(out_dir)
                .map_err(|e| SliceError::io(out_dir, e))?;
            Ok(FrameDir::Temp(tmp))
        }
    }

    fn path(&self) -> &Path {
        match self {
            FrameDir::Temp(t) => t.path(),
            FrameDir::Kept(p) => p,
        }
    }
}

/// Remove `frame_*.png` left by an earlier run, so ffmpeg only sees this
/// run's frames. Other files are left alone.
fn clear_frames(dir: &Path) -> Result<()> {
    let entries = read_dir(dir).map_err(|e| SliceError::io(dir, e))?;
    let mut removed = 0usize;
    for entry in entries {
        let path = entry.map_err(|e| SliceError::io(dir, e))?.path();
        let is_frame = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("frame_") && n.ends_with(".png"));
        if is_frame && path.is_file() {
            remove_file(&path).map_err(|e| SliceError::io(&path, e))?;
            removed += 1;
        }
    }
    if removed > 0 {
        info!("removed {} old frames from {}", removed, dir.display());
    }
    Ok(())
}

/// Render `slices` to a video as configured; returns the video path.
pub fn render_video(cfg: &RenderConfig, slices: &SliceSet) -> Result<PathBuf> {
    let num_times = slices.num_times();
    let last_time = slices.last_time();
    let fps = frame_rate(cfg.speed, num_times, last_time)?;
    let interval = frame_interval_ms(cfg.speed, num_times, last_time)?;
    info!(
        "{} frames up to t = {}: {} fps, {:.3} ms per frame",
        num_times, last_time, fps, interval
    );

    let out_dir = cfg.output_dir();
    create_dir_all(out_dir).map_err(|e| SliceError::io(out_dir, e))?;
    let video = resolve_output_path(out_dir, &cfg.output_name, cfg.overwrite);

    let frame_dir = FrameDir::create(cfg, &video)?;
    let opts = PlotOptions::from_config(cfg);

    println!("Saving to file \"{}\" ...", video.display());
    render_frames(&slices.frames, &slices.times, cfg.field, &opts, frame_dir.path())?;
    make_movie_with_ffmpeg(&cfg.ffmpeg, frame_dir.path(), fps, &video)?;

    if let FrameDir::Kept(dir) = &frame_dir {
        info!("frames kept in {}", dir.display());
    }

    let record = RunRecord {
        config: cfg,
        video: video.clone(),
        num_frames: num_times,
        fps,
        frame_interval_ms: interval,
        t_first: slices.times.first().copied().unwrap_or(0.0),
        t_last: last_time,
    };
    record.write_to(&sidecar_path(&video))?;

    println!("Done.");
    Ok(video)
}

/// Path of a single-frame snapshot, `<output_dir>/<name>_frame<index>.png`.
pub fn snapshot_path(cfg: &RenderConfig, index: usize) -> PathBuf {
    cfg.output_dir()
        .join(format!("{}_frame{}.png", cfg.output_name, index))
}

/// Render frame `index` alone to a PNG; returns its path.
pub fn render_snapshot(cfg: &RenderConfig, slices: &SliceSet, index: usize) -> Result<PathBuf> {
    let frame = slices.frames.get(index).ok_or(SliceError::FrameIndex {
        index,
        count: slices.frames.len(),
    })?;

    let out_dir = cfg.output_dir();
    create_dir_all(out_dir).map_err(|e| SliceError::io(out_dir, e))?;
    let path = snapshot_path(cfg, index);

    let caption = format!("field {}   t = {:.4}", cfg.field, slices.times[index]);
    save_surface_png(frame, &PlotOptions::from_config(cfg), &caption, &path)?;
    info!("saved snapshot to {}", path.display());
    Ok(path)
}

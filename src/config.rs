// src/config.rs

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::error::{Result, SliceError};
use crate::grid::LatticeGrid;

/// Everything needed to turn one field's slices into a video.
///
/// Missing keys in a JSON config file take the values from `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Directory holding `slicetimes_0.dat` and `slices<field>_0.dat`.
    pub input_dir: PathBuf,
    /// Where the video goes. Falls back to `input_dir`.
    pub output_dir: Option<PathBuf>,
    pub output_name: String,
    /// Replace `<name>.mp4` instead of picking `<name>_N.mp4`.
    pub overwrite: bool,
    /// Field index, e.g. 0 for phi, 1 for chi.
    pub field: usize,
    pub nbox: usize,
    pub grid_spacing: f64,
    /// Vertical axis range.
    pub low: f64,
    pub high: f64,
    /// Playback speed multiplier.
    pub speed: f64,
    pub camera: CameraConfig,
    pub image: ImageConfig,
    /// ffmpeg executable (name on PATH or full path).
    pub ffmpeg: String,
    /// Keep the rendered PNG frames next to the video.
    pub keep_frames: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Degrees.
    pub azimuth: f64,
    /// Degrees.
    pub elevation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: None,
            output_name: "slices".to_string(),
            overwrite: false,
            field: 0,
            nbox: 128,
            grid_spacing: 1.0,
            low: -1.0,
            high: 1.5,
            speed: 10.0,
            camera: CameraConfig::default(),
            image: ImageConfig::default(),
            ffmpeg: "ffmpeg".to_string(),
            keep_frames: false,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            azimuth: -39.0,
            elevation: 68.0,
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

impl RenderConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| SliceError::io(path, e))?;
        let cfg = serde_json::from_reader(BufReader::new(file))?;
        Ok(cfg)
    }

    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(&self.input_dir)
    }

    pub fn grid(&self) -> LatticeGrid {
        LatticeGrid::new(self.nbox, self.grid_spacing)
    }

    /// Reject settings that cannot produce a sensible plot.
    pub fn validate(&self) -> Result<()> {
        let bad = |msg: String| Err(SliceError::Config(msg));

        if self.output_name.trim().is_empty() {
            return bad("output_name must not be empty".into());
        }
        if self.output_name.contains(['/', '\\']) {
            return bad(format!(
                "output_name must be a bare file name, got {:?}",
                self.output_name
            ));
        }
        if self.nbox < 2 {
            return bad(format!("nbox must be at least 2, got {}", self.nbox));
        }
        if !(self.grid_spacing.is_finite() && self.grid_spacing > 0.0) {
            return bad(format!(
                "grid_spacing must be positive, got {}",
                self.grid_spacing
            ));
        }
        if !(self.low.is_finite() && self.high.is_finite() && self.low < self.high) {
            return bad(format!(
                "need low < high, got low={} high={}",
                self.low, self.high
            ));
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return bad(format!("speed must be positive, got {}", self.speed));
        }
        if !(self.camera.azimuth.is_finite() && self.camera.elevation.is_finite()) {
            return bad("camera angles must be finite".into());
        }
        if self.image.width == 0 || self.image.height == 0 {
            return bad(format!(
                "image size must be non-zero, got {}x{}",
                self.image.width, self.image.height
            ));
        }
        if self.ffmpeg.trim().is_empty() {
            return bad("ffmpeg command must not be empty".into());
        }
        Ok(())
    }
}

/// Provenance written next to each video.
#[derive(Debug, Serialize)]
pub struct RunRecord<'a> {
    pub config: &'a RenderConfig,
    pub video: PathBuf,
    pub num_frames: usize,
    pub fps: u32,
    pub frame_interval_ms: f64,
    pub t_first: f64,
    pub t_last: f64,
}

impl RunRecord<'_> {
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| SliceError::io(path, e))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = RenderConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.output_dir(), Path::new("."));
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let cfg: RenderConfig = serde_json::from_str(
            r#"{ "nbox": 64, "output_name": "coleman", "camera": { "elevation": 30.0 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.nbox, 64);
        assert_eq!(cfg.output_name, "coleman");
        assert_eq!(cfg.camera.elevation, 30.0);
        assert_eq!(cfg.camera.azimuth, -39.0);
        assert_eq!(cfg.speed, 10.0);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let cases: [fn(&mut RenderConfig); 8] = [
            |c| c.nbox = 1,
            |c| {
                c.low = 2.0;
                c.high = 2.0;
            },
            |c| c.speed = 0.0,
            |c| c.speed = f64::NAN,
            |c| c.grid_spacing = -1.0,
            |c| c.image.width = 0,
            |c| c.output_name = "  ".into(),
            |c| c.output_name = "a/b".into(),
        ];
        for (i, mutate) in cases.iter().enumerate() {
            let mut cfg = RenderConfig::default();
            mutate(&mut cfg);
            assert!(
                matches!(cfg.validate(), Err(SliceError::Config(_))),
                "case {} should fail validation",
                i
            );
        }
    }

    #[test]
    fn explicit_output_dir_wins() {
        let cfg = RenderConfig {
            input_dir: "data".into(),
            output_dir: Some("videos".into()),
            ..RenderConfig::default()
        };
        assert_eq!(cfg.output_dir(), Path::new("videos"));
    }
}

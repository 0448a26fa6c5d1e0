// src/timing.rs
//
// Playback timing for the animation. One video frame per slice; `speed`
// compresses simulated time so that the video runs `speed` times faster
// than one second of video per unit of simulation time.

use crate::error::{Result, SliceError};

fn check(speed: f64, num_times: usize, last_time: f64) -> Result<()> {
    if num_times == 0 {
        return Err(SliceError::Config("no frames to animate".to_string()));
    }
    if !(speed.is_finite() && speed > 0.0) {
        return Err(SliceError::Config(format!(
            "speed must be positive, got {}",
            speed
        )));
    }
    if !(last_time.is_finite() && last_time > 0.0) {
        return Err(SliceError::Config(format!(
            "last slice time must be positive, got {}",
            last_time
        )));
    }
    Ok(())
}

/// Video frame rate: `ceil(speed * num_times / last_time)`, at least 1.
pub fn frame_rate(speed: f64, num_times: usize, last_time: f64) -> Result<u32> {
    check(speed, num_times, last_time)?;
    let fps = (speed * num_times as f64 / last_time).ceil();
    if fps > u32::MAX as f64 {
        return Err(SliceError::Config(format!("frame rate {} is too large", fps)));
    }
    Ok((fps as u32).max(1))
}

/// Wall-clock interval between frames in milliseconds:
/// the mean simulated spacing divided by `speed`.
pub fn frame_interval_ms(speed: f64, num_times: usize, last_time: f64) -> Result<f64> {
    check(speed, num_times, last_time)?;
    Ok(1000.0 * (last_time / num_times as f64) / speed)
}

// src/output.rs

use std::path::{Path, PathBuf};

use log::info;

pub const VIDEO_EXT: &str = "mp4";

/// Pick the video path for `name` inside `dir`.
///
/// With `overwrite` the plain `<name>.mp4` is always returned. Otherwise the
/// first of `<name>.mp4`, `<name>_1.mp4`, `<name>_2.mp4`, ... that does not
/// exist yet is used. Not atomic: another writer can still race us.
pub fn resolve_output_path(dir: &Path, name: &str, overwrite: bool) -> PathBuf {
    let first = dir.join(format!("{}.{}", name, VIDEO_EXT));
    if overwrite || !first.exists() {
        return first;
    }
    info!("found \"{}\"", first.display());

    let mut run: usize = 1;
    loop {
        let cand = dir.join(format!("{}_{}.{}", name, run, VIDEO_EXT));
        if !cand.exists() {
            return cand;
        }
        info!("found \"{}\"", cand.display());
        run += 1;
    }
}

/// Sidecar path next to the video, `<video stem>.json`.
pub fn sidecar_path(video: &Path) -> PathBuf {
    video.with_extension("json")
}

// src/frame.rs

use crate::error::{Result, SliceError};
use crate::grid::LatticeGrid;

/// Field values on a square lattice for one timestep.
/// Values are stored row-major: `data[row * nbox + col]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub grid: LatticeGrid,
    pub data: Vec<f64>,
}

impl Frame {
    /// Wrap an `nbox²` slice of samples as a frame.
    pub fn from_slice(grid: LatticeGrid, values: &[f64]) -> Self {
        debug_assert_eq!(values.len(), grid.n_sites());
        Self {
            grid,
            data: values.to_vec(),
        }
    }

    #[inline]
    pub fn nbox(&self) -> usize {
        self.grid.nbox
    }

    /// Field value at (row, col).
    #[inline]
    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.data[self.grid.idx(row, col)]
    }

    /// Iterate over the rows of the frame, each `nbox` values long.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.grid.nbox.max(1))
    }

    /// Nested copy of the frame: `rows[row][col]`.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(|r| r.to_vec()).collect()
    }

    /// Smallest and largest finite value, or `None` if there are none.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &v in &self.data {
            if v.is_finite() {
                lo = lo.min(v);
                hi = hi.max(v);
            }
        }
        if lo.is_finite() {
            Some((lo, hi))
        } else {
            None
        }
    }
}

/// Split a flat sample buffer into `num_times` frames of `nbox × nbox`.
///
/// Frame `i`, row `j` starts at `i * nbox² + j * nbox`. The buffer must hold
/// exactly `num_times * nbox²` values.
pub fn reshape_frames(
    buffer: &[f64],
    grid: LatticeGrid,
    num_times: usize,
) -> Result<Vec<Frame>> {
    if grid.nbox == 0 {
        return Err(SliceError::Config("nbox must be positive".to_string()));
    }

    let per_frame = grid.n_sites();
    let expected = num_times * per_frame;
    if buffer.len() != expected {
        return Err(SliceError::SizeMismatch {
            expected,
            found: buffer.len(),
        });
    }

    Ok(buffer
        .chunks_exact(per_frame)
        .map(|block| Frame::from_slice(grid, block))
        .collect())
}

/// Concatenate frames back into a flat, time-major buffer.
pub fn flatten_frames(frames: &[Frame]) -> Vec<f64> {
    let total = frames.iter().map(|f| f.data.len()).sum();
    let mut out = Vec::with_capacity(total);
    for f in frames {
        out.extend_from_slice(&f.data);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_by_two_buffer_splits_into_two_frames() {
        let buf = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let frames = reshape_frames(&buf, LatticeGrid::new(2, 1.0), 2).unwrap();

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].to_rows(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(frames[1].to_rows(), vec![vec![5.0, 6.0], vec![7.0, 8.0]]);
        assert_eq!(frames[1].value(1, 0), 7.0);
    }

    #[test]
    fn short_buffer_is_a_size_mismatch() {
        let buf = [0.0; 7];
        let err = reshape_frames(&buf, LatticeGrid::new(2, 1.0), 2).unwrap_err();
        match err {
            SliceError::SizeMismatch { expected, found } => {
                assert_eq!(expected, 8);
                assert_eq!(found, 7);
            }
            other => panic!("expected SizeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn zero_nbox_is_rejected() {
        assert!(reshape_frames(&[], LatticeGrid::new(0, 1.0), 3).is_err());
    }

    #[test]
    fn min_max_skips_non_finite_values() {
        let f = Frame::from_slice(LatticeGrid::new(2, 1.0), &[f64::NAN, -2.0, 3.5, 0.0]);
        assert_eq!(f.min_max(), Some((-2.0, 3.5)));

        let all_nan = Frame::from_slice(LatticeGrid::new(1, 1.0), &[f64::NAN]);
        assert_eq!(all_nan.min_max(), None);
    }
}

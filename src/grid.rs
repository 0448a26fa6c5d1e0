// src/grid.rs

/// Square 2D lattice: `nbox` sites per side, spacing `dx` between sites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeGrid {
    pub nbox: usize,
    pub dx: f64,
}

impl LatticeGrid {
    /// Create a new nbox × nbox lattice with site spacing dx.
    pub fn new(nbox: usize, dx: f64) -> Self {
        Self { nbox, dx }
    }

    /// Total number of lattice sites.
    pub fn n_sites(&self) -> usize {
        self.nbox * self.nbox
    }

    /// Row-major flat index of site (row, col).
    #[inline]
    pub fn idx(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.nbox && col < self.nbox);
        row * self.nbox + col
    }

    /// Physical side length of the plotted lattice.
    pub fn extent(&self) -> f64 {
        self.nbox as f64 * self.dx
    }

    /// Physical coordinate of site index `i` along either axis.
    ///
    /// The `nbox` sites are spread evenly over `[0, extent]`, so both
    /// end points are included.
    pub fn coord(&self, i: usize) -> f64 {
        if self.nbox < 2 {
            return 0.0;
        }
        i as f64 * self.extent() / (self.nbox - 1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_indexing_is_row_major() {
        let g = LatticeGrid::new(4, 1.0);
        assert_eq!(g.idx(0, 0), 0);
        assert_eq!(g.idx(0, 1), 1);
        assert_eq!(g.idx(1, 0), 4);
        assert_eq!(g.idx(3, 2), 14); // (row=3)*4 + col=2
        assert_eq!(g.n_sites(), 16);
    }

    #[test]
    fn coords_span_the_full_extent() {
        let g = LatticeGrid::new(5, 0.5);
        assert_eq!(g.coord(0), 0.0);
        assert!((g.coord(4) - 2.5).abs() < 1e-12);
        assert!((g.coord(2) - 1.25).abs() < 1e-12);
    }
}

//! Samplers for the stock scenario potentials.
//!
//! Potentials are plain real-valued arrays over a grid; anything not covered
//! here can be built directly with [`Grid1::sample`][crate::grid::Grid1] or
//! [`Grid2::sample`][crate::grid::Grid2].

use ndarray as nd;
use crate::grid::{ Grid1, Grid2 };

/// Zero potential. Combined with Dirichlet boundaries this is a particle in
/// a box.
pub fn free(grid: &Grid1) -> nd::Array1<f64> {
    nd::Array1::zeros(grid.len())
}

/// Zero potential over a two-dimensional grid.
pub fn free_2d(grid: &Grid2) -> nd::Array2<f64> {
    nd::Array2::zeros(grid.shape())
}

/// Harmonic potential `k x² / 2` centered on the origin.
pub fn harmonic(grid: &Grid1, k: f64) -> nd::Array1<f64> {
    grid.sample(|x| 0.5 * k * x.powi(2))
}

/// Softened point-charge potential `charge / (r + softening)`.
///
/// Negative `charge` gives an attractive well; `softening` caps the
/// magnitude at the origin, where the bare potential diverges.
pub fn coulomb_2d(grid: &Grid2, charge: f64, softening: f64)
    -> nd::Array2<f64>
{
    grid.sample(|x, y| charge / (x.hypot(y) + softening))
}

/// Geometry of a finite barrier band pierced by two slits, mirrored about
/// x = 0.
///
/// The band spans `y0 < y < y1` and blocks all x except the two openings
/// `inner < |x| < outer`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DoubleSlit {
    /// Lower y-bound of the barrier band.
    pub y0: f64,
    /// Upper y-bound of the barrier band.
    pub y1: f64,
    /// Inner |x| edge of each slit.
    pub inner: f64,
    /// Outer |x| edge of each slit.
    pub outer: f64,
    /// Barrier height.
    pub height: f64,
}

impl DoubleSlit {
    fn blocked(&self, x: f64, y: f64) -> bool {
        y > self.y0 && y < self.y1
            && !(x.abs() > self.inner && x.abs() < self.outer)
    }

    /// Sample the barrier potential over a grid.
    pub fn potential(&self, grid: &Grid2) -> nd::Array2<f64> {
        grid.sample(|x, y| if self.blocked(x, y) { self.height } else { 0.0 })
    }

    /// Sample the barrier occupancy mask over a grid, e.g. for painting the
    /// barrier over rendered frames.
    pub fn mask(&self, grid: &Grid2) -> nd::Array2<bool> {
        grid.sample(|x, y| self.blocked(x, y))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use super::*;

    #[test]
    fn harmonic_values() {
        let grid = Grid1::linspace(-2.0, 2.0, 5).unwrap();
        let v = harmonic(&grid, 5.0);
        assert_abs_diff_eq!(v[0], 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v[2], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v[3], 2.5, epsilon = 1e-12);
    }

    #[test]
    fn coulomb_softening_caps_origin() {
        let grid = Grid2::linspace((-1.0, 1.0, 21), (-1.0, 1.0, 21)).unwrap();
        let v = coulomb_2d(&grid, -5.0, 0.001);
        assert_abs_diff_eq!(v[[10, 10]], -5000.0, epsilon = 1e-6);
        assert!(v.iter().all(|&vk| vk < 0.0));
    }

    #[test]
    fn double_slit_openings() {
        const L: f64 = 2.0;
        let slit = DoubleSlit {
            y0: -0.1 * L,
            y1: 0.1 * L,
            inner: 0.05 * L,
            outer: 0.2 * L,
            height: 100.0,
        };
        // center post and outer walls are blocked, slits are open
        assert!(slit.blocked(0.0, 0.0));
        assert!(slit.blocked(0.5, 0.0));
        assert!(slit.blocked(-0.5, 0.0));
        assert!(!slit.blocked(0.3, 0.0));
        assert!(!slit.blocked(-0.3, 0.0));
        // outside the band nothing is blocked
        assert!(!slit.blocked(0.0, 0.5));
        assert!(!slit.blocked(0.5, -0.5));
    }

    #[test]
    fn double_slit_mask_matches_potential() {
        let grid = Grid2::linspace((-2.0, 2.0, 41), (-2.0, 2.0, 41)).unwrap();
        let slit = DoubleSlit {
            y0: -0.2, y1: 0.2, inner: 0.1, outer: 0.4, height: 100.0,
        };
        let v = slit.potential(&grid);
        let mask = slit.mask(&grid);
        for (vk, mk) in v.iter().zip(&mask) {
            assert_eq!(*vk > 0.0, *mk);
        }
        assert!(mask.iter().any(|&mk| mk));
        assert!(mask.iter().any(|&mk| !mk));
    }
}

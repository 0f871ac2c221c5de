//! Finite-difference Laplacian stencils for complex-valued fields.
//!
//! Edge samples are left at zero: boundary behavior is owned by
//! [`evolve::Boundary`][crate::evolve::Boundary], which is applied after
//! every propagation step.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{ Arr1, Arr2 };

/// Three-point second difference, `(q[i+1] - 2 q[i] + q[i-1]) / δx²`, over
/// interior points.
pub fn laplacian_1d<S>(q: &Arr1<S>, dx: f64) -> nd::Array1<C64>
where S: nd::Data<Elem = C64>
{
    let n = q.len();
    let mut out: nd::Array1<C64> = nd::Array1::zeros(n);
    let w = dx.powi(2).recip();
    for i in 1..n.saturating_sub(1) {
        out[i] = (q[i + 1] - 2.0 * q[i] + q[i - 1]) * w;
    }
    out
}

/// Five-point Laplacian: the x-stencil applied on interior rows plus the
/// y-stencil applied on interior columns.
pub fn laplacian_2d<S>(q: &Arr2<S>, dx: f64, dy: f64) -> nd::Array2<C64>
where S: nd::Data<Elem = C64>
{
    let (nx, ny) = q.dim();
    let mut out: nd::Array2<C64> = nd::Array2::zeros((nx, ny));
    let wx = dx.powi(2).recip();
    let wy = dy.powi(2).recip();
    for i in 1..nx.saturating_sub(1) {
        for j in 0..ny {
            out[[i, j]]
                = (q[[i + 1, j]] - 2.0 * q[[i, j]] + q[[i - 1, j]]) * wx;
        }
    }
    for j in 1..ny.saturating_sub(1) {
        for i in 0..nx {
            out[[i, j]]
                += (q[[i, j + 1]] - 2.0 * q[[i, j]] + q[[i, j - 1]]) * wy;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;
    use approx::assert_abs_diff_eq;
    use super::*;
    use crate::grid::{ Grid1, Grid2 };

    #[test]
    fn laplacian_1d_of_sine() {
        let grid = Grid1::linspace(0.0, 1.0, 1001).unwrap();
        let q: nd::Array1<C64> = grid.sample(|x| C64::from((PI * x).sin()));
        let lap = laplacian_1d(&q, grid.dx());
        for &i in [250_usize, 500, 750].iter() {
            let expected = -PI.powi(2) * (PI * grid.x()[i]).sin();
            assert_abs_diff_eq!(lap[i].re, expected, epsilon = 1e-4);
            assert_abs_diff_eq!(lap[i].im, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn laplacian_1d_zero_at_edges() {
        let grid = Grid1::linspace(0.0, 1.0, 50).unwrap();
        let q: nd::Array1<C64> = grid.sample(|x| C64::from(x * x));
        let lap = laplacian_1d(&q, grid.dx());
        assert_eq!(lap[0], C64::from(0.0));
        assert_eq!(lap[49], C64::from(0.0));
    }

    #[test]
    fn laplacian_2d_of_product_sine() {
        let grid = Grid2::linspace((0.0, 1.0, 101), (0.0, 1.0, 101)).unwrap();
        let q: nd::Array2<C64>
            = grid.sample(|x, y| C64::from((PI * x).sin() * (PI * y).sin()));
        let lap = laplacian_2d(&q, grid.dx(), grid.dy());
        let (i, j) = (50, 50);
        let expected
            = -2.0 * PI.powi(2)
            * (PI * grid.x()[i]).sin() * (PI * grid.y()[j]).sin();
        assert_abs_diff_eq!(lap[[i, j]].re, expected, epsilon = 5e-3);
    }

    #[test]
    fn laplacian_2d_corner_untouched() {
        let grid = Grid2::linspace((0.0, 1.0, 20), (0.0, 1.0, 20)).unwrap();
        let q: nd::Array2<C64> = grid.sample(|x, y| C64::from(x + y));
        let lap = laplacian_2d(&q, grid.dx(), grid.dy());
        assert_eq!(lap[[0, 0]], C64::from(0.0));
        assert_eq!(lap[[19, 19]], C64::from(0.0));
    }
}

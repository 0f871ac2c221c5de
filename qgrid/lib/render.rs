//! Projection of complex states into drawable form: scalar render modes,
//! viewport extents, and a viridis colorizer producing RGB frames.

use ndarray as nd;
use num_complex::Complex64 as C64;
use serde::{ Deserialize, Serialize };
use crate::{
    Arr1,
    Arr2,
    grid::{ Grid1, Grid2 },
};

/// Scalar projection of the wavefunction selected for display.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// |ψ|²
    #[default]
    SquareModulus,
    /// Re(ψ)
    RealPart,
    /// Im(ψ)
    ImaginaryPart,
}

impl RenderMode {
    /// Project a single sample.
    pub fn apply(self, qk: C64) -> f64 {
        match self {
            Self::SquareModulus => qk.norm_sqr(),
            Self::RealPart => qk.re,
            Self::ImaginaryPart => qk.im,
        }
    }

    /// Project a one-dimensional state into a plottable curve.
    pub fn curve_1d<S>(self, q: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = C64>
    {
        q.mapv(|qk| self.apply(qk))
    }

    /// Project a two-dimensional state into a scalar field.
    pub fn field_2d<S>(self, q: &Arr2<S>) -> nd::Array2<f64>
    where S: nd::Data<Elem = C64>
    {
        q.mapv(|qk| self.apply(qk))
    }
}

/// Rectangular viewport in simulation coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Extent {
    pub xlo: f64,
    pub xhi: f64,
    pub ylo: f64,
    pub yhi: f64,
}

impl Extent {
    /// Viewport spanning a 1D grid horizontally with explicit vertical
    /// bounds.
    pub fn of_grid1(grid: &Grid1, ylo: f64, yhi: f64) -> Self {
        let (xlo, xhi) = grid.bounds();
        Self { xlo, xhi, ylo, yhi }
    }

    /// Viewport covering a 2D grid.
    pub fn of_grid2(grid: &Grid2) -> Self {
        let (xlo, xhi) = grid.xbounds();
        let (ylo, yhi) = grid.ybounds();
        Self { xlo, xhi, ylo, yhi }
    }

    /// Bounds as a flat array, ordered `[xlo, xhi, ylo, yhi]`.
    pub fn to_array(self) -> nd::Array1<f64> {
        nd::array![self.xlo, self.xhi, self.ylo, self.yhi]
    }
}

// viridis sampled at 11 evenly spaced control points
const VIRIDIS: [[f64; 3]; 11] = [
    [0.267004, 0.004874, 0.329415],
    [0.282623, 0.140926, 0.457517],
    [0.253935, 0.265254, 0.529983],
    [0.206756, 0.371758, 0.553117],
    [0.163625, 0.471133, 0.558148],
    [0.127568, 0.566949, 0.550556],
    [0.134692, 0.658636, 0.517649],
    [0.266941, 0.748751, 0.440573],
    [0.477504, 0.821444, 0.318195],
    [0.741388, 0.873449, 0.149561],
    [0.993248, 0.906157, 0.143936],
];

/// Map a value in `[vmin, vmax]` to a viridis RGB triple; values outside the
/// range are clamped.
pub fn viridis(value: f64, vmin: f64, vmax: f64) -> [u8; 3] {
    let span = vmax - vmin;
    let t
        = if span > 0.0 {
            ((value - vmin) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
    let s = t * (VIRIDIS.len() - 1) as f64;
    let i = (s.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = s - i as f64;
    let lo = VIRIDIS[i];
    let hi = VIRIDIS[i + 1];
    let mut rgb = [0_u8; 3];
    for (c, (l, h)) in rgb.iter_mut().zip(lo.iter().zip(&hi)) {
        *c = ((l + frac * (h - l)) * 255.0).round() as u8;
    }
    rgb
}

/// Colorize a scalar field into an `(nx, ny, 3)` RGB frame.
pub fn colorize<S>(field: &Arr2<S>, vmin: f64, vmax: f64) -> nd::Array3<u8>
where S: nd::Data<Elem = f64>
{
    let (nx, ny) = field.dim();
    nd::Array3::from_shape_fn(
        (nx, ny, 3),
        |(i, j, c)| viridis(field[[i, j]], vmin, vmax)[c],
    )
}

/// Like [`colorize`], but paint masked cells black (e.g. barrier overlays).
///
/// Assumes `mask` matches `field` in shape.
pub fn colorize_masked<S, T>(
    field: &Arr2<S>,
    mask: &Arr2<T>,
    vmin: f64,
    vmax: f64,
) -> nd::Array3<u8>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = bool>,
{
    let (nx, ny) = field.dim();
    nd::Array3::from_shape_fn(
        (nx, ny, 3),
        |(i, j, c)| {
            if mask[[i, j]] {
                0
            } else {
                viridis(field[[i, j]], vmin, vmax)[c]
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use super::*;

    #[test]
    fn render_modes_project() {
        let qk = C64::new(3.0, -4.0);
        assert_abs_diff_eq!(
            RenderMode::SquareModulus.apply(qk), 25.0, epsilon = 1e-12);
        assert_abs_diff_eq!(RenderMode::RealPart.apply(qk), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            RenderMode::ImaginaryPart.apply(qk), -4.0, epsilon = 1e-12);
    }

    #[test]
    fn viridis_endpoints() {
        assert_eq!(viridis(0.0, 0.0, 1.0), [68, 1, 84]);
        assert_eq!(viridis(1.0, 0.0, 1.0), [253, 231, 37]);
        assert_eq!(viridis(0.5, 0.0, 1.0), [33, 145, 140]);
        // clamped
        assert_eq!(viridis(-10.0, 0.0, 1.0), [68, 1, 84]);
        assert_eq!(viridis(10.0, 0.0, 1.0), [253, 231, 37]);
    }

    #[test]
    fn colorize_shapes_and_mask() {
        let field: ndarray::Array2<f64>
            = ndarray::Array2::from_elem((4, 6), 2.0);
        let frame = colorize(&field, 0.0, 2.0);
        assert_eq!(frame.dim(), (4, 6, 3));
        assert_eq!(frame[[0, 0, 0]], 253);

        let mut mask: ndarray::Array2<bool>
            = ndarray::Array2::from_elem((4, 6), false);
        mask[[1, 1]] = true;
        let frame = colorize_masked(&field, &mask, 0.0, 2.0);
        assert_eq!(frame[[1, 1, 0]], 0);
        assert_eq!(frame[[1, 1, 2]], 0);
        assert_eq!(frame[[0, 0, 0]], 253);
    }

    #[test]
    fn extent_of_grids() {
        let g1 = Grid1::linspace(-3.0, 3.0, 11).unwrap();
        let e = Extent::of_grid1(&g1, 0.0, 1.0);
        assert_abs_diff_eq!(e.xlo, -3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(e.yhi, 1.0, epsilon = 1e-12);

        let g2 = Grid2::linspace((-2.0, 2.0, 11), (0.0, 4.0, 11)).unwrap();
        let e = Extent::of_grid2(&g2);
        assert_eq!(e.to_array().len(), 4);
        assert_abs_diff_eq!(e.ylo, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(e.yhi, 4.0, epsilon = 1e-12);
    }
}

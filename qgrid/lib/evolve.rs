//! Propagation of discretized states under a conservative Hamiltonian via a
//! truncated Taylor expansion of the time-evolution operator.
//!
//! A single step applies
//! ```text
//! ψ ← Σ_{n=0..N} (1/n!) (-i δt/ħ)ⁿ Hⁿ ψ
//! ```
//! followed by the configured boundary condition and renormalization (the
//! truncated series is not exactly unitary). See [`docs`][crate::docs] for
//! the stability constraint tying `δt` to the grid spacing.

use ndarray as nd;
use num_complex::Complex64 as C64;
use num_traits::Zero;
use serde::{ Deserialize, Serialize };
use crate::{
    Arr1,
    Arr2,
    error::{ EvolveError, LengthError, ShapeError },
    grid::{ Grid1, Grid2 },
    stencil,
    utils,
};

pub type EResult<T> = Result<T, EvolveError>;

/// Ratio governing the stability of the explicit scheme,
/// `ħ δt / (2 m δx²)`; values past roughly 0.5 call for a finer time step
/// or coarser grid.
pub fn stability_ratio(hbar: f64, mass: f64, dx: f64, dt: f64) -> f64 {
    hbar * dt / (2.0 * mass * dx.powi(2))
}

// return an array of differences between adjacent elements of a source array
fn array_diff<S, A>(a: &Arr1<S>) -> nd::Array1<A>
where
    S: nd::Data<Elem = A>,
    A: std::ops::Sub<A, Output = A> + Copy,
{
    a.iter().zip(a.iter().skip(1))
        .map(|(ak, akp1)| *akp1 - *ak)
        .collect()
}

/// Edge treatment applied to the state after every propagation step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    /// Leave edge samples to the stencil.
    #[default]
    Free,
    /// Pin edge samples to zero (hard walls).
    Dirichlet,
    /// Copy the adjacent interior sample onto each edge.
    Neumann,
}

impl Boundary {
    /// Apply to a one-dimensional state.
    pub fn apply_1d<S>(self, q: &mut Arr1<S>)
    where S: nd::DataMut<Elem = C64>
    {
        let n = q.len();
        if n < 2 { return; }
        match self {
            Self::Free => { }
            Self::Dirichlet => {
                q[0] = C64::zero();
                q[n - 1] = C64::zero();
            }
            Self::Neumann => {
                q[0] = q[1];
                q[n - 1] = q[n - 2];
            }
        }
    }

    /// Apply to a two-dimensional state.
    pub fn apply_2d<S>(self, q: &mut Arr2<S>)
    where S: nd::DataMut<Elem = C64>
    {
        let (nx, ny) = q.dim();
        if nx < 2 || ny < 2 { return; }
        match self {
            Self::Free => { }
            Self::Dirichlet => {
                q.slice_mut(nd::s![0, ..]).fill(C64::zero());
                q.slice_mut(nd::s![nx - 1, ..]).fill(C64::zero());
                q.slice_mut(nd::s![.., 0]).fill(C64::zero());
                q.slice_mut(nd::s![.., ny - 1]).fill(C64::zero());
            }
            Self::Neumann => {
                for j in 0..ny {
                    q[[0, j]] = q[[1, j]];
                    q[[nx - 1, j]] = q[[nx - 2, j]];
                }
                for i in 0..nx {
                    q[[i, 0]] = q[[i, 1]];
                    q[[i, ny - 1]] = q[[i, ny - 2]];
                }
            }
        }
    }
}

/// Hamiltonian `-ħ²/(2m) ∇² + V` over a one-dimensional grid.
#[derive(Clone, Debug)]
pub struct Hamiltonian1 {
    /// Reduced Planck constant in working units.
    pub hbar: f64,
    /// Particle mass in working units.
    pub mass: f64,
    dx: f64,
    v: nd::Array1<f64>,
}

impl Hamiltonian1 {
    /// Construct with natural units (`ħ = m = 1`) from a grid and a
    /// potential sampled over it.
    pub fn new(grid: &Grid1, v: nd::Array1<f64>) -> EResult<Self> {
        LengthError::check(grid.x(), &v)?;
        Ok(Self { hbar: 1.0, mass: 1.0, dx: grid.dx(), v })
    }

    /// Set the unit scales.
    pub fn with_units(mut self, hbar: f64, mass: f64) -> Self {
        self.hbar = hbar;
        self.mass = mass;
        self
    }

    /// The sampled potential.
    pub fn v(&self) -> &nd::Array1<f64> { &self.v }

    /// Grid spacing.
    pub fn dx(&self) -> f64 { self.dx }

    /// Apply to a state: `-ħ²/(2m) ∇²q + V q`.
    ///
    /// Assumes `q` matches the potential in length.
    pub fn apply<S>(&self, q: &Arr1<S>) -> nd::Array1<C64>
    where S: nd::Data<Elem = C64>
    {
        let kin = -self.hbar.powi(2) / (2.0 * self.mass);
        let mut out = stencil::laplacian_1d(q, self.dx);
        nd::Zip::from(&mut out).and(&self.v).and(q)
            .for_each(|ok, vk, qk| { *ok = kin * *ok + vk * qk; });
        out
    }

    /// Energy expectation value Re⟨q|Hq⟩ of a normalized state.
    pub fn expectation<S>(&self, q: &Arr1<S>) -> f64
    where S: nd::Data<Elem = C64>
    {
        utils::wf_dot(q, &self.apply(q), self.dx).re
    }
}

/// Hamiltonian `-ħ²/(2m) ∇² + V` over a two-dimensional grid.
#[derive(Clone, Debug)]
pub struct Hamiltonian2 {
    /// Reduced Planck constant in working units.
    pub hbar: f64,
    /// Particle mass in working units.
    pub mass: f64,
    dx: f64,
    dy: f64,
    v: nd::Array2<f64>,
}

impl Hamiltonian2 {
    /// Construct with natural units (`ħ = m = 1`) from a grid and a
    /// potential sampled over it.
    pub fn new(grid: &Grid2, v: nd::Array2<f64>) -> EResult<Self> {
        if grid.shape() != v.dim() {
            return Err(ShapeError(grid.shape(), v.dim()).into());
        }
        Ok(Self { hbar: 1.0, mass: 1.0, dx: grid.dx(), dy: grid.dy(), v })
    }

    /// Set the unit scales.
    pub fn with_units(mut self, hbar: f64, mass: f64) -> Self {
        self.hbar = hbar;
        self.mass = mass;
        self
    }

    /// The sampled potential.
    pub fn v(&self) -> &nd::Array2<f64> { &self.v }

    /// Grid spacings `(δx, δy)`.
    pub fn deltas(&self) -> (f64, f64) { (self.dx, self.dy) }

    /// Apply to a state: `-ħ²/(2m) ∇²q + V q`.
    ///
    /// Assumes `q` matches the potential in shape.
    pub fn apply<S>(&self, q: &Arr2<S>) -> nd::Array2<C64>
    where S: nd::Data<Elem = C64>
    {
        let kin = -self.hbar.powi(2) / (2.0 * self.mass);
        let mut out = stencil::laplacian_2d(q, self.dx, self.dy);
        nd::Zip::from(&mut out).and(&self.v).and(q)
            .for_each(|ok, vk, qk| { *ok = kin * *ok + vk * qk; });
        out
    }

    /// Energy expectation value Re⟨q|Hq⟩ of a normalized state.
    pub fn expectation<S>(&self, q: &Arr2<S>) -> f64
    where S: nd::Data<Elem = C64>
    {
        utils::wf_dot_2d(q, &self.apply(q), self.dx, self.dy).re
    }
}

// renormalize, failing if the norm has collapsed or blown up
pub(crate) fn renormalize_1d(q: &mut nd::Array1<C64>, dx: f64) -> EResult<()> {
    let norm = utils::wf_norm(q, dx);
    EvolveError::check_norm(norm)?;
    let scale = norm.sqrt();
    q.map_inplace(|qk| { *qk /= scale; });
    Ok(())
}

pub(crate) fn renormalize_2d(q: &mut nd::Array2<C64>, dx: f64, dy: f64)
    -> EResult<()>
{
    let norm = utils::wf_norm_2d(q, dx, dy);
    EvolveError::check_norm(norm)?;
    let scale = norm.sqrt();
    q.map_inplace(|qk| { *qk /= scale; });
    Ok(())
}

/// Take a single Taylor-expansion step of order `order` *in place*.
///
/// Boundary conditions and renormalization are left to the caller.
pub fn taylor_step_1d<S>(
    h: &Hamiltonian1,
    q: &mut Arr1<S>,
    dt: f64,
    order: usize,
) -> EResult<()>
where S: nd::DataMut<Elem = C64>
{
    EvolveError::check_order(order)?;
    EvolveError::check_dt(dt)?;
    let mut acc: nd::Array1<C64> = q.to_owned();
    let mut buf: nd::Array1<C64> = q.to_owned();
    let mut coef = C64::from(1.0);
    for n in 1..=order {
        buf = h.apply(&buf);
        // running coefficient (-i δt/ħ)ⁿ / n!
        coef *= -C64::i() * dt / (h.hbar * n as f64);
        nd::Zip::from(&mut acc).and(&buf)
            .for_each(|ak, bk| { *ak += coef * bk; });
    }
    acc.move_into(q.view_mut());
    Ok(())
}

/// Take a single Taylor-expansion step of order `order` *in place*.
///
/// Boundary conditions and renormalization are left to the caller.
pub fn taylor_step_2d<S>(
    h: &Hamiltonian2,
    q: &mut Arr2<S>,
    dt: f64,
    order: usize,
) -> EResult<()>
where S: nd::DataMut<Elem = C64>
{
    EvolveError::check_order(order)?;
    EvolveError::check_dt(dt)?;
    let mut acc: nd::Array2<C64> = q.to_owned();
    let mut buf: nd::Array2<C64> = q.to_owned();
    let mut coef = C64::from(1.0);
    for n in 1..=order {
        buf = h.apply(&buf);
        coef *= -C64::i() * dt / (h.hbar * n as f64);
        nd::Zip::from(&mut acc).and(&buf)
            .for_each(|ak, bk| { *ak += coef * bk; });
    }
    acc.move_into(q.view_mut());
    Ok(())
}

/// Propagate an initial state over a series of time coordinates, one output
/// row per time sample.
///
/// The state is renormalized and the boundary condition applied after every
/// step; the initial state is stored as given.
pub fn taylor_const<S, T>(
    h: &Hamiltonian1,
    q0: &Arr1<S>,
    t: &Arr1<T>,
    order: usize,
    boundary: Boundary,
) -> EResult<nd::Array2<C64>>
where
    S: nd::Data<Elem = C64>,
    T: nd::Data<Elem = f64>,
{
    EvolveError::check_order(order)?;
    LengthError::check(q0, h.v())?;
    let dt = array_diff(t);
    let mut q: nd::Array2<C64> = nd::Array2::zeros((t.len(), q0.len()));
    let mut q_temp: nd::Array1<C64> = q0.to_owned();
    q.slice_mut(nd::s![0, ..]).assign(q0);
    let iter = dt.iter().zip(q.axis_iter_mut(nd::Axis(0)).skip(1));
    for (&dtk, qkp1) in iter {
        taylor_step_1d(h, &mut q_temp, dtk, order)?;
        boundary.apply_1d(&mut q_temp);
        renormalize_1d(&mut q_temp, h.dx)?;
        q_temp.clone().move_into(qkp1);
    }
    Ok(q)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;
    use approx::assert_abs_diff_eq;
    use super::*;
    use crate::potential;

    fn well_grid(n: usize) -> Grid1 {
        Grid1::linspace(0.0, 1.0, n).unwrap()
    }

    fn well_mode(grid: &Grid1, n: usize) -> nd::Array1<C64> {
        let mut q: nd::Array1<C64>
            = grid.sample(|x| C64::from((n as f64 * PI * x).sin()));
        utils::wf_renormalize(&mut q, grid.dx());
        q
    }

    #[test]
    fn rejects_degenerate_parameters() {
        let grid = well_grid(50);
        let h = Hamiltonian1::new(&grid, potential::free(&grid)).unwrap();
        let mut q = well_mode(&grid, 1);
        assert!(matches!(
            taylor_step_1d(&h, &mut q, 5e-3, 0),
            Err(EvolveError::BadOrder),
        ));
        assert!(matches!(
            taylor_step_1d(&h, &mut q, -1.0, 10),
            Err(EvolveError::BadDt(..)),
        ));
    }

    #[test]
    fn rejects_mismatched_potential() {
        let grid = well_grid(50);
        let v = nd::Array1::zeros(49);
        assert!(matches!(
            Hamiltonian1::new(&grid, v),
            Err(EvolveError::Length(..)),
        ));
    }

    #[test]
    fn ground_state_energy() {
        let grid = well_grid(201);
        let h = Hamiltonian1::new(&grid, potential::free(&grid)).unwrap();
        let q = well_mode(&grid, 1);
        // E₁ = π²ħ²/(2mL²)
        assert_abs_diff_eq!(
            h.expectation(&q),
            PI.powi(2) / 2.0,
            epsilon = 1e-2,
        );
    }

    #[test]
    fn step_approximately_preserves_norm() {
        let grid = well_grid(101);
        let h = Hamiltonian1::new(&grid, potential::free(&grid)).unwrap();
        let mut q = well_mode(&grid, 1);
        taylor_step_1d(&h, &mut q, 5e-3, 20).unwrap();
        assert_abs_diff_eq!(utils::wf_norm(&q, grid.dx()), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn eigenstate_density_is_stationary() {
        let grid = well_grid(101);
        let h = Hamiltonian1::new(&grid, potential::free(&grid)).unwrap();
        let q0 = well_mode(&grid, 1);
        let density0 = q0.mapv(|qk| qk.norm_sqr());
        let mut q = q0;
        for _ in 0_usize..100 {
            taylor_step_1d(&h, &mut q, 5e-3, 20).unwrap();
            Boundary::Dirichlet.apply_1d(&mut q);
            renormalize_1d(&mut q, grid.dx()).unwrap();
        }
        let density = q.mapv(|qk| qk.norm_sqr());
        for (d0, d) in density0.iter().zip(&density) {
            assert_abs_diff_eq!(d0, d, epsilon = 1e-6);
        }
    }

    #[test]
    fn superposition_density_moves() {
        let grid = well_grid(101);
        let h = Hamiltonian1::new(&grid, potential::free(&grid)).unwrap();
        let mut q: nd::Array1<C64> = &well_mode(&grid, 1) + &well_mode(&grid, 2);
        utils::wf_renormalize(&mut q, grid.dx());
        let density0 = q.mapv(|qk| qk.norm_sqr());
        for _ in 0_usize..100 {
            taylor_step_1d(&h, &mut q, 5e-3, 20).unwrap();
            Boundary::Dirichlet.apply_1d(&mut q);
            renormalize_1d(&mut q, grid.dx()).unwrap();
        }
        let density = q.mapv(|qk| qk.norm_sqr());
        let moved = density0.iter().zip(&density)
            .map(|(d0, d)| (d0 - d).abs())
            .fold(0.0_f64, f64::max);
        assert!(moved > 1e-3);
    }

    #[test]
    fn trajectory_rows_are_normalized() {
        let grid = well_grid(101);
        let h = Hamiltonian1::new(&grid, potential::free(&grid)).unwrap();
        let q0 = well_mode(&grid, 2);
        let t: nd::Array1<f64> = nd::Array1::linspace(0.0, 0.1, 21);
        let traj = taylor_const(&h, &q0, &t, 20, Boundary::Dirichlet).unwrap();
        assert_eq!(traj.dim(), (21, 101));
        for row in traj.axis_iter(nd::Axis(0)) {
            assert_abs_diff_eq!(
                utils::wf_norm(&row, grid.dx()),
                1.0,
                epsilon = 1e-6,
            );
        }
    }

    #[test]
    fn boundary_application() {
        let one = C64::from(1.0);
        let mut q: nd::Array1<C64> = nd::Array1::from_elem(5, one);
        Boundary::Dirichlet.apply_1d(&mut q);
        assert_eq!(q[0], C64::zero());
        assert_eq!(q[4], C64::zero());
        assert_eq!(q[2], one);

        let mut q: nd::Array1<C64> = nd::Array1::from_elem(5, one);
        q[1] = C64::from(2.0);
        Boundary::Neumann.apply_1d(&mut q);
        assert_eq!(q[0], C64::from(2.0));

        let mut q: nd::Array2<C64> = nd::Array2::from_elem((4, 4), one);
        Boundary::Dirichlet.apply_2d(&mut q);
        assert_eq!(q[[0, 2]], C64::zero());
        assert_eq!(q[[3, 1]], C64::zero());
        assert_eq!(q[[2, 0]], C64::zero());
        assert_eq!(q[[1, 3]], C64::zero());
        assert_eq!(q[[1, 1]], one);
    }

    #[test]
    fn stability_ratio_scales() {
        assert_abs_diff_eq!(
            stability_ratio(1.0, 1.0, 0.1, 5e-3),
            0.25,
            epsilon = 1e-12,
        );
    }

    #[test]
    fn eigenstate_2d_density_is_stationary() {
        let grid = Grid2::linspace((0.0, 1.0, 31), (0.0, 1.0, 31)).unwrap();
        let h = Hamiltonian2::new(&grid, potential::free_2d(&grid)).unwrap();
        let mut q: nd::Array2<C64>
            = grid.sample(|x, y| C64::from((PI * x).sin() * (PI * y).sin()));
        utils::wf_renormalize_2d(&mut q, grid.dx(), grid.dy());
        let density0 = q.mapv(|qk| qk.norm_sqr());
        for _ in 0_usize..20 {
            taylor_step_2d(&h, &mut q, 5e-3, 20).unwrap();
            Boundary::Dirichlet.apply_2d(&mut q);
            renormalize_2d(&mut q, grid.dx(), grid.dy()).unwrap();
        }
        let density = q.mapv(|qk| qk.norm_sqr());
        for (d0, d) in density0.iter().zip(&density) {
            assert_abs_diff_eq!(d0, d, epsilon = 1e-6);
        }
    }

    #[test]
    fn energy_2d_ground_state() {
        let grid = Grid2::linspace((0.0, 1.0, 61), (0.0, 1.0, 61)).unwrap();
        let h = Hamiltonian2::new(&grid, potential::free_2d(&grid)).unwrap();
        let mut q: nd::Array2<C64>
            = grid.sample(|x, y| C64::from((PI * x).sin() * (PI * y).sin()));
        utils::wf_renormalize_2d(&mut q, grid.dx(), grid.dy());
        // E₁₁ = π²ħ²/(2m) (1/Lx² + 1/Ly²)
        assert_abs_diff_eq!(h.expectation(&q), PI.powi(2), epsilon = 5e-2);
    }
}

//! Stateful simulation engines owning a grid, a Hamiltonian, and the
//! evolving wavefunction.
//!
//! An engine advances in fixed time steps; each step applies the
//! truncated-Taylor propagator, then the boundary condition, then
//! renormalization. Observables (`density`, `energy`, `norm`) are read
//! between steps by whatever is driving the animation or recording.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Arr1,
    Arr2,
    error::{ EvolveError, LengthError, ShapeError },
    evolve::{
        self,
        Boundary,
        EResult,
        Hamiltonian1,
        Hamiltonian2,
        stability_ratio,
    },
    grid::{ Grid1, Grid2 },
};

/// Engine for one-dimensional systems.
///
/// Starts in the uniform state; set the initial wavefunction with
/// [`Self::set_state`] or [`Self::set_state_array`].
#[derive(Clone, Debug)]
pub struct Simulation1 {
    grid: Grid1,
    h: Hamiltonian1,
    boundary: Boundary,
    q: nd::Array1<C64>,
    dt: f64,
    order: usize,
    time: f64,
    steps: usize,
}

impl Simulation1 {
    /// Construct from a grid and a potential sampled over it.
    pub fn new(grid: Grid1, v: nd::Array1<f64>, dt: f64, order: usize)
        -> EResult<Self>
    {
        EvolveError::check_dt(dt)?;
        EvolveError::check_order(order)?;
        let h = Hamiltonian1::new(&grid, v)?;
        let mut q: nd::Array1<C64>
            = nd::Array1::from_elem(grid.len(), C64::from(1.0));
        evolve::renormalize_1d(&mut q, grid.dx())?;
        let sim = Self {
            grid, h, boundary: Boundary::default(), q, dt, order,
            time: 0.0, steps: 0,
        };
        sim.warn_stability();
        Ok(sim)
    }

    /// Set the unit scales of the Hamiltonian.
    pub fn with_units(mut self, hbar: f64, mass: f64) -> Self {
        self.h = self.h.with_units(hbar, mass);
        self.warn_stability();
        self
    }

    /// Set the boundary condition applied after every step.
    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    fn warn_stability(&self) {
        let r = stability_ratio(self.h.hbar, self.h.mass, self.grid.dx(), self.dt);
        if r > 0.5 {
            log::warn!(
                "stability ratio ħδt/(2mδx²) = {:.3} exceeds 0.5; \
                expect the expansion to diverge",
                r,
            );
        }
    }

    /// Set the state by evaluating a function of position, then normalizing.
    pub fn set_state<F>(&mut self, f: F) -> EResult<()>
    where F: FnMut(f64) -> C64
    {
        let mut q = self.grid.sample(f);
        evolve::renormalize_1d(&mut q, self.grid.dx())?;
        self.q = q;
        Ok(())
    }

    /// Set the state from an existing array, then normalize.
    pub fn set_state_array<S>(&mut self, q: &Arr1<S>) -> EResult<()>
    where S: nd::Data<Elem = C64>
    {
        LengthError::check(self.grid.x(), q)?;
        let mut q = q.to_owned();
        evolve::renormalize_1d(&mut q, self.grid.dx())?;
        self.q = q;
        Ok(())
    }

    /// Advance by one time step.
    pub fn step(&mut self) -> EResult<()> {
        evolve::taylor_step_1d(&self.h, &mut self.q, self.dt, self.order)?;
        self.boundary.apply_1d(&mut self.q);
        evolve::renormalize_1d(&mut self.q, self.grid.dx())?;
        self.time += self.dt;
        self.steps += 1;
        Ok(())
    }

    /// Advance by `n` time steps.
    pub fn advance(&mut self, n: usize) -> EResult<()> {
        for _ in 0..n { self.step()?; }
        Ok(())
    }

    pub fn grid(&self) -> &Grid1 { &self.grid }

    pub fn potential(&self) -> &nd::Array1<f64> { self.h.v() }

    /// The current wavefunction.
    pub fn psi(&self) -> &nd::Array1<C64> { &self.q }

    /// The current probability density |ψ|².
    pub fn density(&self) -> nd::Array1<f64> {
        self.q.mapv(|qk| qk.norm_sqr())
    }

    /// The current norm ∫|ψ|².
    pub fn norm(&self) -> f64 {
        crate::utils::wf_norm(&self.q, self.grid.dx())
    }

    /// The current energy expectation value ⟨E⟩.
    pub fn energy(&self) -> f64 { self.h.expectation(&self.q) }

    /// Elapsed simulation time.
    pub fn time(&self) -> f64 { self.time }

    /// Number of steps taken.
    pub fn steps(&self) -> usize { self.steps }

    pub fn dt(&self) -> f64 { self.dt }
}

/// Engine for two-dimensional systems.
///
/// Starts in the uniform state; set the initial wavefunction with
/// [`Self::set_state`] or [`Self::set_state_array`].
#[derive(Clone, Debug)]
pub struct Simulation2 {
    grid: Grid2,
    h: Hamiltonian2,
    boundary: Boundary,
    q: nd::Array2<C64>,
    dt: f64,
    order: usize,
    time: f64,
    steps: usize,
}

impl Simulation2 {
    /// Construct from a grid and a potential sampled over it.
    pub fn new(grid: Grid2, v: nd::Array2<f64>, dt: f64, order: usize)
        -> EResult<Self>
    {
        EvolveError::check_dt(dt)?;
        EvolveError::check_order(order)?;
        let h = Hamiltonian2::new(&grid, v)?;
        let mut q: nd::Array2<C64>
            = nd::Array2::from_elem(grid.shape(), C64::from(1.0));
        evolve::renormalize_2d(&mut q, grid.dx(), grid.dy())?;
        let sim = Self {
            grid, h, boundary: Boundary::default(), q, dt, order,
            time: 0.0, steps: 0,
        };
        sim.warn_stability();
        Ok(sim)
    }

    /// Set the unit scales of the Hamiltonian.
    pub fn with_units(mut self, hbar: f64, mass: f64) -> Self {
        self.h = self.h.with_units(hbar, mass);
        self.warn_stability();
        self
    }

    /// Set the boundary condition applied after every step.
    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    fn warn_stability(&self) {
        let dmin = self.grid.dx().min(self.grid.dy());
        let r = stability_ratio(self.h.hbar, self.h.mass, dmin, self.dt);
        if r > 0.5 {
            log::warn!(
                "stability ratio ħδt/(2mδ²) = {:.3} exceeds 0.5; \
                expect the expansion to diverge",
                r,
            );
        }
    }

    /// Set the state by evaluating a function of position, then normalizing.
    pub fn set_state<F>(&mut self, f: F) -> EResult<()>
    where F: FnMut(f64, f64) -> C64
    {
        let mut q = self.grid.sample(f);
        evolve::renormalize_2d(&mut q, self.grid.dx(), self.grid.dy())?;
        self.q = q;
        Ok(())
    }

    /// Set the state from an existing array, then normalize.
    pub fn set_state_array<S>(&mut self, q: &Arr2<S>) -> EResult<()>
    where S: nd::Data<Elem = C64>
    {
        let qshape = q.dim();
        if self.grid.shape() != qshape {
            return Err(ShapeError(self.grid.shape(), qshape).into());
        }
        let mut q = q.to_owned();
        evolve::renormalize_2d(&mut q, self.grid.dx(), self.grid.dy())?;
        self.q = q;
        Ok(())
    }

    /// Advance by one time step.
    pub fn step(&mut self) -> EResult<()> {
        evolve::taylor_step_2d(&self.h, &mut self.q, self.dt, self.order)?;
        self.boundary.apply_2d(&mut self.q);
        evolve::renormalize_2d(&mut self.q, self.grid.dx(), self.grid.dy())?;
        self.time += self.dt;
        self.steps += 1;
        Ok(())
    }

    /// Advance by `n` time steps.
    pub fn advance(&mut self, n: usize) -> EResult<()> {
        for _ in 0..n { self.step()?; }
        Ok(())
    }

    pub fn grid(&self) -> &Grid2 { &self.grid }

    pub fn potential(&self) -> &nd::Array2<f64> { self.h.v() }

    /// The current wavefunction.
    pub fn psi(&self) -> &nd::Array2<C64> { &self.q }

    /// The current probability density |ψ|².
    pub fn density(&self) -> nd::Array2<f64> {
        self.q.mapv(|qk| qk.norm_sqr())
    }

    /// The current norm ∫∫|ψ|².
    pub fn norm(&self) -> f64 {
        crate::utils::wf_norm_2d(&self.q, self.grid.dx(), self.grid.dy())
    }

    /// The current energy expectation value ⟨E⟩.
    pub fn energy(&self) -> f64 { self.h.expectation(&self.q) }

    /// Elapsed simulation time.
    pub fn time(&self) -> f64 { self.time }

    /// Number of steps taken.
    pub fn steps(&self) -> usize { self.steps }

    pub fn dt(&self) -> f64 { self.dt }
}

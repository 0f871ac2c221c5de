#![allow(dead_code, non_snake_case)]

//! Provides functions and higher-level constructs for finite-difference
//! simulation of the time-dependent Schrödinger equation (TDSE) on uniform
//! one- and two-dimensional coordinate grids, coupled to a rendering and
//! recording pipeline for animating the evolving state.
//!
//! The evolution scheme approximates the propagator exp(-*i* *H* *δt* / *ħ*)
//! by its truncated Taylor series, with the Hamiltonian applied through
//! three-point (1D) and five-point (2D) Laplacian stencils; see [`docs`] for
//! background and stability considerations.
//!
//! A simulation is usually driven through [`sim::Simulation1`] or
//! [`sim::Simulation2`], which own the state and apply boundary conditions
//! and renormalization after every step. Rendering is split from the
//! stepping loop: [`render`] projects the state into drawable form and
//! [`output`] streams snapshots to disk on a dedicated worker thread.

pub mod error;
pub mod grid;
pub mod stencil;
pub mod utils;
pub mod potential;
pub mod evolve;
pub mod sim;
pub mod render;
pub mod output;
pub mod settings;
pub mod units;

pub mod docs;

pub(crate) const DEF_DT: f64 = 5e-3;
pub(crate) const DEF_ORDER: usize = 70;
pub(crate) const DEF_QUEUE: usize = 16;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;

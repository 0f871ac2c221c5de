//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Time evolution](#time-evolution)
//! - [Stability](#stability)
//! - [Boundary conditions](#boundary-conditions)
//! - [Rendering](#rendering)
//!
//! # Background
//! The time-dependent Schrödinger equation (TDSE) for motion in a
//! conservative potential reads
//! ```text
//!      ∂ψ         ħ²
//! i ħ ---- = (- ----- ∇² + V) ψ
//!      ∂t        2 m
//! ```
//! with *ψ* a complex field over space. Discretizing space on a uniform
//! grid,
//! ```text
//! x[i] = x₀ + i δx, i ∊ {0, ..., N - 1}
//! ψ[i] = ψ(x[i])
//! ```
//! the Laplacian becomes a three-point stencil,
//! ```text
//!         ψ[i + 1] - 2 ψ[i] + ψ[i - 1]
//! ∇²ψ[i] = ----------------------------
//!                     δx²
//! ```
//! with error term *O*(*δx*²); in two dimensions the analogous five-point
//! stencil sums the second differences along each axis. The Hamiltonian is
//! then a sparse linear operator acting on the sampled state, and all
//! integrals (norms, inner products, expectation values) are evaluated with
//! the composite trapezoidal rule.
//!
//! # Time evolution
//! The formal solution over one step is application of the propagator
//! ```text
//! ψ(t + δt) = exp(-i H δt / ħ) ψ(t)
//! ```
//! which is approximated here by its Taylor series truncated at order *N*,
//! ```text
//!             N    1    -i δt
//! ψ(t + δt) ≈ Σ   --- ( ----- )ⁿ Hⁿ ψ(t)
//!            n=0   n!     ħ
//! ```
//! evaluated by repeated application of *H* to a running buffer. The
//! coefficient for term *n* is obtained from term *n* - 1 by multiplying by
//! `-i δt / (ħ n)`, so no explicit factorials appear (at the default order
//! of 70 they would overflow a double). The truncated series is not exactly
//! unitary, so the state is renormalized after every step.
//!
//! # Stability
//! The expansion converges only while the per-step phase accumulated by the
//! largest-eigenvalue mode of the discretized Hamiltonian stays modest. The
//! largest kinetic eigenvalue scales as `ħ²/(m δx²)`, giving the practical
//! constraint
//! ```text
//!  ħ δt
//! ------- ≲ 0.5
//! 2 m δx²
//! ```
//! Larger ratios (or too-low orders at a fixed ratio) show up as a rapidly
//! growing norm before renormalization and garbage densities after it. The
//! engines log a warning when configured past the bound; the remedy is a
//! smaller `δt`, a coarser grid, or a higher expansion order.
//!
//! # Boundary conditions
//! The stencil leaves edge samples untouched, so edge behavior is a
//! separate, explicit choice applied after every step:
//! - *Dirichlet*: edge samples pinned to zero (hard walls); the default for
//!   well-type scenarios.
//! - *Neumann*: edge samples copy their interior neighbor, giving zero normal
//!   derivative.
//! - *Free*: edges left alone; appropriate when the state is negligible at
//!   the grid edge for the whole run.
//!
//! # Rendering
//! Display is a projection of the complex state into a real scalar (|ψ|²,
//! Re ψ, or Im ψ) followed, in 2D, by mapping through the viridis
//! colormap over a fixed `[vmin, vmax]` range. Frames are captured on a
//! fixed step cadence and serialized off-thread; an `.npy` frame sequence
//! plus the `layout.npz` coordinate archive is sufficient to assemble an
//! animation offline.

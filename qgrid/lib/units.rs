#![allow(non_upper_case_globals)]

//! Physical constants and natural-unit scale factors.
//!
//! The solver itself is unit-agnostic; scenario code working from lab
//! parameters builds a [`Units`] from a mass and a length scale, converts
//! inputs into the resulting dimensionless system, and converts observables
//! back out. Constants are CODATA values.

use std::f64::consts::PI;

/// Planck constant (kg m^2 s^-1)
pub const h: f64 = 6.62607015e-34;

/// reduced Planck constant (kg m^2 s^-1)
pub const hbar: f64 = h / 2.0 / PI;

/// Boltzmann's constant (J K^-1)
pub const kB: f64 = 1.380649e-23;

/// electron mass (kg)
pub const me: f64 = 9.1093837015e-31;

/// proton mass (kg)
pub const mp: f64 = 1.67262192369e-27;

/// unified atomic mass unit (kg)
pub const mu: f64 = 1.66053906660e-27;

/// Bohr radius (m)
pub const a0: f64 = 5.29177210903e-11;

/// Hartree energy (J)
pub const Eh: f64 = 4.3597447222071e-18;

/// Natural unit scales relative to some base unit system, chosen so that
/// `ħ = 2m = 1` for the given particle.
///
/// Constructor methods produce scaling constants whose numerical values are
/// represented in the base unit system.
#[derive(Copy, Clone, Debug)]
pub struct Units {
    /// Particle mass.
    pub m: f64,
    /// Base length scale.
    pub a: f64,
    /// Associated energy scale.
    pub e: f64,
    /// Associated (angular) time scale.
    pub t: f64,
}

impl Units {
    /// Construct from a mass and length scale given in
    /// meters/kilograms/seconds (MKS) units.
    pub fn from_mks(mass: f64, a: f64) -> Self {
        let e_unit = hbar.powi(2) / 2.0 / mass / a.powi(2);
        let t_unit = hbar / e_unit;
        Self { m: mass, a, e: e_unit, t: t_unit }
    }

    /// Construct from a mass and length scale in atomic (Bohr
    /// radii/electron masses) units (AU).
    pub fn from_au(mass: f64, a: f64) -> Self {
        let m_si = me * mass;
        let a_si = a0 * a;
        let e_unit = hbar.powi(2) / 2.0 / m_si / a_si.powi(2) / Eh;
        let t_unit = 2.0 * m_si * a_si.powi(2) / Eh;
        Self { m: mass, a, e: e_unit, t: t_unit }
    }

    /// Convert a quantity with dimensions of length in the base unit system
    /// to natural units.
    pub fn to_nat_length<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.a.recip()
    }

    /// Convert a dimensionless quantity to one with length units in the base
    /// unit system.
    pub fn from_nat_length<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.a
    }

    /// Convert a quantity with dimensions of energy in the base unit system
    /// to natural units.
    pub fn to_nat_energy<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.e.recip()
    }

    /// Convert a dimensionless quantity to one with energy units in the base
    /// unit system.
    pub fn from_nat_energy<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.e
    }

    /// Convert a quantity with dimensions of time in the base unit system to
    /// natural units.
    pub fn to_nat_time<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.t.recip()
    }

    /// Convert a dimensionless quantity to one with time units in the base
    /// unit system.
    pub fn from_nat_time<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.t
    }
}

//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }
}

/// Returned when an operation requiring equal-shape 2D arrays encounters
/// arrays with unequal shape.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible shapes; got {0:?} and {1:?}")]
pub struct ShapeError(pub (usize, usize), pub (usize, usize));

impl ShapeError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix2>,
        b: &nd::ArrayBase<T, nd::Ix2>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let da = a.dim();
        let db = b.dim();
        (da == db).then_some(()).ok_or(Self(da, db))
    }
}

/// Returned from coordinate grid constructors.
#[derive(Debug, Error)]
pub enum GridError {
    /// Returned when an axis would have fewer than 2 points.
    #[error("coordinate axes must have at least 2 points; got {0}")]
    TooFew(usize),

    /// Returned when an axis' bounds are not strictly increasing.
    #[error("coordinate axis bounds must be strictly increasing; got {0} and {1}")]
    BadBounds(f64, f64),
}

impl GridError {
    pub(crate) fn check_points(n: usize) -> Result<(), Self> {
        (n >= 2).then_some(()).ok_or(Self::TooFew(n))
    }

    pub(crate) fn check_bounds(lo: f64, hi: f64) -> Result<(), Self> {
        (lo < hi).then_some(()).ok_or(Self::BadBounds(lo, hi))
    }
}

/// Returned from time-evolution routines and the simulation engines.
#[derive(Debug, Error)]
pub enum EvolveError {
    /// Returned when a propagator expansion of order 0 is requested.
    #[error("propagator expansion order must be at least 1")]
    BadOrder,

    /// Returned when a non-positive time step is encountered.
    #[error("time steps must be greater than 0; got {0}")]
    BadDt(f64),

    /// Returned when a state's norm is zero or non-finite, leaving it
    /// impossible to renormalize.
    #[error("state norm must be finite and nonzero; got {0}")]
    BadNorm(f64),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),

    /// [`ShapeError`]
    #[error("array shape error: {0}")]
    Shape(#[from] ShapeError),

    /// [`GridError`]
    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}

impl EvolveError {
    pub(crate) fn check_order(order: usize) -> Result<(), Self> {
        (order != 0).then_some(()).ok_or(Self::BadOrder)
    }

    pub(crate) fn check_dt(dt: f64) -> Result<(), Self> {
        (dt > 0.0).then_some(()).ok_or(Self::BadDt(dt))
    }

    pub(crate) fn check_norm(norm: f64) -> Result<(), Self> {
        (norm.is_finite() && norm > 0.0)
            .then_some(())
            .ok_or(Self::BadNorm(norm))
    }
}

/// Returned when loading or storing a settings file fails.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unable to read settings file: {path}")]
    Read { path: String },

    #[error("unable to parse settings file: {msg}")]
    Parse { msg: String },

    #[error("unable to write settings file: {path}")]
    Write { path: String },

    #[error("unable to encode settings: {msg}")]
    Encode { msg: String },
}

/// Returned from the snapshot writer.
#[derive(Debug, Error)]
pub enum OutputError {
    /// I/O failure in the writer thread or while creating the output
    /// directory.
    #[error("output i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure for a `.npy` artifact.
    #[error("npy write error: {0}")]
    Npy(#[from] ndarray_npy::WriteNpyError),

    /// Returned when the writer thread is no longer receiving.
    #[error("snapshot channel closed before finish")]
    ChannelClosed,

    /// Returned when the writer thread panicked.
    #[error("snapshot writer thread panicked")]
    WorkerPanic,
}

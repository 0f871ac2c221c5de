//! Integration, normalization, and Fourier tools shared by the solver and
//! observable code.

use std::f64::consts::TAU;
use std::ops::Mul;
use ndarray::{ self as nd, Ix1, concatenate };
use num_complex::Complex64 as C64;
use num_traits::Zero;
use rustfft as fft;
use crate::{ Arr1, Arr2 };

/// Integrate using the trapezoidal rule.
///
/// *Panics if `y` has length less than 2*.
pub fn trapz<S, A>(y: &nd::ArrayBase<S, Ix1>, dx: f64) -> A
where
    S: nd::Data<Elem = A>,
    A: Copy + Zero + Mul<f64, Output = A>,
{
    let n: usize = y.len();
    let mut interior = A::zero();
    for yk in y.iter().skip(1).take(n - 2) { interior = interior + *yk; }
    (y[0] + interior + interior + y[n - 1]) * (dx / 2.0)
}

/// Integrate over both axes using the trapezoidal rule repeatedly.
///
/// *Panics if either axis has length less than 2*.
pub fn trapz2<S, A>(y: &Arr2<S>, dx: f64, dy: f64) -> A
where
    S: nd::Data<Elem = A>,
    A: Copy + Zero + Mul<f64, Output = A>,
{
    let rows: nd::Array1<A>
        = y.axis_iter(nd::Axis(0))
        .map(|row| trapz(&row, dy))
        .collect();
    trapz(&rows, dx)
}

/// Calculate the norm ∫|ψ|² of a wavefunction.
///
/// *Panics if `q` has length less than 2*.
pub fn wf_norm<S>(q: &Arr1<S>, dx: f64) -> f64
where S: nd::Data<Elem = C64>
{
    trapz(&q.mapv(|qk| qk.norm_sqr()), dx)
}

/// Calculate the inner product ⟨ψ|φ⟩ of two wavefunctions.
///
/// *Panics if either array has length less than 2*.
pub fn wf_dot<S, T>(q: &Arr1<S>, p: &Arr1<T>, dx: f64) -> C64
where
    S: nd::Data<Elem = C64>,
    T: nd::Data<Elem = C64>,
{
    let prod: nd::Array1<C64>
        = nd::Zip::from(q).and(p).map_collect(|qk, pk| qk.conj() * pk);
    trapz(&prod, dx)
}

/// Renormalize a wavefunction in place.
///
/// *Panics if `q` has length less than 2*.
pub fn wf_renormalize<S>(q: &mut Arr1<S>, dx: f64)
where S: nd::DataMut<Elem = C64>
{
    let norm = wf_norm(q, dx).sqrt();
    q.iter_mut().for_each(|qk| { *qk /= norm; });
}

/// Calculate the norm ∫∫|ψ|² of a two-dimensional wavefunction.
///
/// *Panics if either axis has length less than 2*.
pub fn wf_norm_2d<S>(q: &Arr2<S>, dx: f64, dy: f64) -> f64
where S: nd::Data<Elem = C64>
{
    trapz2(&q.mapv(|qk| qk.norm_sqr()), dx, dy)
}

/// Calculate the inner product ⟨ψ|φ⟩ of two two-dimensional wavefunctions.
///
/// *Panics if either axis has length less than 2*.
pub fn wf_dot_2d<S, T>(q: &Arr2<S>, p: &Arr2<T>, dx: f64, dy: f64) -> C64
where
    S: nd::Data<Elem = C64>,
    T: nd::Data<Elem = C64>,
{
    let prod: nd::Array2<C64>
        = nd::Zip::from(q).and(p).map_collect(|qk, pk| qk.conj() * pk);
    trapz2(&prod, dx, dy)
}

/// Renormalize a two-dimensional wavefunction in place.
///
/// *Panics if either axis has length less than 2*.
pub fn wf_renormalize_2d<S>(q: &mut Arr2<S>, dx: f64, dy: f64)
where S: nd::DataMut<Elem = C64>
{
    let norm = wf_norm_2d(q, dx, dy).sqrt();
    q.iter_mut().for_each(|qk| { *qk /= norm; });
}

/// Generate an array of frequency-space coordinates to accompany a FFT of `n`
/// points for sampling interval `dx`.
pub fn fft_freq(n: usize, dx: f64) -> nd::Array1<f64> {
    let m = if n % 2 == 0 { n / 2 } else { (n + 1) / 2 };
    let fp: nd::Array1<f64>
        = (0..m)
        .map(|k| k as f64 / (n as f64 * dx))
        .collect();
    let fm: nd::Array1<f64>
        = (1..n - m + 1).rev()
        .map(|k| -(k as f64) / (n as f64 * dx))
        .collect();
    concatenate!(nd::Axis(0), fp, fm)
}

/// Perform the one-dimensional, complex-valued FFT.
pub fn fft<S>(x: &Arr1<S>) -> nd::Array1<C64>
where S: nd::Data<Elem = C64>
{
    let n: usize = x.len();
    let mut f = x.to_owned();
    let mut plan = fft::FftPlanner::new();
    let fft_plan = plan.plan_fft_forward(n);
    fft_plan.process(f.as_slice_mut().unwrap());
    f
}

/// Perform the one-dimensional, complex-valued inverse FFT.
pub fn ifft<S>(f: &Arr1<S>) -> nd::Array1<C64>
where S: nd::Data<Elem = C64>
{
    let n: usize = f.len();
    let mut x = f.to_owned();
    let mut plan = fft::FftPlanner::new();
    let ifft_plan = plan.plan_fft_inverse(n);
    ifft_plan.process(x.as_slice_mut().unwrap());
    let n = n as f64;
    x.map_inplace(|xk| { *xk /= n; });
    x
}

/// Return a copy of `x` with indices shifted to map super-Nyquist frequency
/// components to negative frequencies.
pub fn fft_shift<S, A>(x: &Arr1<S>) -> nd::Array1<A>
where
    S: nd::Data<Elem = A>,
    A: Clone,
{
    let n = x.len();
    let (p, m)
        = if n % 2 == 0 {
            x.view().split_at(nd::Axis(0), n / 2)
        } else {
            x.view().split_at(nd::Axis(0), n / 2 + 1)
        };
    concatenate!(nd::Axis(0), m.into_owned(), p.into_owned())
}

/// Calculate the normalized momentum-space density |ψ̃(k)|² of a
/// wavefunction, returned with its monotonic angular-frequency axis.
///
/// Assumes `q` has nonzero norm. *Panics if `q` has length less than 2*.
pub fn momentum_density<S>(q: &Arr1<S>, dx: f64)
    -> (nd::Array1<f64>, nd::Array1<f64>)
where S: nd::Data<Elem = C64>
{
    let n = q.len();
    let qk = fft(q);
    let k: nd::Array1<f64> = fft_shift(&fft_freq(n, dx).mapv(|f| TAU * f));
    let mut density: nd::Array1<f64>
        = fft_shift(&qk.mapv(|qkk| qkk.norm_sqr()));
    let dk = k[1] - k[0];
    let norm: f64 = trapz(&density, dk);
    density.map_inplace(|d| { *d /= norm; });
    (k, density)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;
    use approx::assert_abs_diff_eq;
    use super::*;
    use crate::grid::Grid1;

    #[test]
    fn trapz_of_square() {
        let grid = Grid1::linspace(0.0, 1.0, 1001).unwrap();
        let y: nd::Array1<f64> = grid.sample(|x| x * x);
        let integral: f64 = trapz(&y, grid.dx());
        assert_abs_diff_eq!(integral, 1.0 / 3.0, epsilon = 1e-6);
    }

    #[test]
    fn trapz2_of_plane() {
        let y: nd::Array2<f64> = nd::Array2::ones((11, 21));
        let integral: f64 = trapz2(&y, 0.1, 0.05);
        assert_abs_diff_eq!(integral, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn renormalize_gives_unit_norm() {
        let grid = Grid1::linspace(0.0, 1.0, 201).unwrap();
        let mut q: nd::Array1<C64>
            = grid.sample(|x| C64::from(3.0 * (PI * x).sin()));
        wf_renormalize(&mut q, grid.dx());
        assert_abs_diff_eq!(wf_norm(&q, grid.dx()), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn well_modes_are_orthogonal() {
        let grid = Grid1::linspace(0.0, 1.0, 501).unwrap();
        let q1: nd::Array1<C64> = grid.sample(|x| C64::from((PI * x).sin()));
        let q2: nd::Array1<C64>
            = grid.sample(|x| C64::from((2.0 * PI * x).sin()));
        let dot = wf_dot(&q1, &q2, grid.dx());
        assert_abs_diff_eq!(dot.norm(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn renormalize_2d_gives_unit_norm() {
        let mut q: nd::Array2<C64>
            = nd::Array2::from_elem((51, 51), C64::new(0.3, 0.4));
        wf_renormalize_2d(&mut q, 0.02, 0.02);
        assert_abs_diff_eq!(wf_norm_2d(&q, 0.02, 0.02), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn fft_freq_layout() {
        let f = fft_freq(4, 1.0);
        assert_abs_diff_eq!(f[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(f[1], 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(f[2], -0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(f[3], -0.25, epsilon = 1e-12);
    }

    #[test]
    fn ifft_undoes_fft() {
        let grid = Grid1::linspace(0.0, 1.0, 64).unwrap();
        let q: nd::Array1<C64>
            = grid.sample(|x| C64::new((TAU * x).cos(), (TAU * x).sin()));
        let back = ifft(&fft(&q));
        for (qk, bk) in q.iter().zip(&back) {
            assert_abs_diff_eq!(qk.re, bk.re, epsilon = 1e-10);
            assert_abs_diff_eq!(qk.im, bk.im, epsilon = 1e-10);
        }
    }

    #[test]
    fn momentum_density_peaks_at_carrier() {
        const K0: f64 = 5.0;
        let grid = Grid1::linspace(-20.0, 20.0, 1024).unwrap();
        let mut q: nd::Array1<C64>
            = grid.sample(|x| C64::cis(K0 * x) * (-x * x / 2.0).exp());
        wf_renormalize(&mut q, grid.dx());
        let (k, density) = momentum_density(&q, grid.dx());
        let peak = density.iter().enumerate()
            .max_by(|(_, l), (_, r)| l.partial_cmp(r).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert_abs_diff_eq!(k[peak], K0, epsilon = 0.25);
        let dk = k[1] - k[0];
        let total: f64 = trapz(&density, dk);
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-8);
    }
}

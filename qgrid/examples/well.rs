use std::f64::consts::PI;
use ndarray as nd;
use num_complex::Complex64 as C64;
use qgrid::{
    evolve::{ self, Boundary, Hamiltonian1 },
    grid::Grid1,
    potential,
    utils,
};

// propagate a particle-in-a-box superposition and report energy drift

fn main() {
    const L: f64 = 1.0;

    let grid = Grid1::linspace(0.0, L, 200).unwrap();
    let h = Hamiltonian1::new(&grid, potential::free(&grid)).unwrap();

    let norm = (2.0 / L).sqrt();
    let mut q0: nd::Array1<C64> = grid.sample(|x| {
        C64::from(norm * (PI * x / L).sin() + norm * (2.0 * PI * x / L).sin())
    });
    utils::wf_renormalize(&mut q0, grid.dx());

    let t: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, 201);
    let traj
        = evolve::taylor_const(&h, &q0, &t, 40, Boundary::Dirichlet).unwrap();

    let e0 = h.expectation(&traj.row(0));
    let e1 = h.expectation(&traj.row(200));
    println!("<E>(0) = {:.6}", e0);
    println!("<E>(T) = {:.6}", e1);
    println!("drift  = {:.3e}", (e1 - e0).abs());
}

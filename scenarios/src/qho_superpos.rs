use std::fs::File;
use clap::Parser;
use ndarray_npy::NpzWriter;
use num_complex::Complex64 as C64;
use qgrid::{
    evolve::Boundary,
    grid::Grid1,
    potential,
    settings::Settings,
    sim::Simulation1,
    utils,
};

// harmonic oscillator in a superposition of the n = 1 and n = 2
// eigenfunctions; the density sloshes at the beat frequency ω

const HBAR: f64 = 1.0;
const MASS: f64 = 1.0;
const L: f64 = 1.0;
const K: f64 = 4.0;
const POINTS: usize = 200;

fn main() -> anyhow::Result<()> {
    lib::init_logging();
    let cli = lib::Cli::parse();
    let mut defaults = Settings::default();
    defaults.output.vmax = 1.0;
    let settings = lib::resolve_settings(&cli, defaults)?;

    let omega = (K / MASS).sqrt();
    let alpha = MASS * omega / HBAR;
    let basis = move |x: f64, n: usize| {
        lib::hermite(n, alpha.sqrt() * x) * (-alpha * x * x / 2.0).exp()
    };

    let grid = Grid1::linspace(-3.0 * L, 3.0 * L, POINTS)?;
    let v = potential::harmonic(&grid, K);
    let mut sim = Simulation1::new(grid, v, settings.run.dt, settings.run.order)?
        .with_units(HBAR, MASS)
        .with_boundary(Boundary::Dirichlet);

    sim.set_state(|x| C64::from(basis(x, 1) + basis(x, 2)))?;

    lib::run_1d("qho_superpos", &mut sim, &settings)?;

    // record where the final state ended up in momentum space
    let (k, density) = utils::momentum_density(sim.psi(), sim.grid().dx());
    let outdir = settings.output.dir.join("qho_superpos");
    let mut npz = NpzWriter::new(File::create(outdir.join("momentum.npz"))?);
    npz.add_array("k", &k)?;
    npz.add_array("density", &density)?;
    npz.finish()?;

    Ok(())
}

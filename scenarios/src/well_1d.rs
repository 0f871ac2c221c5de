use std::f64::consts::PI;
use clap::Parser;
use num_complex::Complex64 as C64;
use qgrid::{
    evolve::Boundary,
    grid::Grid1,
    potential,
    settings::Settings,
    sim::Simulation1,
};

// infinite square well: superposition of the two lowest modes

const HBAR: f64 = 1.0;
const MASS: f64 = 1.0;
const L: f64 = 1.0;
const POINTS: usize = 50;

fn main() -> anyhow::Result<()> {
    lib::init_logging();
    let cli = lib::Cli::parse();
    let settings = lib::resolve_settings(&cli, Settings::default())?;

    let grid = Grid1::linspace(0.0, L, POINTS)?;
    let v = potential::free(&grid);
    let mut sim = Simulation1::new(grid, v, settings.run.dt, settings.run.order)?
        .with_units(HBAR, MASS)
        .with_boundary(Boundary::Dirichlet);

    let amp = (2.0 / L).sqrt();
    sim.set_state(|x| {
        C64::from(
            amp * (PI * x / L).sin() + amp * (2.0 * PI * x / L).sin()
        )
    })?;

    lib::run_1d("well_1d", &mut sim, &settings)
}

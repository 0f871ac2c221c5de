use std::f64::consts::PI;
use clap::Parser;
use num_complex::Complex64 as C64;
use qgrid::{
    evolve::Boundary,
    grid::Grid2,
    potential,
    settings::Settings,
    sim::Simulation2,
};

// 2D square well: superposition of the (1,1) and (2,2) modes

const HBAR: f64 = 1.0;
const MASS: f64 = 1.0;
const L: f64 = 1.0;
const POINTS: usize = 30;

fn basis(x: f64, y: f64, n1: usize, n2: usize) -> f64 {
    (PI * x * n1 as f64 / L).sin() * (PI * y * n2 as f64 / L).sin()
}

fn main() -> anyhow::Result<()> {
    lib::init_logging();
    let cli = lib::Cli::parse();
    let mut defaults = Settings::default();
    defaults.run.order = 50;
    let settings = lib::resolve_settings(&cli, defaults)?;

    let grid = Grid2::linspace((0.0, L, POINTS), (0.0, L, POINTS))?;
    let v = potential::free_2d(&grid);
    let mut sim = Simulation2::new(grid, v, settings.run.dt, settings.run.order)?
        .with_units(HBAR, MASS)
        .with_boundary(Boundary::Dirichlet);

    sim.set_state(|x, y| C64::from(basis(x, y, 1, 1) + basis(x, y, 2, 2)))?;

    lib::run_2d("well_2d", &mut sim, &settings, None)
}

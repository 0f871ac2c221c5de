use clap::Parser;
use num_complex::Complex64 as C64;
use qgrid::{
    evolve::Boundary,
    grid::Grid2,
    potential::DoubleSlit,
    settings::Settings,
    sim::Simulation2,
};

// gaussian packet launched downward at a two-slit barrier

const HBAR: f64 = 1.0;
const MASS: f64 = 1.0;
const L: f64 = 2.0;
const BETA: f64 = 1.0;
const P0: f64 = -5.0;
const POINTS: usize = 50;

fn main() -> anyhow::Result<()> {
    lib::init_logging();
    let cli = lib::Cli::parse();
    let mut defaults = Settings::default();
    defaults.run.order = 50;
    defaults.output.vmax = 1.0;
    let settings = lib::resolve_settings(&cli, defaults)?;

    let grid = Grid2::linspace((-L, L, POINTS), (-L, L, POINTS))?;
    let slit = DoubleSlit {
        y0: -0.1 * L,
        y1: 0.1 * L,
        inner: 0.05 * L,
        outer: 0.2 * L,
        height: 100.0,
    };
    let v = slit.potential(&grid);
    let mask = slit.mask(&grid);

    let mut sim = Simulation2::new(grid, v, settings.run.dt, settings.run.order)?
        .with_units(HBAR, MASS)
        .with_boundary(Boundary::Dirichlet);

    sim.set_state(|x, y| {
        let r2 = x.powi(2) + (y - 0.5 * L).powi(2);
        C64::cis(P0 * y / HBAR) * (-r2 * BETA / HBAR.powi(2)).exp()
    })?;

    lib::run_2d("double_slit_2d", &mut sim, &settings, Some(&mask))
}

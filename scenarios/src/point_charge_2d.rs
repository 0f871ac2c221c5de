use clap::Parser;
use num_complex::Complex64 as C64;
use qgrid::{
    grid::Grid2,
    potential,
    settings::Settings,
    sim::Simulation2,
};

// attractive point charge (softened Coulomb well) with a cos θ-lobed
// initial state

const HBAR: f64 = 1.0;
const MASS: f64 = 1.0;
const L: f64 = 1.0;
const A: f64 = 1.0;
const CHARGE: f64 = -5.0;
const SOFTENING: f64 = 0.001;
const POINTS: usize = 80;

fn main() -> anyhow::Result<()> {
    lib::init_logging();
    let cli = lib::Cli::parse();
    let mut defaults = Settings::default();
    defaults.run.order = 30;
    defaults.output.vmax = 1.0;
    let settings = lib::resolve_settings(&cli, defaults)?;

    let grid = Grid2::linspace(
        (-3.0 * L, 3.0 * L, POINTS),
        (-3.0 * L, 3.0 * L, POINTS),
    )?;
    let v = potential::coulomb_2d(&grid, CHARGE, SOFTENING);
    let mut sim = Simulation2::new(grid, v, settings.run.dt, settings.run.order)?
        .with_units(HBAR, MASS);

    sim.set_state(|x, y| {
        let r = x.hypot(y);
        let theta = x.atan2(y);
        C64::from((-0.5 * r / A).exp() * theta.cos())
    })?;

    lib::run_2d("point_charge_2d", &mut sim, &settings, None)
}

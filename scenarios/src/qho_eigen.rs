use clap::Parser;
use num_complex::Complex64 as C64;
use qgrid::{
    evolve::Boundary,
    grid::Grid1,
    potential,
    settings::Settings,
    sim::Simulation1,
};

// harmonic oscillator prepared in a single eigenfunction; its density
// should stay put while the phase winds at E_n = ħω(n + 1/2)

const HBAR: f64 = 1.0;
const MASS: f64 = 1.0;
const L: f64 = 1.0;
const K: f64 = 5.0;
const N: usize = 2;
const POINTS: usize = 200;

fn main() -> anyhow::Result<()> {
    lib::init_logging();
    let cli = lib::Cli::parse();
    let mut defaults = Settings::default();
    defaults.output.vmax = 1.0;
    let settings = lib::resolve_settings(&cli, defaults)?;

    let omega = (K / MASS).sqrt();
    let alpha = MASS * omega / HBAR;
    log::info!("expected <E> = {:.6}", HBAR * omega * (N as f64 + 0.5));

    let grid = Grid1::linspace(-3.0 * L, 3.0 * L, POINTS)?;
    let v = potential::harmonic(&grid, K);
    let mut sim = Simulation1::new(grid, v, settings.run.dt, settings.run.order)?
        .with_units(HBAR, MASS)
        .with_boundary(Boundary::Dirichlet);

    sim.set_state(|x| {
        let xi = alpha.sqrt() * x;
        C64::from(lib::hermite(N, xi) * (-alpha * x * x / 2.0).exp())
    })?;
    log::info!("initial <E> = {:.6}", sim.energy());

    lib::run_1d("qho_eigen", &mut sim, &settings)
}

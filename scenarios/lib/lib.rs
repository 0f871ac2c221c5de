//! Shared plumbing for the scenario binaries: CLI handling, logging,
//! special-function helpers for building initial states, and the run loops
//! that couple a simulation engine to the rendering/recording pipeline.

use std::fs::File;
use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use indicatif::ProgressBar;
use ndarray as nd;
use ndarray_npy::NpzWriter;
use qgrid::{
    output::{ Snapshot, SnapshotData, SnapshotWriter },
    render::{ self, Extent },
    settings::{ self, Settings },
    sim::{ Simulation1, Simulation2 },
};

/// Command-line options shared by every scenario.
#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Cli {
    /// Settings file replacing the scenario's built-in defaults.
    #[clap(long, short)]
    pub toml: Option<String>,
    /// Override the output root directory.
    #[clap(long)]
    pub outdir: Option<PathBuf>,
    /// Override the number of evolution steps.
    #[clap(long)]
    pub steps: Option<usize>,
}

/// Initialize logging; defaults to `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    ).init();
}

/// Resolve effective settings from scenario defaults and CLI options.
pub fn resolve_settings(cli: &Cli, defaults: Settings)
    -> anyhow::Result<Settings>
{
    let mut effective = match &cli.toml {
        Some(path) => settings::read_settings(path)
            .with_context(|| format!("loading settings from {}", path))?,
        None => defaults,
    };
    if let Some(dir) = &cli.outdir { effective.output.dir = dir.clone(); }
    if let Some(steps) = cli.steps { effective.run.steps = steps; }
    Ok(effective)
}

/// Evaluate the physicists' Hermite polynomial H_n(x) by recurrence.
pub fn hermite(n: usize, x: f64) -> f64 {
    let mut hm = 1.0;
    if n == 0 { return hm; }
    let mut hk = 2.0 * x;
    for m in 1..n {
        let hp = 2.0 * x * hk - 2.0 * (m as f64) * hm;
        hm = hk;
        hk = hp;
    }
    hk
}

fn time_axis(steps: usize, dt: f64) -> nd::Array1<f64> {
    (0..=steps).map(|k| k as f64 * dt).collect()
}

/// Drive a one-dimensional simulation to completion, recording curves on
/// the snapshot cadence.
pub fn run_1d(name: &str, sim: &mut Simulation1, settings: &Settings)
    -> anyhow::Result<()>
{
    let outdir = settings.output.dir.join(name);
    let writer = SnapshotWriter::create(&outdir, settings.output.queue)?;
    settings::write_settings(outdir.join("settings.toml"), settings)?;

    let extent = Extent::of_grid1(
        sim.grid(), settings.output.vmin, settings.output.vmax);
    let mut npz = NpzWriter::new(File::create(outdir.join("layout.npz"))?);
    npz.add_array("x", sim.grid().x())?;
    npz.add_array("v", sim.potential())?;
    npz.add_array("t", &time_axis(settings.run.steps, sim.dt()))?;
    npz.add_array("extent", &extent.to_array())?;
    npz.finish()?;

    let steps = settings.run.steps;
    let every = settings.run.snapshot_every.max(1);
    let pb = ProgressBar::new(steps as u64);
    let mut index = 0_usize;
    for k in 0..=steps {
        if k % every == 0 {
            writer.record(Snapshot {
                index,
                time: sim.time(),
                step: sim.steps(),
                data: SnapshotData::Curve {
                    psi: sim.psi().clone(),
                    curve: settings.output.mode.curve_1d(sim.psi()),
                },
            })?;
            log::debug!(
                "{}: step {}: <E> = {:.6}, norm = {:.6}",
                name, k, sim.energy(), sim.norm(),
            );
            index += 1;
        }
        if k < steps {
            sim.step()?;
            pb.inc(1);
        }
    }
    pb.finish_and_clear();
    writer.finish()?;
    log::info!(
        "{}: recorded {} snapshots over {} steps; final <E> = {:.6}",
        name, index, steps, sim.energy(),
    );
    Ok(())
}

/// Drive a two-dimensional simulation to completion, recording colorized
/// frames on the snapshot cadence. Cells set in `mask` are painted black.
pub fn run_2d(
    name: &str,
    sim: &mut Simulation2,
    settings: &Settings,
    mask: Option<&nd::Array2<bool>>,
) -> anyhow::Result<()> {
    let outdir = settings.output.dir.join(name);
    let writer = SnapshotWriter::create(&outdir, settings.output.queue)?;
    settings::write_settings(outdir.join("settings.toml"), settings)?;

    let extent = Extent::of_grid2(sim.grid());
    let mut npz = NpzWriter::new(File::create(outdir.join("layout.npz"))?);
    npz.add_array("x", sim.grid().x())?;
    npz.add_array("y", sim.grid().y())?;
    npz.add_array("v", sim.potential())?;
    npz.add_array("t", &time_axis(settings.run.steps, sim.dt()))?;
    npz.add_array("extent", &extent.to_array())?;
    if let Some(mask) = mask {
        npz.add_array("barrier", &mask.mapv(|mk| mk as u8))?;
    }
    npz.finish()?;

    let (vmin, vmax) = (settings.output.vmin, settings.output.vmax);
    let steps = settings.run.steps;
    let every = settings.run.snapshot_every.max(1);
    let pb = ProgressBar::new(steps as u64);
    let mut index = 0_usize;
    for k in 0..=steps {
        if k % every == 0 {
            let field = settings.output.mode.field_2d(sim.psi());
            let frame = match mask {
                Some(mask) => render::colorize_masked(&field, mask, vmin, vmax),
                None => render::colorize(&field, vmin, vmax),
            };
            writer.record(Snapshot {
                index,
                time: sim.time(),
                step: sim.steps(),
                data: SnapshotData::Field {
                    psi: sim.psi().clone(),
                    frame,
                },
            })?;
            log::debug!(
                "{}: step {}: <E> = {:.6}, norm = {:.6}",
                name, k, sim.energy(), sim.norm(),
            );
            index += 1;
        }
        if k < steps {
            sim.step()?;
            pb.inc(1);
        }
    }
    pb.finish_and_clear();
    writer.finish()?;
    log::info!(
        "{}: recorded {} snapshots over {} steps; final <E> = {:.6}",
        name, index, steps, sim.energy(),
    );
    Ok(())
}

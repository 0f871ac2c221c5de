//! Snapshot recording on a dedicated writer thread.
//!
//! The stepping loop hands [`Snapshot`]s to a [`SnapshotWriter`] over a
//! bounded channel; a worker thread serializes them to `.npy` artifacts so
//! that disk latency never stalls propagation (unless the queue fills, in
//! which case sends block rather than dropping frames).
//!
//! Artifacts per snapshot `k`:
//! - `psi_kkkkk_real.npy` / `psi_kkkkk_imag.npy`: the raw state;
//! - 1D: `curve_kkkkk.npy`, the projected display curve;
//! - 2D: `frame_kkkkk.npy`, the colorized `(nx, ny, 3)` RGB frame.
//!
//! On [`SnapshotWriter::finish`], `times.npy` and `steps.npy` index the
//! recorded snapshots.

use std::{
    fs,
    path::{ Path, PathBuf },
    sync::mpsc::{ self, Receiver, SyncSender },
    thread::{ self, JoinHandle },
};
use ndarray as nd;
use ndarray_npy::write_npy;
use num_complex::Complex64 as C64;
use crate::error::OutputError;

pub type OResult<T> = Result<T, OutputError>;

/// Dimension-specific payload of a [`Snapshot`].
#[derive(Clone, Debug)]
pub enum SnapshotData {
    /// One-dimensional state plus its projected display curve.
    Curve {
        psi: nd::Array1<C64>,
        curve: nd::Array1<f64>,
    },
    /// Two-dimensional state plus its colorized RGB frame.
    Field {
        psi: nd::Array2<C64>,
        frame: nd::Array3<u8>,
    },
}

/// A single recorded frame of the simulation.
#[derive(Clone, Debug)]
pub struct Snapshot {
    /// Running snapshot number, used in artifact names.
    pub index: usize,
    /// Simulation time at capture.
    pub time: f64,
    /// Simulation step count at capture.
    pub step: usize,
    /// State and rendered payload.
    pub data: SnapshotData,
}

enum Msg {
    Record(Box<Snapshot>),
    Done,
}

/// Handle to the writer thread.
pub struct SnapshotWriter {
    tx: SyncSender<Msg>,
    worker: JoinHandle<OResult<()>>,
    dir: PathBuf,
}

impl SnapshotWriter {
    /// Create the output directory (if needed) and spawn the worker.
    ///
    /// `queue` bounds the number of in-flight snapshots.
    pub fn create<P>(dir: P, queue: usize) -> OResult<Self>
    where P: Into<PathBuf>
    {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let (tx, rx) = mpsc::sync_channel(queue.max(1));
        let wdir = dir.clone();
        let worker = thread::spawn(move || dispatch(rx, &wdir));
        Ok(Self { tx, worker, dir })
    }

    /// The output directory.
    pub fn dir(&self) -> &Path { &self.dir }

    /// Queue a snapshot for writing, blocking if the queue is full.
    pub fn record(&self, snapshot: Snapshot) -> OResult<()> {
        self.tx.send(Msg::Record(Box::new(snapshot)))
            .map_err(|_| OutputError::ChannelClosed)
    }

    /// Flush remaining snapshots, write the index arrays, and join the
    /// worker, surfacing any deferred write error.
    pub fn finish(self) -> OResult<()> {
        // a failed send means the worker already stopped; join for its error
        let _ = self.tx.send(Msg::Done);
        match self.worker.join() {
            Ok(res) => res,
            Err(_) => Err(OutputError::WorkerPanic),
        }
    }
}

fn dispatch(rx: Receiver<Msg>, dir: &Path) -> OResult<()> {
    let mut times: Vec<f64> = Vec::new();
    let mut steps: Vec<u64> = Vec::new();
    loop {
        match rx.recv() {
            Ok(Msg::Record(snapshot)) => {
                times.push(snapshot.time);
                steps.push(snapshot.step as u64);
                write_snapshot(dir, &snapshot)?;
            }
            Ok(Msg::Done) | Err(_) => { break; }
        }
    }
    write_npy(dir.join("times.npy"), &nd::Array1::from_vec(times))?;
    write_npy(dir.join("steps.npy"), &nd::Array1::from_vec(steps))?;
    Ok(())
}

fn write_snapshot(dir: &Path, snapshot: &Snapshot) -> OResult<()> {
    let tag = format!("{:05}", snapshot.index);
    match &snapshot.data {
        SnapshotData::Curve { psi, curve } => {
            write_npy(
                dir.join(format!("psi_{}_real.npy", tag)),
                &psi.mapv(|qk| qk.re),
            )?;
            write_npy(
                dir.join(format!("psi_{}_imag.npy", tag)),
                &psi.mapv(|qk| qk.im),
            )?;
            write_npy(dir.join(format!("curve_{}.npy", tag)), curve)?;
        }
        SnapshotData::Field { psi, frame } => {
            write_npy(
                dir.join(format!("psi_{}_real.npy", tag)),
                &psi.mapv(|qk| qk.re),
            )?;
            write_npy(
                dir.join(format!("psi_{}_imag.npy", tag)),
                &psi.mapv(|qk| qk.im),
            )?;
            write_npy(dir.join(format!("frame_{}.npy", tag)), frame)?;
        }
    }
    Ok(())
}

//! TOML-backed run settings.
//!
//! Scenario binaries start from built-in defaults and optionally replace
//! them wholesale with a settings file; every field has a default, so a
//! file only needs the keys it wants to change.

use std::{ fs, path::{ Path, PathBuf } };
use serde::{ Deserialize, Serialize };
use crate::{
    DEF_DT,
    DEF_ORDER,
    DEF_QUEUE,
    error::SettingsError,
    render::RenderMode,
};

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Top-level settings for a simulation run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub run: RunSettings,
    pub output: OutputSettings,
}

/// Controls for the stepping loop.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Time step.
    pub dt: f64,
    /// Propagator expansion order.
    pub order: usize,
    /// Number of steps to take.
    pub steps: usize,
    /// Record a snapshot every this many steps (step 0 included).
    pub snapshot_every: usize,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self { dt: DEF_DT, order: DEF_ORDER, steps: 2000, snapshot_every: 10 }
    }
}

/// Controls for rendering and recording.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Root directory for run artifacts; each scenario writes into a
    /// subdirectory named after itself.
    pub dir: PathBuf,
    /// Scalar projection used for curves and frames.
    pub mode: RenderMode,
    /// Lower bound of the colormap range.
    pub vmin: f64,
    /// Upper bound of the colormap range.
    pub vmax: f64,
    /// Snapshot queue depth for the writer thread.
    pub queue: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            mode: RenderMode::default(),
            vmin: 0.0,
            vmax: 2.0,
            queue: DEF_QUEUE,
        }
    }
}

/// Read settings from a TOML file.
pub fn read_settings<P>(path: P) -> SettingsResult<Settings>
where P: AsRef<Path>
{
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|_| SettingsError::Read {
            path: path.display().to_string(),
        })?;
    toml::from_str(&text)
        .map_err(|e| SettingsError::Parse { msg: format!("{}", e) })
}

/// Write settings to a TOML file, e.g. to record a run's effective
/// configuration alongside its artifacts.
pub fn write_settings<P>(path: P, settings: &Settings) -> SettingsResult<()>
where P: AsRef<Path>
{
    let path = path.as_ref();
    let text = toml::to_string_pretty(settings)
        .map_err(|e| SettingsError::Encode { msg: format!("{}", e) })?;
    fs::write(path, text)
        .map_err(|_| SettingsError::Write {
            path: path.display().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_abs_diff_eq!(settings.run.dt, 5e-3, epsilon = 1e-12);
        assert_eq!(settings.run.order, 70);
        assert_eq!(settings.output.mode, RenderMode::SquareModulus);
        assert_eq!(settings.output.dir, PathBuf::from("output"));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let settings: Settings = toml::from_str(r#"
            [run]
            dt = 1e-3
            steps = 500

            [output]
            mode = "real-part"
            vmax = 1.0
        "#).unwrap();
        assert_abs_diff_eq!(settings.run.dt, 1e-3, epsilon = 1e-12);
        assert_eq!(settings.run.steps, 500);
        assert_eq!(settings.run.order, 70);
        assert_eq!(settings.output.mode, RenderMode::RealPart);
        assert_abs_diff_eq!(settings.output.vmax, 1.0, epsilon = 1e-12);
        assert_eq!(settings.output.queue, 16);
    }

    #[test]
    fn file_round_trip() {
        let dir = std::env::temp_dir()
            .join(format!("qgrid-settings-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.toml");
        let mut settings = Settings::default();
        settings.run.order = 30;
        settings.output.vmax = 1.0;
        write_settings(&path, &settings).unwrap();
        let back = read_settings(&path).unwrap();
        assert_eq!(back.run.order, 30);
        assert_abs_diff_eq!(back.output.vmax, 1.0, epsilon = 1e-12);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn read_errors_are_typed() {
        assert!(matches!(
            read_settings("/nonexistent/qgrid-settings.toml"),
            Err(SettingsError::Read { .. }),
        ));
    }
}

//! Run configuration.
//!
//! Runs are described by a TOML file with three sections:
//!
//! ```toml
//! [settings]
//! nSteps = 100
//! tEnd = 1.0
//! # tStart only together with restartFile
//!
//! [geometry]
//! meshName = "bay.msh"
//! borders = [[0.0, 0.45], [0.0, 0.2]]
//!
//! [IO]
//! restartFile = "solution.txt"   # optional
//! writeFrequency = 10            # optional, snapshots every N steps
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or misses a required entry.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A restart file requires an explicit start time and vice versa.
    #[error("restartFile and tStart must be provided together")]
    RestartPairing,

    /// A value is out of its valid range.
    #[error("invalid config entry: {0}")]
    Invalid(String),
}

/// `[settings]` section: time discretization.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Start time. Only valid together with a restart file; a fresh run
    /// starts at 0.
    pub t_start: Option<f64>,
    /// End time of the simulation.
    pub t_end: f64,
    /// Number of explicit steps between start and end time.
    pub n_steps: usize,
}

/// `[geometry]` section: mesh file and region of interest.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geometry {
    /// Path to the Gmsh mesh file.
    pub mesh_name: PathBuf,
    /// Region of interest as `[[x_min, x_max], [y_min, y_max]]`.
    pub borders: [[f64; 2]; 2],
}

/// `[IO]` section: restart and snapshot output. All entries optional.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IoSettings {
    /// Restart field to resume from; also the target of the final write.
    pub restart_file: Option<PathBuf>,
    /// Write a VTK snapshot every N steps.
    pub write_frequency: Option<usize>,
}

/// A complete run configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct RunConfig {
    pub settings: Settings,
    pub geometry: Geometry,
    #[serde(rename = "IO")]
    pub io: IoSettings,
    /// Run name, taken from the config file stem. Output lands in a
    /// directory of this name.
    #[serde(skip)]
    pub name: String,
}

impl RunConfig {
    /// Load and validate a configuration from a TOML file.
    ///
    /// Failures are reported as a single error naming the offending file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: RunConfig =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "run".to_string());
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.settings.t_start.is_some() != self.io.restart_file.is_some() {
            return Err(ConfigError::RestartPairing);
        }
        if self.settings.n_steps == 0 {
            return Err(ConfigError::Invalid("nSteps must be positive".to_string()));
        }
        if self.settings.t_end <= self.start_time() {
            return Err(ConfigError::Invalid(
                "tEnd must be greater than the start time".to_string(),
            ));
        }
        if self.io.write_frequency == Some(0) {
            return Err(ConfigError::Invalid(
                "writeFrequency must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Start time of the run: `tStart` if given, otherwise 0.
    pub fn start_time(&self) -> f64 {
        self.settings.t_start.unwrap_or(0.0)
    }

    /// Step size: the start-to-end interval split over `nSteps`.
    pub fn dt(&self) -> f64 {
        (self.settings.t_end - self.start_time()) / self.settings.n_steps as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[settings]
nSteps = 100
tEnd = 0.5

[geometry]
meshName = "bay.msh"
borders = [[0.0, 0.45], [0.0, 0.2]]

[IO]
"#;

    fn parse(contents: &str) -> RunConfig {
        let mut config: RunConfig = toml::from_str(contents).unwrap();
        config.name = "test".to_string();
        config
    }

    #[test]
    fn test_minimal_config() {
        let config = parse(MINIMAL);
        config.validate().unwrap();
        assert_eq!(config.settings.n_steps, 100);
        assert_eq!(config.start_time(), 0.0);
        assert!((config.dt() - 0.005).abs() < 1e-14);
        assert_eq!(config.geometry.mesh_name, PathBuf::from("bay.msh"));
        assert_eq!(config.geometry.borders[0], [0.0, 0.45]);
        assert!(config.io.restart_file.is_none());
    }

    #[test]
    fn test_missing_section_fails_to_parse() {
        let no_geometry = r#"
[settings]
nSteps = 10
tEnd = 1.0

[IO]
"#;
        assert!(toml::from_str::<RunConfig>(no_geometry).is_err());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let with_logname = MINIMAL.replace("[IO]", "[IO]\nlogName = \"logfile\"");
        parse(&with_logname).validate().unwrap();
    }

    #[test]
    fn test_restart_requires_start_time() {
        let restart_only = MINIMAL.replace("[IO]", "[IO]\nrestartFile = \"solution.txt\"");
        let err = parse(&restart_only).validate().unwrap_err();
        assert!(matches!(err, ConfigError::RestartPairing));

        let tstart_only = MINIMAL.replace("tEnd = 0.5", "tEnd = 0.5\ntStart = 0.1");
        let err = parse(&tstart_only).validate().unwrap_err();
        assert!(matches!(err, ConfigError::RestartPairing));
    }

    #[test]
    fn test_restart_pair_is_accepted() {
        let both = MINIMAL
            .replace("tEnd = 0.5", "tEnd = 0.5\ntStart = 0.1")
            .replace("[IO]", "[IO]\nrestartFile = \"solution.txt\"");
        let config = parse(&both);
        config.validate().unwrap();
        assert_eq!(config.start_time(), 0.1);
        assert!((config.dt() - 0.004).abs() < 1e-14);
    }

    #[test]
    fn test_zero_steps_rejected() {
        let zero = MINIMAL.replace("nSteps = 100", "nSteps = 0");
        assert!(matches!(
            parse(&zero).validate(),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_end_before_start_rejected() {
        let backwards = MINIMAL
            .replace("tEnd = 0.5", "tEnd = 0.05\ntStart = 0.1")
            .replace("[IO]", "[IO]\nrestartFile = \"solution.txt\"");
        assert!(matches!(
            parse(&backwards).validate(),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_from_file_names_missing_path() {
        let err = RunConfig::from_file(Path::new("/no/such/input.toml")).unwrap_err();
        assert!(err.to_string().contains("/no/such/input.toml"));
    }
}

//! Config-driven simulation runs.
//!
//! Ties the mesh reader, the transport solver and the snapshot writers
//! into a complete workflow: load, optionally restart, step `nSteps`
//! times, persist the final field.

use std::path::PathBuf;
use std::time::Instant;

use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::cfl_report;
use crate::config::{ConfigError, RunConfig};
use crate::equations::initial_oil;
use crate::io::{
    read_restart_field, write_restart_field, write_vtk_snapshot, RestartError, VtkError,
};
use crate::mesh::{Mesh, MeshError};
use crate::solver::{Region, TransportError, TransportSolver};

/// Error type for a simulation run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Restart(#[from] RestartError),

    #[error(transparent)]
    Vtk(#[from] VtkError),

    /// Output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of a completed run.
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Number of steps taken.
    pub n_steps: usize,
    /// Simulation time reached.
    pub final_time: f64,
    /// Region-of-interest diagnostic after the last step.
    pub final_region_oil: f64,
    /// Total wall-clock time in seconds.
    pub wall_time: f64,
}

/// Run a simulation described by `config` from start to finish.
pub fn run(config: &RunConfig) -> Result<RunReport, RunError> {
    config.validate()?;
    let start_wall = Instant::now();

    let start_time = config.start_time();
    let restart_field = match &config.io.restart_file {
        Some(path) => {
            info!("restarting from {} at t = {}", path.display(), start_time);
            read_restart_field(path)?
        }
        None => Vec::new(),
    };

    let mesh = Mesh::from_file(&config.geometry.mesh_name, |p| initial_oil(p.x, p.y))?;
    info!(
        "mesh {} loaded: {} cells ({} triangles)",
        config.geometry.mesh_name.display(),
        mesh.n_cells(),
        mesh.n_triangles()
    );

    let dt = config.dt();
    let stability = cfl_report(&mesh, dt);
    info!(
        "dt = {:.3e} | min area = {:.3e} | max speed = {:.3} | max Courant = {:.3}",
        dt, stability.min_area, stability.max_speed, stability.max_courant
    );
    if !stability.is_within(1.0) {
        warn!(
            "Courant estimate {:.3} exceeds 1; the explicit scheme may be unstable",
            stability.max_courant
        );
    }

    let region = Region::from_borders(config.geometry.borders);
    let mut solver = TransportSolver::with_restart(mesh, region, restart_field, start_time);

    let out_dir = PathBuf::from(&config.name);
    std::fs::create_dir_all(&out_dir).map_err(|source| RunError::OutputDir {
        path: out_dir.clone(),
        source,
    })?;

    let mut region_oil = 0.0;
    for step in 0..config.settings.n_steps {
        if let Some(frequency) = config.io.write_frequency {
            if step % frequency == 0 {
                let path = out_dir.join(format!("oil_dist_{:.2}.vtu", solver.time()));
                write_vtk_snapshot(&path, solver.mesh(), solver.field(), solver.time())?;
            }
        }

        region_oil = solver.step(dt)?;
        info!(
            "t = {:.4} | oil in fishing grounds = {:.6}",
            solver.time(),
            region_oil
        );
    }

    let final_path = out_dir.join(format!("oil_dist_{:.2}.vtu", solver.time()));
    write_vtk_snapshot(&final_path, solver.mesh(), solver.field(), solver.time())?;

    let solution_path = config
        .io
        .restart_file
        .clone()
        .unwrap_or_else(|| out_dir.join("solution.txt"));
    write_restart_field(&solution_path, solver.field())?;
    info!("solution stored in {}", solution_path.display());

    Ok(RunReport {
        n_steps: config.settings.n_steps,
        final_time: solver.time(),
        final_region_oil: region_oil,
        wall_time: start_wall.elapsed().as_secs_f64(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Geometry, IoSettings, Settings};

    const SQUARE_MSH: &str = "\
$MeshFormat
2.2 0 8
$EndMeshFormat
$Nodes
4
1 0.0 0.0 0
2 1.0 0.0 0
3 0.0 1.0 0
4 1.0 1.0 0
$EndNodes
$Elements
3
1 1 2 0 1 1 2
2 2 2 0 1 1 2 3
3 2 2 0 1 2 4 3
$EndElements
";

    fn test_config(tag: &str) -> RunConfig {
        let dir = std::env::temp_dir().join(format!("fv_rs_runner_{}", tag));
        std::fs::create_dir_all(&dir).unwrap();
        let mesh_path = dir.join("square.msh");
        std::fs::write(&mesh_path, SQUARE_MSH).unwrap();

        RunConfig {
            settings: Settings {
                t_start: None,
                t_end: 0.02,
                n_steps: 2,
            },
            geometry: Geometry {
                mesh_name: mesh_path,
                borders: [[0.0, 1.0], [0.0, 1.0]],
            },
            io: IoSettings {
                restart_file: None,
                write_frequency: Some(1),
            },
            name: dir.join("out").to_string_lossy().into_owned(),
        }
    }

    #[test]
    fn test_run_completes_and_persists_solution() {
        let config = test_config("basic");
        let report = run(&config).unwrap();

        assert_eq!(report.n_steps, 2);
        assert!((report.final_time - 0.02).abs() < 1e-12);
        assert!(report.final_region_oil >= 0.0);

        let out_dir = PathBuf::from(&config.name);
        let solution = read_restart_field(&out_dir.join("solution.txt")).unwrap();
        assert_eq!(solution.len(), 3);
        assert!(solution.iter().all(|&u| u >= 0.0));
        assert!(out_dir.join("oil_dist_0.00.vtu").exists());
        assert!(out_dir.join("oil_dist_0.02.vtu").exists());
    }

    #[test]
    fn test_run_fails_on_missing_mesh() {
        let mut config = test_config("missing_mesh");
        config.geometry.mesh_name = PathBuf::from("/no/such/mesh.msh");
        assert!(matches!(run(&config), Err(RunError::Mesh(_))));
    }
}

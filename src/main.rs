//! Command-line interface for the oil transport solver.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use fv_rs::config::RunConfig;
use fv_rs::simulation::run;

/// Finite-volume oil transport solver
#[derive(Parser)]
#[command(name = "fv-rs")]
#[command(version)]
#[command(about = "Simulate oil transport over an unstructured mesh", long_about = None)]
struct Cli {
    /// Path to the run configuration file
    #[arg(short, long, default_value = "input.toml")]
    config_file: PathBuf,

    /// Folder to search for config files
    #[arg(short, long)]
    folder: Option<PathBuf>,

    /// Run every config file in the folder
    #[arg(long)]
    find_all: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if cli.find_all {
        let folder = cli.folder.clone().unwrap_or_else(|| PathBuf::from("."));
        let mut found = false;
        for entry in std::fs::read_dir(&folder)
            .with_context(|| format!("failed to read folder {}", folder.display()))?
        {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "toml") {
                found = true;
                run_one(&path)?;
            }
        }
        if !found {
            anyhow::bail!("no config files found in {}", folder.display());
        }
    } else {
        let path = match &cli.folder {
            Some(folder) => folder.join(&cli.config_file),
            None => cli.config_file.clone(),
        };
        run_one(&path)?;
    }

    Ok(())
}

fn run_one(path: &Path) -> anyhow::Result<()> {
    info!("running simulation for config file {}", path.display());
    let config = RunConfig::from_file(path)?;
    let report = run(&config)
        .with_context(|| format!("simulation for {} failed", path.display()))?;
    info!(
        "simulation complete: {} steps to t = {:.4} in {:.2}s, results in {}/",
        report.n_steps, report.final_time, report.wall_time, config.name
    );
    Ok(())
}

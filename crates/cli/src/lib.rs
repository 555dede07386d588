//! Shared setup for the trade-study binaries.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt};
use uam_trade_study::Study;
use uam_trade_study::acoustics::ExternalNoiseModel;
use uam_trade_study::solver::ExternalSolver;

/// Initialize tracing for a binary.
///
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn load_study(path: &Path) -> Result<Study> {
    Study::load(path).with_context(|| format!("loading study file {}", path.display()))
}

/// The study's solver command; a run cannot proceed without one.
pub fn solver_for(study: &Study) -> Result<ExternalSolver> {
    let command = study
        .config()
        .solver
        .as_ref()
        .context("study file has no [solver] command")?;
    Ok(ExternalSolver::from_config(command))
}

/// The study's noise command, if any.
pub fn noise_model_for(study: &Study) -> Option<ExternalNoiseModel> {
    study
        .config()
        .noise
        .as_ref()
        .map(ExternalNoiseModel::from_config)
}

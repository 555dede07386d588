//! The per-configuration loop: resolve, assemble, solve, assess, collect.

use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};
use uam_acoustics::{AcousticsError, NoiseModel, assess};
use uam_config::{AircraftOverrides, ConfigError, StudyConfig};
use uam_export::{ExportError, ResultsTable, write_figures, write_report, write_results_json};
use uam_model::{MissionKind, Problem, SubstitutionError, VarPath, assemble};
use uam_solver::{ExtractError, SolveError, Solver};
use uam_substitutions::{ResolveError, Scenario, mission_cost, mission_specs, resolve_with};

#[derive(Debug, Error)]
pub enum StudyError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Substitution(#[from] SubstitutionError),
    #[error("{configuration}: {source}")]
    Solve {
        configuration: String,
        #[source]
        source: SolveError,
    },
    #[error("{configuration}: {source}")]
    Extract {
        configuration: String,
        #[source]
        source: ExtractError,
    },
    #[error("{configuration}: {source}")]
    Acoustics {
        configuration: String,
        #[source]
        source: AcousticsError,
    },
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// What `validate` learned about one configuration without solving it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationSummary {
    pub configuration: String,
    pub aircraft_substitutions: usize,
    pub total_substitutions: usize,
    /// Required aircraft inputs the substitution tables did not provide.
    pub missing: Vec<VarPath>,
}

/// A loaded study file with its scenario resolved.
#[derive(Debug, Clone)]
pub struct Study {
    config: StudyConfig,
    scenario: Scenario,
}

impl Study {
    pub fn new(config: StudyConfig) -> Result<Self, StudyError> {
        config.validate()?;
        let scenario = Scenario::from_config(&config)?;
        Ok(Self { config, scenario })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StudyError> {
        Self::new(uam_config::load_study(path)?)
    }

    pub fn config(&self) -> &StudyConfig {
        &self.config
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn configurations(&self) -> &[String] {
        &self.config.configurations
    }

    /// Resolve and assemble one configuration.
    pub fn problem(&self, configuration: &str) -> Result<Problem, StudyError> {
        let none = AircraftOverrides::default();
        let overrides = self.config.overrides.get(configuration).unwrap_or(&none);
        build_problem(configuration, &self.scenario, overrides)
    }

    /// Resolve and assemble every configuration, stopping at the first
    /// unknown name or substitution conflict.
    pub fn validate(&self) -> Result<Vec<ValidationSummary>, StudyError> {
        self.configurations()
            .iter()
            .map(|configuration| {
                let problem = self.problem(configuration)?;
                Ok(ValidationSummary {
                    configuration: configuration.clone(),
                    aircraft_substitutions: problem.aircraft().substitutions().len(),
                    total_substitutions: problem.substitutions().len(),
                    missing: problem.aircraft().missing_required(),
                })
            })
            .collect()
    }

    /// Solve every configuration in study order. Any solver or acoustics
    /// failure aborts the run.
    pub fn run<S: Solver + ?Sized>(
        &self,
        solver: &S,
        noise: Option<&dyn NoiseModel>,
    ) -> Result<ResultsTable, StudyError> {
        let mut table = ResultsTable::new();
        for configuration in self.configurations() {
            info!(%configuration, "solving");
            let problem = self.problem(configuration)?;
            let solution = solver.solve(&problem).map_err(|source| StudyError::Solve {
                configuration: configuration.clone(),
                source,
            })?;
            info!(
                %configuration,
                cost_per_trip = solution.objective().value_si(),
                variables = solution.len(),
                "solved"
            );

            let hover_noise = match noise {
                Some(model) => Some(assess(model, &solution, &self.config.acoustics).map_err(
                    |source| StudyError::Acoustics {
                        configuration: configuration.clone(),
                        source,
                    },
                )?),
                None => None,
            };
            table.insert(configuration.as_str(), solution, hover_noise);
        }
        if noise.is_none() {
            warn!("no noise model configured; SPL rows will read n/a");
        }
        Ok(table)
    }
}

/// Aircraft, missions and cost for one configuration, merged into a problem.
pub fn build_problem(
    configuration: &str,
    scenario: &Scenario,
    overrides: &AircraftOverrides,
) -> Result<Problem, StudyError> {
    let aircraft = resolve_with(configuration, scenario, overrides)?;
    let problem = assemble(aircraft, mission_specs(scenario), mission_cost(scenario))?;
    tracing::debug!(
        %configuration,
        substitutions = problem.substitutions().len(),
        sizing = problem.mission(MissionKind::Sizing).substitutions().len(),
        "assembled problem"
    );
    Ok(problem)
}

/// Files written by [`export_results`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub report: String,
    pub report_path: PathBuf,
    pub results_path: PathBuf,
    pub figures: Vec<PathBuf>,
}

/// Write the tabulated report, the JSON sidecar and (optionally) figures.
pub fn export_results(
    dir: &Path,
    scenario: &Scenario,
    table: &ResultsTable,
    with_figures: bool,
) -> Result<ExportSummary, StudyError> {
    let report = write_report(dir, table)?;
    write_results_json(dir, scenario, table, Utc::now())?;
    let figures = if with_figures {
        write_figures(dir, table)?
    } else {
        Vec::new()
    };
    Ok(ExportSummary {
        report,
        report_path: dir.join(uam_export::REPORT_FILE),
        results_path: dir.join(uam_export::RESULTS_FILE),
        figures,
    })
}

//! Standard substitutions for the on-demand aircraft trade study.
//!
//! A [`Scenario`] (time frame, use case, mission flags) and a
//! [`Configuration`] name resolve to the substitution sets the assembler
//! hands to each sub-model.

pub mod aircraft;
pub mod configuration;
pub mod missions;
pub mod scenario;

use thiserror::Error;
use uam_core::UnitError;

pub use aircraft::{resolve, resolve_with};
pub use configuration::{Configuration, ConfigurationData, Family};
pub use missions::{deadhead_mission, mission_cost, mission_specs, revenue_mission, sizing_mission};
pub use scenario::{
    CruiseDistances, CruiseSpeedCaps, Piloting, ReserveType, Scenario, ScenarioConstants,
    TimeFrame, UseCase,
};

/// Errors raised while resolving names from a study file.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("Configuration {0} not recognized.")]
    UnknownConfiguration(String),
    #[error("Reserve type {0} not recognized.")]
    UnknownReserve(String),
    #[error("Time frame {0} not recognized.")]
    UnknownTimeFrame(String),
    #[error("Use case {0} not recognized.")]
    UnknownUseCase(String),
    #[error("override `{field}` for {configuration} must be a positive number, got {value}")]
    InvalidOverride {
        configuration: String,
        field: &'static str,
        value: f64,
    },
    #[error(transparent)]
    Unit(#[from] UnitError),
}

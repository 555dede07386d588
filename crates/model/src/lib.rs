//! Named-variable sub-models for the on-demand aircraft trade study.
//!
//! The physics lives in the external solver. This crate owns the naming
//! scheme, the substitution sets and the wiring between sub-models.

pub mod models;
pub mod names;
pub mod path;
pub mod problem;
pub mod substitution;

pub use models::{AircraftModel, MissionCostModel, MissionKind, MissionModel, ModelKind};
pub use path::{PathError, VarPath};
pub use problem::{MissionSpecs, ModelInfo, Problem, assemble};
pub use substitution::{SubstitutionError, SubstitutionSet};

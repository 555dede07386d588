//! Configuration trade study for on-demand (urban air mobility) aircraft.
//!
//! Each rotorcraft configuration is resolved into substitutions, assembled
//! into one sizing problem, solved by an external optimizer, and reported
//! side by side. The member crates are re-exported here so front-ends only
//! depend on this one.

pub mod study;
pub mod sweep;

pub use uam_acoustics as acoustics;
pub use uam_config as config;
pub use uam_core as units;
pub use uam_export as export;
pub use uam_model as model;
pub use uam_solver as solver;
pub use uam_substitutions as substitutions;

pub use study::{
    ExportSummary, Study, StudyError, ValidationSummary, build_problem, export_results,
};
pub use sweep::battery_sweep;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! Battery specific-energy sensitivity.
//!
//! Each configuration is re-solved over a range of `Battery.e`. Infeasible
//! points are expected at the low end of the range and are recorded rather
//! than aborting the sweep. A solved point that lacks a reported output, or
//! whose noise estimate fails, aborts it as [`Study::run`] would.

use tracing::{info, warn};
use uam_acoustics::{NoiseModel, assess};
use uam_core::{Quantity, Unit};
use uam_export::SweepRecord;
use uam_model::{ModelKind, VarPath};
use uam_model::names::{aircraft as av, cost};
use uam_solver::{SolveOutcome, Solver, solve_or_recover};
use uam_substitutions::Configuration;

use crate::study::{Study, StudyError};

/// Sweep every configuration of `study`. The study file's `sweep` range is
/// used for all of them when present; otherwise each configuration uses its
/// own default range.
pub fn battery_sweep<S: Solver + ?Sized>(
    study: &Study,
    solver: &S,
    noise: Option<&dyn NoiseModel>,
) -> Result<Vec<SweepRecord>, StudyError> {
    let battery_e = ModelKind::Aircraft.var(av::BATTERY_SPECIFIC_ENERGY);
    let mut records = Vec::new();

    for name in study.configurations() {
        let configuration: Configuration = name.parse()?;
        let range = study
            .config()
            .sweep
            .unwrap_or_else(|| configuration.default_battery_sweep());
        let base = study.problem(name)?;
        info!(%configuration, points = range.steps, "sweeping battery specific energy");

        for e in range.points() {
            let mut problem = base.clone();
            problem.override_substitution(
                battery_e.clone(),
                Quantity::in_unit(e, Unit::WattHourPerKilogram),
            )?;

            let solution = match solve_or_recover(solver, problem) {
                SolveOutcome::Solved(solution) => solution,
                SolveOutcome::Unsolved { error, .. } => {
                    warn!(%configuration, battery_wh_per_kg = e, %error, "point not solved");
                    records.push(SweepRecord::infeasible(name.as_str(), e));
                    continue;
                }
            };

            let read = |path: VarPath, unit: Unit| {
                solution
                    .extract(&path, unit)
                    .map(Some)
                    .map_err(|source| StudyError::Extract {
                        configuration: name.clone(),
                        source,
                    })
            };
            let mtom_kg = read(ModelKind::Aircraft.var(av::MTOM), Unit::Kilogram)?;
            let battery_mass_kg = read(ModelKind::Aircraft.var(av::BATTERY_MASS), Unit::Kilogram)?;
            let cost_per_trip_per_passenger = read(
                ModelKind::MissionCost.var(cost::COST_PER_TRIP_PER_PASSENGER),
                Unit::Dimensionless,
            )?;
            let spl_db = match noise {
                Some(model) => {
                    let noise = assess(model, &solution, &study.config().acoustics).map_err(
                        |source| StudyError::Acoustics {
                            configuration: name.clone(),
                            source,
                        },
                    )?;
                    Some(noise.a_weighted.spl_db)
                }
                None => None,
            };
            records.push(SweepRecord {
                configuration: name.clone(),
                battery_wh_per_kg: e,
                feasible: true,
                mtom_kg,
                battery_mass_kg,
                cost_per_trip_per_passenger,
                spl_db,
            });
        }
    }
    Ok(records)
}

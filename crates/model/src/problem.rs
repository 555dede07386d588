//! Assembly of the five sub-models into one solvable problem.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;
use uam_core::Quantity;

use crate::models::{AircraftModel, MissionCostModel, MissionKind, MissionModel, ModelKind};
use crate::names::cost;
use crate::path::VarPath;
use crate::substitution::{SubstitutionError, SubstitutionSet};

/// Substitutions for the three flight missions.
#[derive(Debug, Clone, Default)]
pub struct MissionSpecs {
    pub sizing: SubstitutionSet,
    pub revenue: SubstitutionSet,
    pub deadhead: SubstitutionSet,
}

/// Descriptor of one sub-model and the sub-models it reads from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub name: &'static str,
    pub kind: ModelKind,
    pub references: Vec<ModelKind>,
    pub substitutions: usize,
}

/// A fully wired problem ready to hand to a solver.
#[derive(Debug, Clone)]
pub struct Problem {
    objective: VarPath,
    aircraft: Arc<AircraftModel>,
    sizing: Arc<MissionModel>,
    revenue: Arc<MissionModel>,
    deadhead: Arc<MissionModel>,
    cost: MissionCostModel,
    substitutions: SubstitutionSet,
}

/// Build the aircraft, missions and cost model and merge their substitutions.
///
/// Missing inputs are not checked here; the solver reports them.
pub fn assemble(
    aircraft: SubstitutionSet,
    missions: MissionSpecs,
    cost_substitutions: SubstitutionSet,
) -> Result<Problem, SubstitutionError> {
    let aircraft = Arc::new(AircraftModel::new(aircraft)?);
    let sizing = Arc::new(MissionModel::new(
        MissionKind::Sizing,
        Arc::clone(&aircraft),
        missions.sizing,
    )?);
    let revenue = Arc::new(MissionModel::new(
        MissionKind::Revenue,
        Arc::clone(&aircraft),
        missions.revenue,
    )?);
    let deadhead = Arc::new(MissionModel::new(
        MissionKind::Deadhead,
        Arc::clone(&aircraft),
        missions.deadhead,
    )?);
    let cost = MissionCostModel::new(
        Arc::clone(&aircraft),
        Arc::clone(&revenue),
        Arc::clone(&deadhead),
        cost_substitutions,
    )?;

    let mut substitutions = SubstitutionSet::new();
    for set in [
        aircraft.substitutions(),
        sizing.substitutions(),
        revenue.substitutions(),
        deadhead.substitutions(),
        cost.substitutions(),
    ] {
        substitutions.merge(set)?;
    }
    debug!(
        aircraft = aircraft.substitutions().len(),
        sizing = sizing.substitutions().len(),
        revenue = revenue.substitutions().len(),
        deadhead = deadhead.substitutions().len(),
        cost = cost.substitutions().len(),
        total = substitutions.len(),
        "assembled problem"
    );

    Ok(Problem {
        objective: ModelKind::MissionCost.var(cost::COST_PER_TRIP),
        aircraft,
        sizing,
        revenue,
        deadhead,
        cost,
        substitutions,
    })
}

impl Problem {
    /// Variable the solver minimises.
    pub fn objective(&self) -> &VarPath {
        &self.objective
    }

    /// Merged substitutions of every sub-model, including overrides.
    pub fn substitutions(&self) -> &SubstitutionSet {
        &self.substitutions
    }

    pub fn aircraft(&self) -> &Arc<AircraftModel> {
        &self.aircraft
    }

    pub fn mission(&self, kind: MissionKind) -> &Arc<MissionModel> {
        match kind {
            MissionKind::Sizing => &self.sizing,
            MissionKind::Revenue => &self.revenue,
            MissionKind::Deadhead => &self.deadhead,
        }
    }

    pub fn cost(&self) -> &MissionCostModel {
        &self.cost
    }

    /// Sub-models in solve order, with their references.
    pub fn models(&self) -> Vec<ModelInfo> {
        let mission_info = |mission: &MissionModel| ModelInfo {
            name: mission.kind().model().name(),
            kind: mission.kind().model(),
            references: vec![ModelKind::Aircraft],
            substitutions: mission.substitutions().len(),
        };
        vec![
            ModelInfo {
                name: ModelKind::Aircraft.name(),
                kind: ModelKind::Aircraft,
                references: Vec::new(),
                substitutions: self.aircraft.substitutions().len(),
            },
            mission_info(&self.sizing),
            mission_info(&self.revenue),
            mission_info(&self.deadhead),
            ModelInfo {
                name: ModelKind::MissionCost.name(),
                kind: ModelKind::MissionCost,
                references: vec![
                    ModelKind::Aircraft,
                    ModelKind::RevenueMission,
                    ModelKind::DeadheadMission,
                ],
                substitutions: self.cost.substitutions().len(),
            },
        ]
    }

    /// Replace the value of one substitution in its owning sub-model and in
    /// the merged set.
    ///
    /// The path must belong to one of the five sub-models. The sub-models are
    /// re-wired so every mission and the cost model keep sharing the updated
    /// aircraft. Returns the previous value, if any.
    pub fn override_substitution(
        &mut self,
        path: VarPath,
        value: impl Into<Quantity>,
    ) -> Result<Option<Quantity>, SubstitutionError> {
        let Some(owner) = ModelKind::from_name(path.model()) else {
            return Err(SubstitutionError::UnknownModel { path });
        };
        let value = value.into();
        debug!(%path, value = value.value_si(), "override substitution");

        let mut aircraft = self.aircraft.substitutions().clone();
        let mut missions = MissionSpecs {
            sizing: self.sizing.substitutions().clone(),
            revenue: self.revenue.substitutions().clone(),
            deadhead: self.deadhead.substitutions().clone(),
        };
        let mut cost_substitutions = self.cost.substitutions().clone();
        let set = match owner {
            ModelKind::Aircraft => &mut aircraft,
            ModelKind::SizingMission => &mut missions.sizing,
            ModelKind::RevenueMission => &mut missions.revenue,
            ModelKind::DeadheadMission => &mut missions.deadhead,
            ModelKind::MissionCost => &mut cost_substitutions,
        };
        let previous = set.set(path, value);
        *self = assemble(aircraft, missions, cost_substitutions)?;
        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::{aircraft as av, mission};

    fn specs() -> (SubstitutionSet, MissionSpecs, SubstitutionSet) {
        let mut aircraft = SubstitutionSet::new();
        aircraft.set(ModelKind::Aircraft.var(av::ROTORS_N), 8.0);
        aircraft.set(ModelKind::Aircraft.var(av::EMPTY_MASS_FRACTION), 0.53);

        let mut missions = MissionSpecs::default();
        missions
            .sizing
            .set(MissionKind::Sizing.var(mission::PASSENGER_COUNT), 3.0);
        missions
            .revenue
            .set(MissionKind::Revenue.var(mission::PASSENGER_COUNT), 3.0);
        missions
            .deadhead
            .set(MissionKind::Deadhead.var(mission::PASSENGER_COUNT), 0.001);

        let mut cost_set = SubstitutionSet::new();
        cost_set.set(ModelKind::MissionCost.var(cost::DEADHEAD_RATIO), 0.2);
        (aircraft, missions, cost_set)
    }

    #[test]
    fn aircraft_is_shared_by_reference() {
        let (aircraft, missions, cost_set) = specs();
        let problem = assemble(aircraft, missions, cost_set).unwrap();
        for kind in [MissionKind::Sizing, MissionKind::Revenue, MissionKind::Deadhead] {
            assert!(Arc::ptr_eq(problem.mission(kind).aircraft(), problem.aircraft()));
        }
        assert!(Arc::ptr_eq(problem.cost().aircraft(), problem.aircraft()));
        assert!(Arc::ptr_eq(
            problem.cost().revenue(),
            problem.mission(MissionKind::Revenue)
        ));
        assert!(Arc::ptr_eq(
            problem.cost().deadhead(),
            problem.mission(MissionKind::Deadhead)
        ));
    }

    #[test]
    fn merged_set_holds_every_sub_model() {
        let (aircraft, missions, cost_set) = specs();
        let problem = assemble(aircraft, missions, cost_set).unwrap();
        assert_eq!(problem.substitutions().len(), 6);
        assert_eq!(
            problem.objective().to_string(),
            "OnDemandMissionCost.cost_per_trip"
        );
        let models = problem.models();
        assert_eq!(models.len(), 5);
        assert_eq!(models[4].references.len(), 3);
        assert_eq!(models[1].references, vec![ModelKind::Aircraft]);
    }

    #[test]
    fn foreign_paths_are_rejected() {
        let (aircraft, mut missions, cost_set) = specs();
        missions
            .sizing
            .set(ModelKind::Aircraft.var(av::ROTORS_N), 4.0);
        let err = assemble(aircraft, missions, cost_set).unwrap_err();
        assert!(matches!(err, SubstitutionError::OutsideModel { .. }));
    }

    #[test]
    fn override_replaces_and_validates_owner() {
        let (aircraft, missions, cost_set) = specs();
        let mut problem = assemble(aircraft, missions, cost_set).unwrap();
        let path = ModelKind::Aircraft.var(av::ROTORS_N);
        let previous = problem.override_substitution(path.clone(), 12.0).unwrap();
        assert_eq!(previous, Some(Quantity::dimensionless(8.0)));
        assert_eq!(
            problem.substitutions().get(&path),
            Some(&Quantity::dimensionless(12.0))
        );

        assert_eq!(
            problem.aircraft().substitutions().get(&path),
            Some(&Quantity::dimensionless(12.0))
        );

        let stray = VarPath::parse("Elsewhere.x").unwrap();
        assert!(matches!(
            problem.override_substitution(stray, 1.0),
            Err(SubstitutionError::UnknownModel { .. })
        ));
    }

    #[test]
    fn override_updates_the_owning_sub_model() {
        let (aircraft, missions, cost_set) = specs();
        let mut problem = assemble(aircraft, missions, cost_set).unwrap();
        let battery_e = ModelKind::Aircraft.var(av::BATTERY_SPECIFIC_ENERGY);
        assert_eq!(problem.override_substitution(battery_e.clone(), 400.0).unwrap(), None);

        let models = problem.models();
        assert_eq!(models[0].substitutions, 3);
        assert_eq!(problem.substitutions().len(), 7);
        assert_eq!(
            problem.aircraft().substitutions().get(&battery_e),
            Some(&Quantity::dimensionless(400.0))
        );
        for kind in [MissionKind::Sizing, MissionKind::Revenue, MissionKind::Deadhead] {
            assert!(Arc::ptr_eq(problem.mission(kind).aircraft(), problem.aircraft()));
        }
        assert!(Arc::ptr_eq(problem.cost().aircraft(), problem.aircraft()));

        let ratio = ModelKind::MissionCost.var(cost::DEADHEAD_RATIO);
        problem.override_substitution(ratio.clone(), 0.3).unwrap();
        assert_eq!(
            problem.cost().substitutions().get(&ratio),
            Some(&Quantity::dimensionless(0.3))
        );
        assert_eq!(
            problem.aircraft().substitutions().get(&battery_e),
            Some(&Quantity::dimensionless(400.0))
        );
    }
}

//! Sub-model declarations.
//!
//! The equations behind each sub-model belong to the external solver; on
//! this side a sub-model is a named namespace holding its substitutions and
//! references to the sub-models it reads from.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::names::aircraft as av;
use crate::path::VarPath;
use crate::substitution::{SubstitutionError, SubstitutionSet};

/// The five sub-models of an on-demand trade-study problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Aircraft,
    SizingMission,
    RevenueMission,
    DeadheadMission,
    MissionCost,
}

impl ModelKind {
    pub const ALL: [ModelKind; 5] = [
        ModelKind::Aircraft,
        ModelKind::SizingMission,
        ModelKind::RevenueMission,
        ModelKind::DeadheadMission,
        ModelKind::MissionCost,
    ];

    /// Root segment of every variable owned by this sub-model.
    pub fn name(self) -> &'static str {
        match self {
            ModelKind::Aircraft => "OnDemandAircraft",
            ModelKind::SizingMission => "OnDemandSizingMission",
            ModelKind::RevenueMission => "OnDemandRevenueMission",
            ModelKind::DeadheadMission => "OnDemandDeadheadMission",
            ModelKind::MissionCost => "OnDemandMissionCost",
        }
    }

    pub fn root(self) -> VarPath {
        VarPath::root(self.name())
    }

    /// Full path of a variable relative to this sub-model.
    pub fn var(self, relative: &str) -> VarPath {
        self.root().join(relative)
    }

    pub fn from_name(name: &str) -> Option<ModelKind> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The aircraft shared by every mission and the cost model.
#[derive(Debug, Clone, PartialEq)]
pub struct AircraftModel {
    substitutions: SubstitutionSet,
}

impl AircraftModel {
    /// Inputs every configuration table must provide.
    pub const REQUIRED: &'static [&'static str] = &[
        av::G,
        av::ETA_LEVEL_FLIGHT,
        av::EMPTY_MASS_FRACTION,
        av::V_CRUISE,
        av::L_D_CRUISE,
        av::TAIL_ROTOR_POWER_FRACTION_HOVER,
        av::TAIL_ROTOR_POWER_FRACTION_LEVEL_FLIGHT,
        av::AIRFRAME_COST_PER_WEIGHT,
        av::AIRFRAME_LIFETIME,
        av::AVIONICS_LIFETIME,
        av::AVIONICS_PURCHASE_PRICE,
        av::BATTERY_E_FRAC,
        av::BATTERY_SPECIFIC_ENERGY,
        av::BATTERY_SPECIFIC_POWER,
        av::BATTERY_COST_PER_ENERGY,
        av::BATTERY_CYCLE_LIFE,
        av::ROTORS_BLADES,
        av::ROTORS_SOLIDITY,
        av::ROTORS_T_C,
        av::ROTORS_KI,
        av::ROTORS_CD0,
        av::ROTORS_M_TIP_MAX,
        av::ROTORS_N,
        av::ROTORS_T_A_MAX,
        av::ROTORS_CL_MEAN_MAX,
        av::ELECTRICAL_SYSTEM_ETA,
    ];

    pub fn new(substitutions: SubstitutionSet) -> Result<Self, SubstitutionError> {
        substitutions.ensure_within(&ModelKind::Aircraft.root())?;
        Ok(Self { substitutions })
    }

    pub fn substitutions(&self) -> &SubstitutionSet {
        &self.substitutions
    }

    /// Required inputs absent from this aircraft's substitutions.
    pub fn missing_required(&self) -> Vec<VarPath> {
        missing(&self.substitutions, ModelKind::Aircraft, Self::REQUIRED)
    }
}

/// Which of the three flight missions a [`MissionModel`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissionKind {
    Sizing,
    Revenue,
    Deadhead,
}

impl MissionKind {
    pub fn model(self) -> ModelKind {
        match self {
            MissionKind::Sizing => ModelKind::SizingMission,
            MissionKind::Revenue => ModelKind::RevenueMission,
            MissionKind::Deadhead => ModelKind::DeadheadMission,
        }
    }

    pub fn var(self, relative: &str) -> VarPath {
        self.model().var(relative)
    }
}

/// A flight mission flown by the shared aircraft.
#[derive(Debug, Clone)]
pub struct MissionModel {
    kind: MissionKind,
    aircraft: Arc<AircraftModel>,
    substitutions: SubstitutionSet,
}

impl MissionModel {
    pub fn new(
        kind: MissionKind,
        aircraft: Arc<AircraftModel>,
        substitutions: SubstitutionSet,
    ) -> Result<Self, SubstitutionError> {
        substitutions.ensure_within(&kind.model().root())?;
        Ok(Self {
            kind,
            aircraft,
            substitutions,
        })
    }

    pub fn kind(&self) -> MissionKind {
        self.kind
    }

    pub fn aircraft(&self) -> &Arc<AircraftModel> {
        &self.aircraft
    }

    pub fn substitutions(&self) -> &SubstitutionSet {
        &self.substitutions
    }
}

/// Per-trip cost model averaging the revenue and deadhead missions.
#[derive(Debug, Clone)]
pub struct MissionCostModel {
    aircraft: Arc<AircraftModel>,
    revenue: Arc<MissionModel>,
    deadhead: Arc<MissionModel>,
    substitutions: SubstitutionSet,
}

impl MissionCostModel {
    pub fn new(
        aircraft: Arc<AircraftModel>,
        revenue: Arc<MissionModel>,
        deadhead: Arc<MissionModel>,
        substitutions: SubstitutionSet,
    ) -> Result<Self, SubstitutionError> {
        assert_eq!(revenue.kind(), MissionKind::Revenue);
        assert_eq!(deadhead.kind(), MissionKind::Deadhead);
        substitutions.ensure_within(&ModelKind::MissionCost.root())?;
        Ok(Self {
            aircraft,
            revenue,
            deadhead,
            substitutions,
        })
    }

    pub fn aircraft(&self) -> &Arc<AircraftModel> {
        &self.aircraft
    }

    pub fn revenue(&self) -> &Arc<MissionModel> {
        &self.revenue
    }

    pub fn deadhead(&self) -> &Arc<MissionModel> {
        &self.deadhead
    }

    pub fn substitutions(&self) -> &SubstitutionSet {
        &self.substitutions
    }
}

fn missing(set: &SubstitutionSet, kind: ModelKind, required: &[&str]) -> Vec<VarPath> {
    required
        .iter()
        .map(|name| kind.var(name))
        .filter(|path| !set.contains(path))
        .collect()
}

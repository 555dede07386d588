//! Mission and cost substitutions shared by every configuration.

use uam_core::Quantity;
use uam_core::constants::NEGLIGIBLE_COUNT;
use uam_model::names::{cost, mission};
use uam_model::{MissionKind, MissionSpecs, ModelKind, SubstitutionSet};
use uom::si::energy::kilowatt_hour;
use uom::si::f64::{Energy, Force, Length, Power, Time};
use uom::si::force::pound_force;
use uom::si::length::nautical_mile;
use uom::si::power::kilowatt;
use uom::si::time::{hour, minute, second};

use crate::scenario::{ReserveType, Scenario};

const PILOTS_PER_PILOTED_AIRCRAFT: f64 = 1.5;
/// One remote pilot supervises eight aircraft.
const PILOTS_PER_REMOTE_AIRCRAFT: f64 = 1.0 / 8.0;

/// Substitutions for all three missions under `scenario`.
pub fn mission_specs(scenario: &Scenario) -> MissionSpecs {
    MissionSpecs {
        sizing: sizing_mission(scenario),
        revenue: revenue_mission(scenario),
        deadhead: deadhead_mission(scenario),
    }
}

pub fn sizing_mission(scenario: &Scenario) -> SubstitutionSet {
    let kind = MissionKind::Sizing;
    let mut set = SubstitutionSet::new();
    payload(&mut set, kind, 3.0, scenario.piloting.sizing);
    hover_segments(&mut set, kind, Time::new::<minute>(2.0).into());
    set.set(
        kind.var(mission::CRUISE_DISTANCE),
        scenario.constants().cruise_distances.sizing,
    );
    reserve(&mut set, scenario.reserve);
    set
}

pub fn revenue_mission(scenario: &Scenario) -> SubstitutionSet {
    let kind = MissionKind::Revenue;
    let mut set = SubstitutionSet::new();
    payload(&mut set, kind, 3.0, scenario.piloting.revenue);
    hover_segments(&mut set, kind, Time::new::<second>(30.0).into());
    set.set(
        kind.var(mission::CRUISE_DISTANCE),
        scenario.constants().cruise_distances.revenue,
    );
    ground_segment(&mut set, kind);
    set
}

pub fn deadhead_mission(scenario: &Scenario) -> SubstitutionSet {
    let kind = MissionKind::Deadhead;
    let mut set = SubstitutionSet::new();
    payload(&mut set, kind, NEGLIGIBLE_COUNT, scenario.piloting.deadhead);
    hover_segments(&mut set, kind, Time::new::<second>(30.0).into());
    set.set(
        kind.var(mission::CRUISE_DISTANCE),
        scenario.constants().cruise_distances.deadhead,
    );
    ground_segment(&mut set, kind);
    set
}

/// Cost-model substitutions. Both branches share wrap rates and fractions;
/// pilot staffing follows each mission's piloting flag.
pub fn mission_cost(scenario: &Scenario) -> SubstitutionSet {
    let mut set = SubstitutionSet::new();
    set.set(ModelKind::MissionCost.var(cost::DEADHEAD_RATIO), 0.2);

    let per_hour = |rate: f64| Quantity::per(rate, Time::new::<hour>(1.0));
    for (branch, piloted) in [
        (cost::REVENUE, scenario.piloting.revenue),
        (cost::DEADHEAD, scenario.piloting.deadhead),
    ] {
        let mut put = |name: &str, value: Quantity| {
            set.set(
                ModelKind::MissionCost.var(&cost::in_branch(branch, name)),
                value,
            );
        };
        put(cost::PILOT_WRAP_RATE, per_hour(70.0));
        put(cost::MAINTENANCE_WRAP_RATE, per_hour(60.0));
        put(cost::MAINTENANCE_MMH_FH, Quantity::dimensionless(0.6));
        put(
            cost::ENERGY_COST_PER_ENERGY,
            Quantity::per(0.12, Energy::new::<kilowatt_hour>(1.0)),
        );
        put(cost::IOC_FRACTION, Quantity::dimensionless(0.12));
        let pilots = if piloted {
            PILOTS_PER_PILOTED_AIRCRAFT
        } else {
            PILOTS_PER_REMOTE_AIRCRAFT
        };
        put(cost::PILOTS_PER_AIRCRAFT, Quantity::dimensionless(pilots));
    }
    set
}

fn payload(set: &mut SubstitutionSet, kind: MissionKind, passengers: f64, piloted: bool) {
    set.set(
        kind.var(mission::CREW_UNIT_WEIGHT),
        Force::new::<pound_force>(190.0),
    );
    set.set(
        kind.var(mission::PASSENGER_UNIT_WEIGHT),
        Force::new::<pound_force>(200.0),
    );
    set.set(kind.var(mission::PASSENGER_COUNT), passengers);
    let crew = if piloted { 1.0 } else { NEGLIGIBLE_COUNT };
    set.set(kind.var(mission::CREW_COUNT), crew);
}

fn hover_segments(set: &mut SubstitutionSet, kind: MissionKind, duration: Quantity) {
    set.set(kind.var(mission::TAKEOFF_DURATION), duration);
    set.set(kind.var(mission::LANDING_DURATION), duration);
}

fn ground_segment(set: &mut SubstitutionSet, kind: MissionKind) {
    set.set(
        kind.var(mission::PASSENGER_GROUND_TIME),
        Time::new::<minute>(5.0),
    );
    set.set(kind.var(mission::CHARGER_POWER), Power::new::<kilowatt>(200.0));
    set.set(kind.var(mission::CHARGER_EFFICIENCY), 0.9);
}

fn reserve(set: &mut SubstitutionSet, reserve: ReserveType) {
    let kind = MissionKind::Sizing;
    // Best-endurance loiter flies at (1/3)^(1/4) of best-range speed and
    // √3/2 of the best-range L/D.
    let loiter_v = (1.0_f64 / 3.0).powf(0.25);
    let loiter_l_d = 3.0_f64.sqrt() / 2.0;
    let (v_nondim, l_d_nondim) = match reserve {
        ReserveType::Loiter20Min => {
            set.set(kind.var(mission::RESERVE_DURATION), Time::new::<minute>(20.0));
            (loiter_v, loiter_l_d)
        }
        ReserveType::Loiter30Min => {
            set.set(kind.var(mission::RESERVE_DURATION), Time::new::<minute>(30.0));
            (loiter_v, loiter_l_d)
        }
        ReserveType::Diversion5Nmi => {
            set.set(
                kind.var(mission::RESERVE_DISTANCE),
                Length::new::<nautical_mile>(5.0),
            );
            (1.0, 1.0)
        }
        ReserveType::Diversion2Nmi => {
            set.set(
                kind.var(mission::RESERVE_DISTANCE),
                Length::new::<nautical_mile>(2.0),
            );
            (1.0, 1.0)
        }
    };
    set.set(kind.var(mission::V_RESERVE_NONDIM), v_nondim);
    set.set(kind.var(mission::L_D_RESERVE_NONDIM), l_d_nondim);
}

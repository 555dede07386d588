//! Variable names, relative to the owning sub-model.
//!
//! Inputs are the names substitution tables write to; outputs are the names
//! reports read back from a solution.

/// Names under `OnDemandAircraft`.
pub mod aircraft {
    pub const G: &str = "g";
    pub const ETA_LEVEL_FLIGHT: &str = "eta_levelFlight";
    pub const EMPTY_MASS_FRACTION: &str = "empty_mass_fraction";
    pub const V_CRUISE: &str = "v_cruise";
    pub const L_D_CRUISE: &str = "L_D_cruise";
    pub const TAIL_ROTOR_POWER_FRACTION_HOVER: &str = "tailRotor_power_fraction_hover";
    pub const TAIL_ROTOR_POWER_FRACTION_LEVEL_FLIGHT: &str = "tailRotor_power_fraction_levelFlight";

    pub const AIRFRAME_COST_PER_WEIGHT: &str = "Airframe.cost_per_weight";
    pub const AIRFRAME_LIFETIME: &str = "Airframe.lifetime";
    pub const AVIONICS_LIFETIME: &str = "Avionics.lifetime";
    pub const AVIONICS_PURCHASE_PRICE: &str = "Avionics.purchase_price";

    pub const BATTERY_E_FRAC: &str = "Battery.E_frac";
    pub const BATTERY_SPECIFIC_ENERGY: &str = "Battery.e";
    pub const BATTERY_SPECIFIC_POWER: &str = "Battery.p";
    pub const BATTERY_COST_PER_ENERGY: &str = "Battery.cost_per_energy";
    pub const BATTERY_CYCLE_LIFE: &str = "Battery.cycle_life";

    pub const ROTORS_BLADES: &str = "Rotors.B";
    pub const ROTORS_SOLIDITY: &str = "Rotors.s";
    pub const ROTORS_T_C: &str = "Rotors.t_c";
    pub const ROTORS_KI: &str = "Rotors.ki";
    pub const ROTORS_CD0: &str = "Rotors.Cd0";
    pub const ROTORS_M_TIP_MAX: &str = "Rotors.M_tip_max";
    pub const ROTORS_N: &str = "Rotors.N";
    pub const ROTORS_T_A_MAX: &str = "Rotors.T_A_max";
    pub const ROTORS_CL_MEAN_MAX: &str = "Rotors.Cl_mean_max";

    pub const ELECTRICAL_SYSTEM_ETA: &str = "ElectricalSystem.eta";

    // Outputs.
    pub const MTOM: &str = "MTOM";
    pub const AIRFRAME_MASS: &str = "Airframe.m";
    pub const BATTERY_MASS: &str = "Battery.m";
    pub const AIRFRAME_PURCHASE_PRICE: &str = "Airframe.purchase_price";
    pub const BATTERY_PURCHASE_PRICE: &str = "Battery.purchase_price";
    pub const ROTORS_DIAMETER: &str = "Rotors.D";
    pub const ROTORS_TOTAL_AREA: &str = "Rotors.A_total";
    pub const ROTORS_MEAN_CHORD: &str = "Rotors.c_avg";
    pub const ROTORS_MEAN_THICKNESS: &str = "Rotors.t_avg";
}

/// Names under any of the three mission sub-models.
pub mod mission {
    pub const CREW_UNIT_WEIGHT: &str = "Crew.W_unit";
    pub const CREW_COUNT: &str = "Crew.N";
    pub const PASSENGER_UNIT_WEIGHT: &str = "Passengers.W_unit";
    pub const PASSENGER_COUNT: &str = "Passengers.N";
    pub const TAKEOFF_DURATION: &str = "HoverTakeoff.t_segment";
    pub const CRUISE_DISTANCE: &str = "Cruise.d_segment";
    pub const LANDING_DURATION: &str = "HoverLanding.t_segment";
    pub const RESERVE_DURATION: &str = "Reserve.t_segment";
    pub const RESERVE_DISTANCE: &str = "Reserve.d_segment";
    pub const V_RESERVE_NONDIM: &str = "v_reserve_nondim";
    pub const L_D_RESERVE_NONDIM: &str = "L_D_reserve_nondim";
    pub const PASSENGER_GROUND_TIME: &str = "TimeOnGround.t_passenger";
    pub const CHARGER_POWER: &str = "TimeOnGround.Charger.P";
    pub const CHARGER_EFFICIENCY: &str = "TimeOnGround.Charger.eta";

    // Outputs.
    pub const FLIGHT_TIME: &str = "t_flight";
    pub const MISSION_TIME: &str = "t_mission";
    pub const GROUND_TIME: &str = "TimeOnGround.t_segment";

    pub const HOVER_THRUST_PER_ROTOR: &str = "HoverTakeoff.RotorsPerformance.T_perRotor";
    pub const HOVER_DISK_LOADING: &str = "HoverTakeoff.RotorsPerformance.T_A";
    pub const HOVER_TIP_SPEED: &str = "HoverTakeoff.RotorsPerformance.v_tip";
    pub const HOVER_TIP_MACH: &str = "HoverTakeoff.RotorsPerformance.M_tip";
    pub const HOVER_MEAN_LIFT_COEFFICIENT: &str = "HoverTakeoff.RotorsPerformance.Cl_mean";
    pub const HOVER_THRUST_COEFFICIENT: &str = "HoverTakeoff.RotorsPerformance.CT";
    pub const HOVER_POWER_COEFFICIENT: &str = "HoverTakeoff.RotorsPerformance.CP";
    pub const HOVER_FIGURE_OF_MERIT: &str = "HoverTakeoff.RotorsPerformance.FOM";
    pub const HOVER_AIR_DENSITY: &str = "HoverTakeoff.FlightState.rho";

    pub const CRUISE_ENERGY: &str = "Cruise.BatteryPerformance.E";
    pub const TAKEOFF_ENERGY: &str = "HoverTakeoff.BatteryPerformance.E";
    pub const LANDING_ENERGY: &str = "HoverLanding.BatteryPerformance.E";
    pub const RESERVE_ENERGY: &str = "Reserve.BatteryPerformance.E";

    pub const CRUISE_ELECTRIC_POWER: &str = "Cruise.P_electric";
    pub const HOVER_ELECTRIC_POWER: &str = "HoverTakeoff.P_electric";
    pub const RESERVE_ELECTRIC_POWER: &str = "Reserve.P_electric";
}

/// Names under `OnDemandMissionCost`.
pub mod cost {
    pub const DEADHEAD_RATIO: &str = "deadhead_ratio";

    /// Revenue-mission branch of the cost model.
    pub const REVENUE: &str = "RevenueMissionCost";
    /// Deadhead-mission branch of the cost model.
    pub const DEADHEAD: &str = "DeadheadMissionCost";

    // Relative to a branch.
    pub const PILOT_WRAP_RATE: &str = "OperatingExpenses.PilotCost.wrap_rate";
    pub const PILOTS_PER_AIRCRAFT: &str = "OperatingExpenses.PilotCost.pilots_per_aircraft";
    pub const MAINTENANCE_WRAP_RATE: &str = "OperatingExpenses.MaintenanceCost.wrap_rate";
    pub const MAINTENANCE_MMH_FH: &str = "OperatingExpenses.MaintenanceCost.MMH_FH";
    pub const ENERGY_COST_PER_ENERGY: &str = "OperatingExpenses.EnergyCost.cost_per_energy";
    pub const IOC_FRACTION: &str = "OperatingExpenses.IOC_fraction";

    pub const AIRFRAME_ACQUISITION_PER_MISSION: &str =
        "CapitalExpenses.AirframeAcquisitionCost.cost_per_mission";
    pub const AVIONICS_ACQUISITION_PER_MISSION: &str =
        "CapitalExpenses.AvionicsAcquisitionCost.cost_per_mission";
    pub const BATTERY_ACQUISITION_PER_MISSION: &str =
        "CapitalExpenses.BatteryAcquisitionCost.cost_per_mission";
    pub const PILOT_COST_PER_MISSION: &str = "OperatingExpenses.PilotCost.cost_per_mission";
    pub const MAINTENANCE_COST_PER_MISSION: &str =
        "OperatingExpenses.MaintenanceCost.cost_per_mission";
    pub const ENERGY_COST_PER_MISSION: &str = "OperatingExpenses.EnergyCost.cost_per_mission";
    pub const IOC_PER_MISSION: &str = "OperatingExpenses.IndirectOperatingCost.cost_per_mission";

    // Outputs at the cost-model root.
    pub const COST_PER_TRIP: &str = "cost_per_trip";
    pub const REVENUE_COST_PER_TRIP: &str = "revenue_cost_per_trip";
    pub const DEADHEAD_COST_PER_TRIP: &str = "deadhead_cost_per_trip";
    pub const COST_PER_PASSENGER_KM: &str = "cost_per_passenger_km";
    pub const COST_PER_TRIP_PER_PASSENGER: &str = "cost_per_trip_per_passenger";

    /// `branch.name`, e.g. `RevenueMissionCost.OperatingExpenses.IOC_fraction`.
    pub fn in_branch(branch: &str, name: &str) -> String {
        format!("{branch}.{name}")
    }
}

//! The rotorcraft configurations under study and their table entries.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use uam_config::SweepConfig;

use crate::ResolveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Configuration {
    #[serde(rename = "Helicopter")]
    Helicopter,
    #[serde(rename = "Coaxial heli")]
    CoaxialHeli,
    #[serde(rename = "Compound heli")]
    CompoundHeli,
    #[serde(rename = "Multirotor")]
    Multirotor,
    #[serde(rename = "Lift + cruise")]
    LiftCruise,
    #[serde(rename = "Tilt wing")]
    TiltWing,
    #[serde(rename = "Tilt rotor")]
    TiltRotor,
    #[serde(rename = "Tilt duct")]
    TiltDuct,
    #[serde(rename = "Autogyro")]
    Autogyro,
}

/// Groups sharing a time-frame cruise-speed cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Rotorcraft,
    Multirotor,
    Winged,
}

/// Configuration-specific aircraft inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfigurationData {
    pub empty_mass_fraction: f64,
    pub v_cruise_mph: f64,
    pub l_d_cruise: f64,
    pub tail_rotor_power_fraction_hover: f64,
    pub tail_rotor_power_fraction_level_flight: f64,
    pub rotor_count: f64,
    pub disk_loading_max_lbf_ft2: f64,
    pub cl_mean_max: f64,
}

impl Configuration {
    pub const ALL: [Configuration; 9] = [
        Configuration::Helicopter,
        Configuration::CoaxialHeli,
        Configuration::CompoundHeli,
        Configuration::Multirotor,
        Configuration::LiftCruise,
        Configuration::TiltWing,
        Configuration::TiltRotor,
        Configuration::TiltDuct,
        Configuration::Autogyro,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Configuration::Helicopter => "Helicopter",
            Configuration::CoaxialHeli => "Coaxial heli",
            Configuration::CompoundHeli => "Compound heli",
            Configuration::Multirotor => "Multirotor",
            Configuration::LiftCruise => "Lift + cruise",
            Configuration::TiltWing => "Tilt wing",
            Configuration::TiltRotor => "Tilt rotor",
            Configuration::TiltDuct => "Tilt duct",
            Configuration::Autogyro => "Autogyro",
        }
    }

    pub fn family(self) -> Family {
        match self {
            Configuration::Helicopter
            | Configuration::CoaxialHeli
            | Configuration::CompoundHeli
            | Configuration::Autogyro => Family::Rotorcraft,
            Configuration::Multirotor => Family::Multirotor,
            Configuration::LiftCruise
            | Configuration::TiltWing
            | Configuration::TiltRotor
            | Configuration::TiltDuct => Family::Winged,
        }
    }

    pub fn data(self) -> ConfigurationData {
        let row = |emf, v, l_d, tr_hover, tr_level, n, t_a, cl| ConfigurationData {
            empty_mass_fraction: emf,
            v_cruise_mph: v,
            l_d_cruise: l_d,
            tail_rotor_power_fraction_hover: tr_hover,
            tail_rotor_power_fraction_level_flight: tr_level,
            rotor_count: n,
            disk_loading_max_lbf_ft2: t_a,
            cl_mean_max: cl,
        };
        match self {
            Configuration::Multirotor => row(0.43, 50.0, 3.5, 0.001, 0.001, 8.0, 3.75, 0.6),
            Configuration::Autogyro => row(0.50, 100.0, 3.5, 0.001, 0.001, 1.0, 3.75, 0.8),
            Configuration::Helicopter => row(0.43, 100.0, 4.25, 0.15, 0.15, 1.0, 4.5, 0.6),
            Configuration::TiltDuct => row(0.55, 150.0, 10.0, 0.001, 0.001, 36.0, 40.0, 1.0),
            Configuration::CoaxialHeli => row(0.43, 150.0, 5.5, 0.001, 0.001, 2.0, 7.0, 0.6),
            Configuration::LiftCruise => row(0.53, 93.0, 10.0, 0.005, 0.005, 8.0, 15.0, 1.0),
            Configuration::TiltWing => row(0.55, 150.0, 12.0, 0.005, 0.005, 8.0, 15.0, 1.0),
            Configuration::CompoundHeli => row(0.50, 150.0, 9.0, 0.15, 0.10, 1.0, 4.5, 0.8),
            Configuration::TiltRotor => row(0.55, 150.0, 14.0, 0.005, 0.005, 12.0, 15.0, 1.0),
        }
    }

    /// Battery specific-energy range swept when the study file names none.
    ///
    /// Configurations with heavier hover power start higher, where they
    /// first become feasible.
    pub fn default_battery_sweep(self) -> SweepConfig {
        let (start, steps) = match self {
            Configuration::Helicopter => (350.0, 10),
            Configuration::CoaxialHeli => (300.0, 11),
            Configuration::LiftCruise => (250.0, 13),
            _ => (200.0, 15),
        };
        SweepConfig {
            start_wh_per_kg: start,
            end_wh_per_kg: 600.0,
            steps,
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Configuration {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|config| config.name() == s)
            .ok_or_else(|| ResolveError::UnknownConfiguration(s.to_string()))
    }
}

//! Aircraft substitutions: generic constants plus the configuration row.

use tracing::debug;
use uam_config::AircraftOverrides;
use uam_core::Quantity;
use uam_core::constants::{GRAVITY_M_S2, NEGLIGIBLE_PRICE_USD};
use uam_model::names::aircraft as av;
use uam_model::{ModelKind, SubstitutionSet};
use uom::si::acceleration::meter_per_second_squared;
use uom::si::area::square_foot;
use uom::si::energy::{kilowatt_hour, watt_hour};
use uom::si::f64::{Acceleration, Area, Energy, Force, Mass, Power, Time, Velocity};
use uom::si::force::pound_force;
use uom::si::mass::kilogram;
use uom::si::power::kilowatt;
use uom::si::time::hour;
use uom::si::velocity::mile_per_hour;

use crate::ResolveError;
use crate::configuration::{Configuration, ConfigurationData};
use crate::scenario::Scenario;

const BATTERY_SPECIFIC_ENERGY_WH_KG: f64 = 300.0;
const AVIONICS_PRICE_AUTONOMOUS_USD: f64 = 60_000.0;

/// Aircraft substitutions for a configuration named in a study file.
pub fn resolve(configuration: &str, scenario: &Scenario) -> Result<SubstitutionSet, ResolveError> {
    resolve_with(configuration, scenario, &AircraftOverrides::default())
}

/// As [`resolve`], with study-file overrides replacing table entries. The
/// time-frame cruise-speed cap applies after overrides.
pub fn resolve_with(
    configuration: &str,
    scenario: &Scenario,
    overrides: &AircraftOverrides,
) -> Result<SubstitutionSet, ResolveError> {
    let configuration: Configuration = configuration.parse()?;
    let data = apply_overrides(configuration, configuration.data(), overrides)?;
    let battery_e = overrides
        .battery_wh_per_kg
        .map(|e| positive(configuration, "battery_wh_per_kg", e))
        .transpose()?
        .unwrap_or(BATTERY_SPECIFIC_ENERGY_WH_KG);
    let set = build(configuration, &data, battery_e, scenario)?;
    debug!(%configuration, substitutions = set.len(), "resolved aircraft");
    Ok(set)
}

fn build(
    configuration: Configuration,
    data: &ConfigurationData,
    battery_wh_per_kg: f64,
    scenario: &Scenario,
) -> Result<SubstitutionSet, ResolveError> {
    let mut set = SubstitutionSet::new();
    let mut put = |name: &str, value: Quantity| {
        set.set(ModelKind::Aircraft.var(name), value);
    };

    let lbf = Force::new::<pound_force>(1.0);
    let kg = Mass::new::<kilogram>(1.0);

    put(
        av::G,
        Acceleration::new::<meter_per_second_squared>(GRAVITY_M_S2).into(),
    );
    put(av::ETA_LEVEL_FLIGHT, Quantity::dimensionless(0.85));
    put(av::AIRFRAME_COST_PER_WEIGHT, Quantity::per(350.0, lbf));
    put(av::AIRFRAME_LIFETIME, Time::new::<hour>(20_000.0).into());
    put(av::AVIONICS_LIFETIME, Time::new::<hour>(20_000.0).into());
    put(av::BATTERY_E_FRAC, Quantity::dimensionless(0.64));
    put(
        av::BATTERY_SPECIFIC_ENERGY,
        (Energy::new::<watt_hour>(battery_wh_per_kg) / kg).into(),
    );
    put(
        av::BATTERY_SPECIFIC_POWER,
        (Power::new::<kilowatt>(3.0) / kg).into(),
    );
    put(
        av::BATTERY_COST_PER_ENERGY,
        Quantity::per(400.0, Energy::new::<kilowatt_hour>(1.0)),
    );
    put(av::BATTERY_CYCLE_LIFE, Quantity::dimensionless(2000.0));
    put(av::ROTORS_BLADES, Quantity::dimensionless(5.0));
    put(av::ROTORS_SOLIDITY, Quantity::dimensionless(0.1));
    put(av::ROTORS_T_C, Quantity::dimensionless(0.12));
    put(av::ROTORS_KI, Quantity::dimensionless(1.2));
    put(av::ROTORS_CD0, Quantity::dimensionless(0.01));
    put(av::ROTORS_M_TIP_MAX, Quantity::dimensionless(0.9));
    put(av::ELECTRICAL_SYSTEM_ETA, Quantity::dimensionless(0.9));

    let avionics_price = if scenario.autonomous_enabled {
        AVIONICS_PRICE_AUTONOMOUS_USD
    } else {
        NEGLIGIBLE_PRICE_USD
    };
    put(av::AVIONICS_PURCHASE_PRICE, avionics_price.into());

    let mut v_cruise: Quantity = Velocity::new::<mile_per_hour>(data.v_cruise_mph).into();
    if let Some(cap) = scenario
        .constants()
        .cruise_speed_caps
        .for_family(configuration.family())
    {
        v_cruise = v_cruise.min(cap)?;
    }

    put(av::EMPTY_MASS_FRACTION, data.empty_mass_fraction.into());
    put(av::V_CRUISE, v_cruise);
    put(av::L_D_CRUISE, data.l_d_cruise.into());
    put(
        av::TAIL_ROTOR_POWER_FRACTION_HOVER,
        data.tail_rotor_power_fraction_hover.into(),
    );
    put(
        av::TAIL_ROTOR_POWER_FRACTION_LEVEL_FLIGHT,
        data.tail_rotor_power_fraction_level_flight.into(),
    );
    put(av::ROTORS_N, data.rotor_count.into());
    put(
        av::ROTORS_T_A_MAX,
        (Force::new::<pound_force>(data.disk_loading_max_lbf_ft2)
            / Area::new::<square_foot>(1.0))
        .into(),
    );
    put(av::ROTORS_CL_MEAN_MAX, data.cl_mean_max.into());

    Ok(set)
}

fn apply_overrides(
    configuration: Configuration,
    mut data: ConfigurationData,
    overrides: &AircraftOverrides,
) -> Result<ConfigurationData, ResolveError> {
    let fields = [
        (
            "empty_mass_fraction",
            overrides.empty_mass_fraction,
            &mut data.empty_mass_fraction,
        ),
        ("v_cruise_mph", overrides.v_cruise_mph, &mut data.v_cruise_mph),
        ("l_d_cruise", overrides.l_d_cruise, &mut data.l_d_cruise),
        ("rotor_count", overrides.rotor_count, &mut data.rotor_count),
        (
            "disk_loading_lbf_ft2",
            overrides.disk_loading_lbf_ft2,
            &mut data.disk_loading_max_lbf_ft2,
        ),
        ("cl_mean_max", overrides.cl_mean_max, &mut data.cl_mean_max),
    ];
    for (field, value, slot) in fields {
        if let Some(value) = value {
            *slot = positive(configuration, field, value)?;
        }
    }
    Ok(data)
}

fn positive(
    configuration: Configuration,
    field: &'static str,
    value: f64,
) -> Result<f64, ResolveError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ResolveError::InvalidOverride {
            configuration: configuration.name().to_string(),
            field,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{TimeFrame, UseCase};
    use approx::assert_relative_eq;
    use uam_core::Unit;
    use uam_model::AircraftModel;

    fn value(set: &SubstitutionSet, name: &str, unit: Unit) -> f64 {
        set.get(&ModelKind::Aircraft.var(name))
            .unwrap()
            .value_in(unit)
            .unwrap()
    }

    fn near() -> Scenario {
        Scenario::new(TimeFrame::Near, UseCase::IntraCity)
    }

    #[test]
    fn every_configuration_is_complete() {
        for config in Configuration::ALL {
            let set = resolve(config.name(), &near()).unwrap();
            let aircraft = AircraftModel::new(set).unwrap();
            assert!(
                aircraft.missing_required().is_empty(),
                "{config} is missing {:?}",
                aircraft.missing_required()
            );
        }
    }

    #[test]
    fn resolution_is_deterministic() {
        let scenario = near();
        for config in Configuration::ALL {
            let first = resolve(config.name(), &scenario).unwrap();
            let second = resolve(config.name(), &scenario).unwrap();
            assert_eq!(first, second);
            for ((_, a), (_, b)) in first.iter().zip(second.iter()) {
                assert_eq!(a.value_si().to_bits(), b.value_si().to_bits());
            }
        }
    }

    #[test]
    fn lift_plus_cruise_in_2025() {
        let set = resolve("Lift + cruise", &near()).unwrap();
        assert_eq!(value(&set, av::EMPTY_MASS_FRACTION, Unit::Dimensionless), 0.53);
        assert_relative_eq!(
            value(&set, av::V_CRUISE, Unit::MilePerHour),
            93.0,
            max_relative = 1e-12
        );
        assert_eq!(value(&set, av::L_D_CRUISE, Unit::Dimensionless), 10.0);
        assert_eq!(value(&set, av::ROTORS_N, Unit::Dimensionless), 8.0);
    }

    #[test]
    fn helicopter_in_2025_and_generic() {
        for time_frame in [TimeFrame::Near, TimeFrame::Generic] {
            let set = resolve("Helicopter", &Scenario::new(time_frame, UseCase::IntraCity)).unwrap();
            assert_eq!(
                value(&set, av::TAIL_ROTOR_POWER_FRACTION_HOVER, Unit::Dimensionless),
                0.15
            );
            assert_eq!(value(&set, av::ROTORS_N, Unit::Dimensionless), 1.0);
        }
    }

    #[test]
    fn unknown_configuration_fails() {
        let err = resolve("Hoverbike", &near()).unwrap_err();
        assert_eq!(err, ResolveError::UnknownConfiguration("Hoverbike".into()));
        assert_eq!(err.to_string(), "Configuration Hoverbike not recognized.");
    }

    #[test]
    fn avionics_price_follows_autonomy() {
        let mut scenario = near();
        let set = resolve("Tilt rotor", &scenario).unwrap();
        assert_eq!(value(&set, av::AVIONICS_PURCHASE_PRICE, Unit::Usd), 60_000.0);
        scenario.autonomous_enabled = false;
        let set = resolve("Tilt rotor", &scenario).unwrap();
        assert_eq!(value(&set, av::AVIONICS_PURCHASE_PRICE, Unit::Usd), 1.0);
    }

    #[test]
    fn overrides_are_clipped_by_time_frame_caps() {
        let overrides = AircraftOverrides {
            v_cruise_mph: Some(200.0),
            rotor_count: Some(4.0),
            battery_wh_per_kg: Some(450.0),
            ..Default::default()
        };
        let set = resolve_with("Multirotor", &near(), &overrides).unwrap();
        assert_relative_eq!(
            value(&set, av::V_CRUISE, Unit::MilePerHour),
            50.0,
            max_relative = 1e-12
        );
        assert_eq!(value(&set, av::ROTORS_N, Unit::Dimensionless), 4.0);
        assert_relative_eq!(
            value(&set, av::BATTERY_SPECIFIC_ENERGY, Unit::WattHourPerKilogram),
            450.0,
            max_relative = 1e-12
        );

        let generic = Scenario::new(TimeFrame::Generic, UseCase::IntraCity);
        let set = resolve_with("Multirotor", &generic, &overrides).unwrap();
        assert_relative_eq!(
            value(&set, av::V_CRUISE, Unit::MilePerHour),
            200.0,
            max_relative = 1e-12
        );

        let set = resolve_with("Tilt wing", &near(), &overrides).unwrap();
        assert_relative_eq!(
            value(&set, av::V_CRUISE, Unit::MilePerHour),
            200.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn non_positive_overrides_fail() {
        let overrides = AircraftOverrides {
            l_d_cruise: Some(0.0),
            ..Default::default()
        };
        assert!(matches!(
            resolve_with("Helicopter", &near(), &overrides),
            Err(ResolveError::InvalidOverride { field: "l_d_cruise", .. })
        ));
    }

    #[test]
    fn disk_loading_is_a_pressure() {
        let set = resolve("Tilt duct", &near()).unwrap();
        let t_a = set.get(&ModelKind::Aircraft.var(av::ROTORS_T_A_MAX)).unwrap();
        // 40 lbf/ft² is about 1915 Pa.
        assert_relative_eq!(t_a.value_si(), 1915.2, max_relative = 1e-3);
    }
}

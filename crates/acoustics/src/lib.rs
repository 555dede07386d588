//! Hover rotor noise for solved designs.
//!
//! The vortex-noise model is an external service. This crate gathers its
//! inputs from a [`Solution`], calls it through [`NoiseModel`], and keeps
//! the unweighted and A-weighted results together.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uam_config::{AcousticsConfig, CommandConfig};
use uam_core::Unit;
use uam_model::names::{aircraft as av, mission};
use uam_model::{MissionKind, ModelKind, VarPath};
use uam_solver::{CommandError, ExtractError, JsonCommand, Solution};
use uom::si::f64::Length;
use uom::si::length::{foot, meter};

/// Frequency weighting applied to the spectrum before summing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weighting {
    None,
    A,
}

/// Rotor state at sizing-mission takeoff plus the observer geometry, in SI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcousticInputs {
    pub thrust_per_rotor_n: f64,
    pub disk_loading_pa: f64,
    pub tip_speed_m_s: f64,
    pub solidity: f64,
    pub mean_lift_coefficient: f64,
    pub rotor_count: f64,
    pub mean_chord_m: f64,
    pub mean_thickness_m: f64,
    pub air_density_kg_m3: f64,
    pub observer_distance_m: f64,
    pub strouhal_number: f64,
}

/// Peak frequency and overall sound pressure level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseEstimate {
    pub peak_frequency_hz: f64,
    pub spl_db: f64,
}

/// Both weightings for one design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverNoise {
    pub unweighted: NoiseEstimate,
    pub a_weighted: NoiseEstimate,
}

#[derive(Debug, Error)]
pub enum NoiseError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("noise model failed: {0}")]
    Failed(String),
}

#[derive(Debug, Error)]
pub enum AcousticsError {
    #[error("acoustic input unavailable: {0}")]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Noise(#[from] NoiseError),
}

/// Something able to estimate rotor vortex noise.
pub trait NoiseModel {
    fn estimate(
        &self,
        inputs: &AcousticInputs,
        weighting: Weighting,
    ) -> Result<NoiseEstimate, NoiseError>;
}

impl AcousticInputs {
    /// Read the hover rotor state from the sizing mission's takeoff segment.
    pub fn from_solution(
        solution: &Solution,
        acoustics: &AcousticsConfig,
    ) -> Result<Self, ExtractError> {
        let sizing = |name: &str| MissionKind::Sizing.var(name);
        let aircraft = |name: &str| ModelKind::Aircraft.var(name);
        let get = |path: VarPath, unit: Unit| solution.extract(&path, unit);

        Ok(Self {
            thrust_per_rotor_n: get(sizing(mission::HOVER_THRUST_PER_ROTOR), Unit::Newton)?,
            disk_loading_pa: get(sizing(mission::HOVER_DISK_LOADING), Unit::Pascal)?,
            tip_speed_m_s: get(sizing(mission::HOVER_TIP_SPEED), Unit::MeterPerSecond)?,
            solidity: get(aircraft(av::ROTORS_SOLIDITY), Unit::Dimensionless)?,
            mean_lift_coefficient: get(
                sizing(mission::HOVER_MEAN_LIFT_COEFFICIENT),
                Unit::Dimensionless,
            )?,
            rotor_count: get(aircraft(av::ROTORS_N), Unit::Dimensionless)?,
            mean_chord_m: get(aircraft(av::ROTORS_MEAN_CHORD), Unit::Meter)?,
            mean_thickness_m: get(aircraft(av::ROTORS_MEAN_THICKNESS), Unit::Meter)?,
            air_density_kg_m3: get(
                sizing(mission::HOVER_AIR_DENSITY),
                Unit::KilogramPerCubicMeter,
            )?,
            observer_distance_m: Length::new::<foot>(acoustics.observer_distance_ft)
                .get::<meter>(),
            strouhal_number: acoustics.strouhal_number,
        })
    }
}

/// Estimate hover noise with and without A-weighting.
pub fn assess<M: NoiseModel + ?Sized>(
    model: &M,
    solution: &Solution,
    acoustics: &AcousticsConfig,
) -> Result<HoverNoise, AcousticsError> {
    let inputs = AcousticInputs::from_solution(solution, acoustics)?;
    let unweighted = model.estimate(&inputs, Weighting::None)?;
    let a_weighted = model.estimate(&inputs, Weighting::A)?;
    debug!(
        spl_db = unweighted.spl_db,
        spl_a_db = a_weighted.spl_db,
        peak_hz = unweighted.peak_frequency_hz,
        "hover noise"
    );
    Ok(HoverNoise {
        unweighted,
        a_weighted,
    })
}

#[derive(Serialize)]
struct NoiseRequest<'a> {
    inputs: &'a AcousticInputs,
    weighting: Weighting,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum NoiseReply {
    Ok {
        peak_frequency_hz: f64,
        spl_db: f64,
    },
    Error {
        #[serde(default)]
        message: String,
    },
}

/// [`NoiseModel`] backed by an external program over the JSON protocol.
#[derive(Debug, Clone)]
pub struct ExternalNoiseModel {
    command: JsonCommand,
}

impl ExternalNoiseModel {
    pub fn new(command: JsonCommand) -> Self {
        Self { command }
    }

    pub fn from_config(config: &CommandConfig) -> Self {
        Self::new(JsonCommand::from_config(config))
    }
}

impl NoiseModel for ExternalNoiseModel {
    fn estimate(
        &self,
        inputs: &AcousticInputs,
        weighting: Weighting,
    ) -> Result<NoiseEstimate, NoiseError> {
        let reply: NoiseReply = self.command.call(&NoiseRequest { inputs, weighting })?;
        match reply {
            NoiseReply::Ok {
                peak_frequency_hz,
                spl_db,
            } => Ok(NoiseEstimate {
                peak_frequency_hz,
                spl_db,
            }),
            NoiseReply::Error { message } => Err(NoiseError::Failed(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::BTreeMap;
    use uam_core::Quantity;
    use uom::si::f64::{Force, MassDensity, Pressure, Velocity};
    use uom::si::force::newton;
    use uom::si::mass_density::kilogram_per_cubic_meter;
    use uom::si::pressure::pascal;
    use uom::si::velocity::meter_per_second;

    fn hover_solution() -> Solution {
        let mut variables = BTreeMap::new();
        let sizing = |name: &str| MissionKind::Sizing.var(name);
        let aircraft = |name: &str| ModelKind::Aircraft.var(name);
        variables.insert(
            sizing(mission::HOVER_THRUST_PER_ROTOR),
            Force::new::<newton>(2_000.0).into(),
        );
        variables.insert(
            sizing(mission::HOVER_DISK_LOADING),
            Pressure::new::<pascal>(500.0).into(),
        );
        variables.insert(
            sizing(mission::HOVER_TIP_SPEED),
            Velocity::new::<meter_per_second>(180.0).into(),
        );
        variables.insert(
            sizing(mission::HOVER_MEAN_LIFT_COEFFICIENT),
            Quantity::dimensionless(0.9),
        );
        variables.insert(
            sizing(mission::HOVER_AIR_DENSITY),
            MassDensity::new::<kilogram_per_cubic_meter>(1.225).into(),
        );
        variables.insert(aircraft(av::ROTORS_SOLIDITY), Quantity::dimensionless(0.1));
        variables.insert(aircraft(av::ROTORS_N), Quantity::dimensionless(8.0));
        variables.insert(
            aircraft(av::ROTORS_MEAN_CHORD),
            Length::new::<meter>(0.12).into(),
        );
        variables.insert(
            aircraft(av::ROTORS_MEAN_THICKNESS),
            Length::new::<meter>(0.0144).into(),
        );
        Solution::new(Quantity::dimensionless(100.0), variables)
    }

    /// Returns the inputs it saw, shifted by the weighting.
    struct Fixed;

    impl NoiseModel for Fixed {
        fn estimate(
            &self,
            inputs: &AcousticInputs,
            weighting: Weighting,
        ) -> Result<NoiseEstimate, NoiseError> {
            let offset = match weighting {
                Weighting::None => 0.0,
                Weighting::A => -5.0,
            };
            Ok(NoiseEstimate {
                peak_frequency_hz: inputs.tip_speed_m_s,
                spl_db: 70.0 + offset,
            })
        }
    }

    #[test]
    fn inputs_come_from_the_solution_and_config() {
        let inputs =
            AcousticInputs::from_solution(&hover_solution(), &AcousticsConfig::default()).unwrap();
        assert_eq!(inputs.thrust_per_rotor_n, 2_000.0);
        assert_eq!(inputs.rotor_count, 8.0);
        assert_relative_eq!(inputs.mean_chord_m, 0.12);
        assert_relative_eq!(inputs.observer_distance_m, 152.4, epsilon = 1e-9);
        assert_eq!(inputs.strouhal_number, 0.28);
    }

    #[test]
    fn assess_runs_both_weightings() {
        let noise = assess(&Fixed, &hover_solution(), &AcousticsConfig::default()).unwrap();
        assert_eq!(noise.unweighted.spl_db, 70.0);
        assert_eq!(noise.a_weighted.spl_db, 65.0);
        assert_eq!(noise.unweighted.peak_frequency_hz, 180.0);
    }

    #[test]
    fn missing_inputs_are_reported() {
        let empty = Solution::new(Quantity::dimensionless(1.0), BTreeMap::new());
        let err = assess(&Fixed, &empty, &AcousticsConfig::default()).unwrap_err();
        assert!(matches!(err, AcousticsError::Extract(ExtractError::Missing(_))));
    }

    #[test]
    fn request_uses_the_wire_names() {
        let inputs =
            AcousticInputs::from_solution(&hover_solution(), &AcousticsConfig::default()).unwrap();
        let value = serde_json::to_value(NoiseRequest {
            inputs: &inputs,
            weighting: Weighting::A,
        })
        .unwrap();
        assert_eq!(value["weighting"], "A");
        assert_eq!(value["inputs"]["rotor_count"], 8.0);

        let reply: NoiseReply =
            serde_json::from_str(r#"{"status":"ok","peak_frequency_hz":210.0,"spl_db":68.2}"#)
                .unwrap();
        assert!(matches!(reply, NoiseReply::Ok { spl_db, .. } if spl_db == 68.2));
    }
}

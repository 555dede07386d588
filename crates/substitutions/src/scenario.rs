//! Scenario selection: time frame, use case, and mission flags.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use uam_config::StudyConfig;
use uam_core::Quantity;
use uom::si::f64::{Length, Velocity};
use uom::si::length::nautical_mile;
use uom::si::velocity::mile_per_hour;

use crate::ResolveError;
use crate::configuration::Family;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TimeFrame {
    #[serde(rename = "generic")]
    Generic,
    #[serde(rename = "2025")]
    Near,
    #[serde(rename = "2050")]
    Far,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UseCase {
    #[serde(rename = "Intra-City")]
    IntraCity,
    #[serde(rename = "Regional")]
    Regional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReserveType {
    #[serde(rename = "20-minute loiter")]
    Loiter20Min,
    #[serde(rename = "30-minute loiter")]
    Loiter30Min,
    #[serde(rename = "5-nmi diversion")]
    Diversion5Nmi,
    #[serde(rename = "2-nmi diversion")]
    Diversion2Nmi,
}

/// Which missions carry a pilot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Piloting {
    pub sizing: bool,
    pub revenue: bool,
    pub deadhead: bool,
}

/// Everything outside the configuration table that shapes the substitutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scenario {
    pub time_frame: TimeFrame,
    pub use_case: UseCase,
    pub autonomous_enabled: bool,
    pub reserve: ReserveType,
    pub piloting: Piloting,
}

/// Cruise distances per mission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CruiseDistances {
    pub sizing: Quantity,
    pub revenue: Quantity,
    pub deadhead: Quantity,
}

/// Cruise-speed ceilings per configuration family; `None` leaves the
/// table value untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CruiseSpeedCaps {
    pub rotorcraft: Option<Quantity>,
    pub multirotor: Option<Quantity>,
    pub winged: Option<Quantity>,
}

impl CruiseSpeedCaps {
    pub fn for_family(&self, family: Family) -> Option<Quantity> {
        match family {
            Family::Rotorcraft => self.rotorcraft,
            Family::Multirotor => self.multirotor,
            Family::Winged => self.winged,
        }
    }
}

/// Constants fixed by the (time frame, use case) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioConstants {
    pub cruise_distances: CruiseDistances,
    pub cruise_speed_caps: CruiseSpeedCaps,
}

impl ScenarioConstants {
    pub fn new(time_frame: TimeFrame, use_case: UseCase) -> Self {
        let nmi = |d: f64| Quantity::from(Length::new::<nautical_mile>(d));
        let mph = |v: f64| Quantity::from(Velocity::new::<mile_per_hour>(v));

        let cruise_distances = match use_case {
            UseCase::IntraCity => CruiseDistances {
                sizing: nmi(16.2),
                revenue: nmi(16.2),
                deadhead: nmi(30.0),
            },
            UseCase::Regional => CruiseDistances {
                sizing: nmi(50.0),
                revenue: nmi(50.0),
                deadhead: nmi(50.0),
            },
        };
        let cruise_speed_caps = match time_frame {
            TimeFrame::Near => CruiseSpeedCaps {
                rotorcraft: Some(mph(150.0)),
                multirotor: Some(mph(50.0)),
                winged: None,
            },
            TimeFrame::Generic | TimeFrame::Far => CruiseSpeedCaps {
                rotorcraft: None,
                multirotor: None,
                winged: None,
            },
        };
        Self {
            cruise_distances,
            cruise_speed_caps,
        }
    }
}

impl TimeFrame {
    pub fn name(self) -> &'static str {
        match self {
            TimeFrame::Generic => "generic",
            TimeFrame::Near => "2025",
            TimeFrame::Far => "2050",
        }
    }

    /// Piloting assumed when the study file leaves it open. Near-term
    /// aircraft fly passengers with a pilot; by 2050 nothing is piloted.
    pub fn default_piloting(self) -> Piloting {
        match self {
            TimeFrame::Generic | TimeFrame::Near => Piloting {
                sizing: true,
                revenue: true,
                deadhead: false,
            },
            TimeFrame::Far => Piloting {
                sizing: false,
                revenue: false,
                deadhead: false,
            },
        }
    }
}

impl UseCase {
    pub fn name(self) -> &'static str {
        match self {
            UseCase::IntraCity => "Intra-City",
            UseCase::Regional => "Regional",
        }
    }
}

impl ReserveType {
    pub fn name(self) -> &'static str {
        match self {
            ReserveType::Loiter20Min => "20-minute loiter",
            ReserveType::Loiter30Min => "30-minute loiter",
            ReserveType::Diversion5Nmi => "5-nmi diversion",
            ReserveType::Diversion2Nmi => "2-nmi diversion",
        }
    }
}

macro_rules! named_enum {
    ($ty:ident, $err:ident, [$($variant:ident),+ $(,)?]) => {
        impl FromStr for $ty {
            type Err = ResolveError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                [$($ty::$variant),+]
                    .into_iter()
                    .find(|v| v.name() == s)
                    .ok_or_else(|| ResolveError::$err(s.to_string()))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

named_enum!(TimeFrame, UnknownTimeFrame, [Generic, Near, Far]);
named_enum!(UseCase, UnknownUseCase, [IntraCity, Regional]);
named_enum!(
    ReserveType,
    UnknownReserve,
    [Loiter20Min, Loiter30Min, Diversion5Nmi, Diversion2Nmi]
);

impl Scenario {
    /// Scenario with the default flags: autonomy enabled, 20-minute loiter
    /// reserve, piloting per time frame.
    pub fn new(time_frame: TimeFrame, use_case: UseCase) -> Self {
        Self {
            time_frame,
            use_case,
            autonomous_enabled: true,
            reserve: ReserveType::Loiter20Min,
            piloting: time_frame.default_piloting(),
        }
    }

    /// Resolve the scenario named by a study file.
    pub fn from_config(study: &StudyConfig) -> Result<Self, ResolveError> {
        let time_frame: TimeFrame = study.time_frame.parse()?;
        let use_case: UseCase = study.use_case.parse()?;
        let reserve: ReserveType = study.reserve.parse()?;
        let defaults = time_frame.default_piloting();
        Ok(Self {
            time_frame,
            use_case,
            autonomous_enabled: study.autonomous_enabled,
            reserve,
            piloting: Piloting {
                sizing: study.piloting.sizing.unwrap_or(defaults.sizing),
                revenue: study.piloting.revenue.unwrap_or(defaults.revenue),
                deadhead: study.piloting.deadhead.unwrap_or(defaults.deadhead),
            },
        })
    }

    pub fn constants(&self) -> ScenarioConstants {
        ScenarioConstants::new(self.time_frame, self.use_case)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use uam_config::PilotingConfig;
    use uam_core::Unit;

    fn study(time_frame: &str) -> StudyConfig {
        StudyConfig {
            use_case: "Intra-City".into(),
            time_frame: time_frame.into(),
            autonomous_enabled: true,
            reserve: "20-minute loiter".into(),
            piloting: PilotingConfig::default(),
            configurations: vec!["Helicopter".into()],
            acoustics: Default::default(),
            solver: None,
            noise: None,
            overrides: Default::default(),
            sweep: None,
            output_dir: "artifacts".into(),
        }
    }

    #[test]
    fn piloting_follows_time_frame() {
        let near = Scenario::from_config(&study("2025")).unwrap();
        assert_eq!(
            near.piloting,
            Piloting {
                sizing: true,
                revenue: true,
                deadhead: false
            }
        );
        let far = Scenario::from_config(&study("2050")).unwrap();
        assert!(!far.piloting.sizing && !far.piloting.revenue && !far.piloting.deadhead);
    }

    #[test]
    fn explicit_piloting_wins() {
        let mut config = study("2050");
        config.piloting.revenue = Some(true);
        let scenario = Scenario::from_config(&config).unwrap();
        assert!(scenario.piloting.revenue);
        assert!(!scenario.piloting.sizing);
    }

    #[test]
    fn unknown_names_fail() {
        assert_eq!(
            Scenario::from_config(&study("2030")).unwrap_err().to_string(),
            "Time frame 2030 not recognized."
        );
        let mut config = study("2025");
        config.reserve = "10-minute loiter".into();
        assert_eq!(
            Scenario::from_config(&config).unwrap_err().to_string(),
            "Reserve type 10-minute loiter not recognized."
        );
        config.reserve = "20-minute loiter".into();
        config.use_case = "Suburban".into();
        assert!(matches!(
            Scenario::from_config(&config),
            Err(ResolveError::UnknownUseCase(_))
        ));
    }

    #[test]
    fn constants_per_use_case_and_time_frame() {
        let city = ScenarioConstants::new(TimeFrame::Near, UseCase::IntraCity);
        assert_relative_eq!(
            city.cruise_distances.sizing.value_in(Unit::NauticalMile).unwrap(),
            16.2,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            city.cruise_distances.deadhead.value_in(Unit::NauticalMile).unwrap(),
            30.0,
            max_relative = 1e-12
        );
        let cap = city.cruise_speed_caps.for_family(Family::Multirotor).unwrap();
        assert_relative_eq!(cap.value_in(Unit::MilePerHour).unwrap(), 50.0, max_relative = 1e-12);
        assert!(city.cruise_speed_caps.for_family(Family::Winged).is_none());

        let regional = ScenarioConstants::new(TimeFrame::Far, UseCase::Regional);
        assert_relative_eq!(
            regional.cruise_distances.revenue.value_in(Unit::NauticalMile).unwrap(),
            50.0,
            max_relative = 1e-12
        );
        assert!(regional.cruise_speed_caps.for_family(Family::Rotorcraft).is_none());
    }
}

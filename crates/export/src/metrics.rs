//! Rows of the tabulated report and the solution variables behind them.

use std::collections::BTreeMap;

use uam_acoustics::HoverNoise;
use uam_core::Unit;
use uam_model::names::{aircraft as av, cost, mission};
use uam_model::{MissionKind, ModelKind, VarPath};
use uam_solver::{ExtractError, Solution};

use crate::extract_sum;
use crate::figures;

/// Where a noise row reads its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseField {
    SplUnweighted,
    SplAWeighted,
    PeakFrequency,
}

impl NoiseField {
    fn read(self, noise: &HoverNoise) -> f64 {
        match self {
            NoiseField::SplUnweighted => noise.unweighted.spl_db,
            NoiseField::SplAWeighted => noise.a_weighted.spl_db,
            NoiseField::PeakFrequency => noise.unweighted.peak_frequency_hz,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Variable(VarPath),
    /// Terms extracted separately, then added.
    Sum(Vec<VarPath>),
    Noise(NoiseField),
}

/// One report row.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: &'static str,
    pub unit: Unit,
    /// Digits after the decimal point.
    pub precision: usize,
    pub source: Source,
}

impl Metric {
    fn new(label: &'static str, unit: Unit, precision: usize, source: Source) -> Self {
        Self {
            label,
            unit,
            precision,
            source,
        }
    }

    /// Value for one design; `None` for noise rows when no estimate exists.
    pub fn value(
        &self,
        solution: &Solution,
        noise: Option<&HoverNoise>,
    ) -> Result<Option<f64>, ExtractError> {
        match &self.source {
            Source::Variable(path) => solution.extract(path, self.unit).map(Some),
            Source::Sum(paths) => extract_sum(solution, paths, self.unit).map(Some),
            Source::Noise(field) => Ok(noise.map(|n| field.read(n))),
        }
    }

    /// Fixed-precision text, `n/a` for a missing value.
    pub fn format(&self, value: Option<f64>) -> String {
        match value {
            Some(v) => format!("{:.*}", self.precision, v),
            None => "n/a".to_string(),
        }
    }

    pub fn paths(&self) -> Vec<VarPath> {
        match &self.source {
            Source::Variable(path) => vec![path.clone()],
            Source::Sum(paths) => paths.clone(),
            Source::Noise(_) => Vec::new(),
        }
    }
}

pub(crate) fn aircraft(name: &str) -> VarPath {
    ModelKind::Aircraft.var(name)
}

pub(crate) fn sizing(name: &str) -> VarPath {
    MissionKind::Sizing.var(name)
}

pub(crate) fn revenue(name: &str) -> VarPath {
    MissionKind::Revenue.var(name)
}

pub(crate) fn mission_cost(name: &str) -> VarPath {
    ModelKind::MissionCost.var(name)
}

pub(crate) fn purchase_price_parts() -> Vec<VarPath> {
    vec![
        aircraft(av::AIRFRAME_PURCHASE_PRICE),
        aircraft(av::AVIONICS_PURCHASE_PRICE),
        aircraft(av::BATTERY_PURCHASE_PRICE),
    ]
}

/// Report rows, in print order.
pub fn report_metrics() -> Vec<Metric> {
    use Source::{Noise, Sum, Variable};
    vec![
        Metric::new("Max takeoff mass", Unit::Kilogram, 0, Variable(aircraft(av::MTOM))),
        Metric::new("Airframe mass", Unit::Kilogram, 0, Variable(aircraft(av::AIRFRAME_MASS))),
        Metric::new("Battery mass", Unit::Kilogram, 0, Variable(aircraft(av::BATTERY_MASS))),
        Metric::new("Mission time", Unit::Minute, 1, Variable(revenue(mission::MISSION_TIME))),
        Metric::new("Flight time", Unit::Minute, 1, Variable(revenue(mission::FLIGHT_TIME))),
        Metric::new("Charging time", Unit::Minute, 1, Variable(revenue(mission::GROUND_TIME))),
        Metric::new("Purchase price", Unit::ThousandUsd, 0, Sum(purchase_price_parts())),
        Metric::new("Trip cost", Unit::Dimensionless, 0, Variable(mission_cost(cost::COST_PER_TRIP))),
        Metric::new(
            "Cost per passenger-km",
            Unit::PerKilometer,
            2,
            Variable(mission_cost(cost::COST_PER_PASSENGER_KM)),
        ),
        Metric::new("Rotor diameter", Unit::Meter, 2, Variable(aircraft(av::ROTORS_DIAMETER))),
        Metric::new("Tip speed", Unit::MeterPerSecond, 1, Variable(sizing(mission::HOVER_TIP_SPEED))),
        Metric::new("Tip Mach number", Unit::Dimensionless, 2, Variable(sizing(mission::HOVER_TIP_MACH))),
        Metric::new(
            "Thrust coefficient",
            Unit::Dimensionless,
            4,
            Variable(sizing(mission::HOVER_THRUST_COEFFICIENT)),
        ),
        Metric::new(
            "Power coefficient",
            Unit::Dimensionless,
            4,
            Variable(sizing(mission::HOVER_POWER_COEFFICIENT)),
        ),
        Metric::new(
            "Figure of merit",
            Unit::Dimensionless,
            3,
            Variable(sizing(mission::HOVER_FIGURE_OF_MERIT)),
        ),
        Metric::new("Hover SPL (unweighted)", Unit::Dimensionless, 1, Noise(NoiseField::SplUnweighted)),
        Metric::new("Hover SPL (A-weighted)", Unit::Dimensionless, 1, Noise(NoiseField::SplAWeighted)),
        Metric::new("Vortex peak frequency", Unit::Hertz, 0, Noise(NoiseField::PeakFrequency)),
    ]
}

/// Every solution variable the report and figures read, with the unit it is
/// read in.
pub fn solution_paths() -> Vec<(VarPath, Unit)> {
    let mut paths = BTreeMap::new();
    for metric in report_metrics() {
        for path in metric.paths() {
            paths.insert(path, metric.unit);
        }
    }
    for (path, unit) in figures::figure_paths() {
        paths.entry(path).or_insert(unit);
    }
    paths.into_iter().collect()
}

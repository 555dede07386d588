#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;

use uam_trade_study::acoustics::{AcousticInputs, NoiseError, NoiseEstimate, NoiseModel, Weighting};
use uam_trade_study::model::names::{aircraft as av, mission};
use uam_trade_study::model::{MissionKind, ModelKind, Problem, VarPath};
use uam_trade_study::solver::{Solution, SolveError, Solver};
use uam_trade_study::units::{Quantity, Unit};

/// Stand-in optimizer: echoes the substitutions and fills every reported
/// output with a value that shrinks as battery specific energy grows.
/// Below `min_wh_per_kg` it reports the problem infeasible.
pub struct FakeSolver {
    pub min_wh_per_kg: f64,
    pub seen: RefCell<Vec<String>>,
}

impl FakeSolver {
    pub fn new(min_wh_per_kg: f64) -> Self {
        Self {
            min_wh_per_kg,
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl Solver for FakeSolver {
    fn solve(&self, problem: &Problem) -> Result<Solution, SolveError> {
        let e_path = ModelKind::Aircraft.var(av::BATTERY_SPECIFIC_ENERGY);
        let e = problem
            .substitutions()
            .get(&e_path)
            .ok_or_else(|| SolveError::Failed(format!("missing {e_path}")))?
            .value_in(Unit::WattHourPerKilogram)
            .map_err(|err| SolveError::Failed(err.to_string()))?;
        let n = problem
            .substitutions()
            .get(&ModelKind::Aircraft.var(av::ROTORS_N))
            .map(|q| q.value_si())
            .unwrap_or(1.0);
        self.seen.borrow_mut().push(format!("{n}@{e}"));
        if e < self.min_wh_per_kg {
            return Err(SolveError::Infeasible(format!("battery too weak at {e} Wh/kg")));
        }

        let scale = 300.0 / e;
        let mut variables: BTreeMap<VarPath, Quantity> = problem
            .substitutions()
            .iter()
            .map(|(path, value)| (path.clone(), *value))
            .collect();
        for (i, (path, unit)) in uam_trade_study::export::solution_paths().into_iter().enumerate() {
            variables
                .entry(path)
                .or_insert_with(|| Quantity::in_unit(scale * (10 + i) as f64, unit));
        }
        let mut put = |path: VarPath, value: f64, unit: Unit| {
            variables.insert(path, Quantity::in_unit(value, unit));
        };
        put(ModelKind::Aircraft.var(av::MTOM), 1_800.0 * scale, Unit::Kilogram);
        put(ModelKind::Aircraft.var(av::AIRFRAME_MASS), 700.0 * scale, Unit::Kilogram);
        put(ModelKind::Aircraft.var(av::BATTERY_MASS), 500.0 * scale, Unit::Kilogram);
        put(ModelKind::Aircraft.var(av::ROTORS_MEAN_CHORD), 0.1, Unit::Meter);
        put(ModelKind::Aircraft.var(av::ROTORS_MEAN_THICKNESS), 0.012, Unit::Meter);
        let sizing = |name: &str| MissionKind::Sizing.var(name);
        put(sizing(mission::HOVER_THRUST_PER_ROTOR), 2_200.0 / n, Unit::Newton);
        put(sizing(mission::HOVER_DISK_LOADING), 480.0, Unit::Pascal);
        put(sizing(mission::HOVER_TIP_SPEED), 170.0, Unit::MeterPerSecond);
        put(sizing(mission::HOVER_MEAN_LIFT_COEFFICIENT), 0.6, Unit::Dimensionless);
        put(sizing(mission::HOVER_AIR_DENSITY), 1.225, Unit::KilogramPerCubicMeter);

        Ok(Solution::new(Quantity::dimensionless(90.0 * scale), variables))
    }
}

/// Optimizer that converges without reporting any variables.
pub struct EmptySolver;

impl Solver for EmptySolver {
    fn solve(&self, _problem: &Problem) -> Result<Solution, SolveError> {
        Ok(Solution::new(Quantity::dimensionless(1.0), BTreeMap::new()))
    }
}

/// Noise model that never produces an estimate.
pub struct FailingNoise;

impl NoiseModel for FailingNoise {
    fn estimate(
        &self,
        _inputs: &AcousticInputs,
        _weighting: Weighting,
    ) -> Result<NoiseEstimate, NoiseError> {
        Err(NoiseError::Failed("vortex model diverged".into()))
    }
}

/// Noise model returning a level that grows with rotor count.
pub struct FakeNoise;

impl NoiseModel for FakeNoise {
    fn estimate(
        &self,
        inputs: &AcousticInputs,
        weighting: Weighting,
    ) -> Result<NoiseEstimate, NoiseError> {
        let spl = 60.0 + inputs.rotor_count;
        Ok(NoiseEstimate {
            peak_frequency_hz: inputs.tip_speed_m_s,
            spl_db: match weighting {
                Weighting::None => spl,
                Weighting::A => spl - 5.0,
            },
        })
    }
}

pub fn write_study(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("study.toml");
    std::fs::write(&path, body).expect("write study file");
    path
}

//! Study configuration models and loaders for the UAM trade study.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level study file: scenario flags, the configurations to solve and
/// the external programs to call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyConfig {
    #[serde(default = "default_use_case")]
    pub use_case: String,
    #[serde(default = "default_time_frame")]
    pub time_frame: String,
    #[serde(default = "default_true")]
    pub autonomous_enabled: bool,
    #[serde(default = "default_reserve")]
    pub reserve: String,
    /// Explicit piloting flags; unset entries follow the time frame.
    #[serde(default)]
    pub piloting: PilotingConfig,
    #[serde(default = "default_configurations")]
    pub configurations: Vec<String>,
    #[serde(default)]
    pub acoustics: AcousticsConfig,
    #[serde(default)]
    pub solver: Option<CommandConfig>,
    #[serde(default)]
    pub noise: Option<CommandConfig>,
    /// Per-configuration aircraft overrides, keyed by configuration name.
    #[serde(default)]
    pub overrides: BTreeMap<String, AircraftOverrides>,
    #[serde(default)]
    pub sweep: Option<SweepConfig>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PilotingConfig {
    #[serde(default)]
    pub sizing: Option<bool>,
    #[serde(default)]
    pub revenue: Option<bool>,
    #[serde(default)]
    pub deadhead: Option<bool>,
}

/// Inputs to the hover-noise estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcousticsConfig {
    #[serde(default = "default_observer_distance_ft")]
    pub observer_distance_ft: f64,
    #[serde(default = "default_strouhal_number")]
    pub strouhal_number: f64,
}

impl Default for AcousticsConfig {
    fn default() -> Self {
        Self {
            observer_distance_ft: default_observer_distance_ft(),
            strouhal_number: default_strouhal_number(),
        }
    }
}

/// External program speaking the JSON protocol on stdin/stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandConfig {
    pub program: PathBuf,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Values replacing a configuration's table entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AircraftOverrides {
    #[serde(default)]
    pub empty_mass_fraction: Option<f64>,
    #[serde(default)]
    pub v_cruise_mph: Option<f64>,
    #[serde(default)]
    pub l_d_cruise: Option<f64>,
    #[serde(default)]
    pub rotor_count: Option<f64>,
    #[serde(default)]
    pub disk_loading_lbf_ft2: Option<f64>,
    #[serde(default)]
    pub cl_mean_max: Option<f64>,
    #[serde(default)]
    pub battery_wh_per_kg: Option<f64>,
}

impl AircraftOverrides {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Linear battery specific-energy sweep, in Wh/kg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub start_wh_per_kg: f64,
    pub end_wh_per_kg: f64,
    pub steps: usize,
}

impl SweepConfig {
    /// Evenly spaced points from start to end, both included.
    pub fn points(&self) -> Vec<f64> {
        match self.steps {
            0 => Vec::new(),
            1 => vec![self.start_wh_per_kg],
            n => {
                let step = (self.end_wh_per_kg - self.start_wh_per_kg) / (n - 1) as f64;
                (0..n)
                    .map(|i| self.start_wh_per_kg + step * i as f64)
                    .collect()
            }
        }
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read study file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid study file: {0}")]
    Invalid(String),
}

impl StudyConfig {
    /// Check values serde cannot express. Names (configurations, reserve,
    /// time frame, use case) are checked when the scenario is resolved.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.configurations.is_empty() {
            return Err(ConfigError::Invalid("no configurations listed".into()));
        }
        if let Some(name) = self
            .overrides
            .keys()
            .find(|name| !self.configurations.contains(name))
        {
            return Err(ConfigError::Invalid(format!(
                "overrides given for `{name}`, which is not in the configuration list"
            )));
        }
        if !(self.acoustics.observer_distance_ft > 0.0) {
            return Err(ConfigError::Invalid(
                "acoustics.observer_distance_ft must be positive".into(),
            ));
        }
        if !(self.acoustics.strouhal_number > 0.0) {
            return Err(ConfigError::Invalid(
                "acoustics.strouhal_number must be positive".into(),
            ));
        }
        if let Some(sweep) = &self.sweep {
            if sweep.steps < 2 {
                return Err(ConfigError::Invalid("sweep.steps must be at least 2".into()));
            }
            if !(sweep.start_wh_per_kg > 0.0 && sweep.end_wh_per_kg > sweep.start_wh_per_kg) {
                return Err(ConfigError::Invalid(
                    "sweep range must be positive and increasing".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Load and validate a study file. The format follows the extension:
/// `.toml`, `.json`, anything else is read as YAML.
pub fn load_study<P: AsRef<Path>>(path: P) -> Result<StudyConfig, ConfigError> {
    let study: StudyConfig = load_record(path)?;
    study.validate()?;
    Ok(study)
}

fn load_record<T, P>(path: P) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => {
            let contents = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        }
        Some("json") => {
            let reader = File::open(path)?;
            Ok(serde_json::from_reader(reader)?)
        }
        _ => {
            let reader = File::open(path)?;
            Ok(serde_yaml::from_reader(reader)?)
        }
    }
}

fn default_use_case() -> String {
    "Intra-City".into()
}

fn default_time_frame() -> String {
    "2025".into()
}

fn default_reserve() -> String {
    "20-minute loiter".into()
}

fn default_true() -> bool {
    true
}

fn default_configurations() -> Vec<String> {
    [
        "Helicopter",
        "Coaxial heli",
        "Compound heli",
        "Multirotor",
        "Lift + cruise",
        "Tilt wing",
        "Tilt rotor",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_observer_distance_ft() -> f64 {
    500.0
}

fn default_strouhal_number() -> f64 {
    0.28
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("artifacts")
}

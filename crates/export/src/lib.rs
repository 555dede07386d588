//! Export helpers for trade-study results: the tabulated text report, bar
//! chart figures, the JSON results sidecar, and the battery sweep CSV and
//! sensitivity figure.

pub mod figures;
pub mod metrics;
pub mod report;
pub mod results;
pub mod sidecar;
pub mod sweep;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;
use uam_core::Unit;
use uam_model::VarPath;
use uam_solver::{ExtractError, Solution};

pub use figures::{Figure, Layout, Series, figures, render_png, write_figures};
pub use metrics::{Metric, NoiseField, Source, report_metrics, solution_paths};
pub use report::{REPORT_FILE, render_report, write_report};
pub use results::{ConfigResult, ResultsTable};
pub use sidecar::{RESULTS_FILE, write_results_json};
pub use sweep::{
    SWEEP_FIGURE_FILE, SWEEP_FILE, SweepLine, SweepPanel, SweepRecord, render_sweep_png,
    sweep_panels, write_sweep_csv, write_sweep_figure,
};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("{configuration}: {source}")]
    Extract {
        configuration: String,
        #[source]
        source: ExtractError,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to draw `{figure}`: {message}")]
    Plot { figure: String, message: String },
    #[error("no results to export")]
    Empty,
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Value of one solution variable in `unit`.
pub fn extract(solution: &Solution, path: &VarPath, unit: Unit) -> Result<f64, ExtractError> {
    solution.extract(path, unit)
}

/// Sum of several variables, each extracted in `unit` before adding.
pub fn extract_sum(
    solution: &Solution,
    paths: &[VarPath],
    unit: Unit,
) -> Result<f64, ExtractError> {
    paths.iter().map(|path| solution.extract(path, unit)).sum()
}


#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use uam_core::Quantity;
    use uam_model::ModelKind;
    use uam_model::names::aircraft as av;

    #[test]
    fn sum_extracts_each_term_in_the_requested_unit() {
        let solution = testing::solution(1.0);
        let parts = [
            ModelKind::Aircraft.var(av::AIRFRAME_PURCHASE_PRICE),
            ModelKind::Aircraft.var(av::AVIONICS_PURCHASE_PRICE),
            ModelKind::Aircraft.var(av::BATTERY_PURCHASE_PRICE),
        ];
        let total = extract_sum(&solution, &parts, Unit::Usd).unwrap();
        let by_hand: f64 = parts
            .iter()
            .map(|p| extract(&solution, p, Unit::Usd).unwrap())
            .sum();
        assert_relative_eq!(total, by_hand);
        assert_relative_eq!(
            extract_sum(&solution, &parts, Unit::ThousandUsd).unwrap(),
            total / 1e3
        );
    }

    #[test]
    fn extraction_round_trips_through_convert() {
        let solution = testing::solution(1.0);
        let diameter = ModelKind::Aircraft.var(av::ROTORS_DIAMETER);
        let m = extract(&solution, &diameter, Unit::Meter).unwrap();
        let ft = extract(&solution, &diameter, Unit::Foot).unwrap();
        assert_relative_eq!(
            Unit::convert(m, Unit::Meter, Unit::Foot).unwrap(),
            ft,
            max_relative = 1e-12
        );
    }

    #[test]
    fn missing_term_fails_the_sum() {
        let solution = Solution::new(Quantity::dimensionless(1.0), Default::default());
        let err = extract_sum(&solution, &[ModelKind::Aircraft.var(av::MTOM)], Unit::Kilogram)
            .unwrap_err();
        assert!(matches!(err, ExtractError::Missing(_)));
    }

    #[test]
    fn writer_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.txt");
        {
            let mut writer = writer_for_path(&path).unwrap();
            writer.write_all(b"ok").unwrap();
        }
        assert_eq!(std::fs::read_to_string(path).unwrap(), "ok");
    }
}

//! JSON sidecar with every tabulated value per configuration.

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::to_writer_pretty;
use tracing::info;
use uam_acoustics::HoverNoise;

use crate::metrics::report_metrics;
use crate::results::ResultsTable;
use crate::{ExportError, writer_for_path};

pub const RESULTS_FILE: &str = "config_trade_study_results.json";

#[derive(Serialize)]
struct ResultsSidecar<'a, S> {
    generated_at: String,
    scenario: &'a S,
    configurations: Vec<ConfigurationRecord<'a>>,
}

#[derive(Serialize)]
struct ConfigurationRecord<'a> {
    name: &'a str,
    objective: f64,
    metrics: Vec<MetricRecord>,
    noise: Option<&'a HoverNoise>,
}

#[derive(Serialize)]
struct MetricRecord {
    label: &'static str,
    unit: &'static str,
    value: Option<f64>,
}

/// Write `config_trade_study_results.json` into `dir`.
pub fn write_results_json<S: Serialize>(
    dir: &Path,
    scenario: &S,
    table: &ResultsTable,
    generated_at: DateTime<Utc>,
) -> Result<(), ExportError> {
    if table.is_empty() {
        return Err(ExportError::Empty);
    }
    let metrics = report_metrics();
    let mut configurations = Vec::with_capacity(table.len());
    for entry in table {
        let mut records = Vec::with_capacity(metrics.len());
        for metric in &metrics {
            let value = metric
                .value(&entry.solution, entry.noise.as_ref())
                .map_err(|source| ExportError::Extract {
                    configuration: entry.configuration.clone(),
                    source,
                })?;
            records.push(MetricRecord {
                label: metric.label,
                unit: metric.unit.label(),
                value,
            });
        }
        configurations.push(ConfigurationRecord {
            name: &entry.configuration,
            objective: entry.solution.objective().value_si(),
            metrics: records,
            noise: entry.noise.as_ref(),
        });
    }

    let sidecar = ResultsSidecar {
        generated_at: generated_at.to_rfc3339(),
        scenario,
        configurations,
    };
    let path = dir.join(RESULTS_FILE);
    let mut writer = writer_for_path(&path)?;
    to_writer_pretty(&mut writer, &sidecar)?;
    writer.flush()?;
    info!(path = %path.display(), "wrote results sidecar");
    Ok(())
}

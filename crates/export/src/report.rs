//! Tab-delimited "Tabulated Data by Configuration" report.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::metrics::report_metrics;
use crate::results::ResultsTable;
use crate::{ExportError, writer_for_path};

pub const REPORT_FILE: &str = "config_trade_study_tabulatedData.txt";

/// Labels shorter than two tab stops get an extra tab so values line up.
fn label_padding(label: &str) -> &'static str {
    if label.len() < 16 { "\t" } else { "" }
}

/// Render the report with one column per configuration in table order.
pub fn render_report(table: &ResultsTable) -> Result<String, ExportError> {
    if table.is_empty() {
        return Err(ExportError::Empty);
    }
    let mut out = String::from("Tabulated Data by Configuration\n\n");

    out.push_str("Configuration\t\t\t");
    for name in table.configurations() {
        out.push_str(name);
        out.push('\t');
    }
    out.push_str("Units\n\n");

    for metric in report_metrics() {
        out.push_str(metric.label);
        out.push_str("\t\t");
        out.push_str(label_padding(metric.label));
        for entry in table {
            let value = metric
                .value(&entry.solution, entry.noise.as_ref())
                .map_err(|source| ExportError::Extract {
                    configuration: entry.configuration.clone(),
                    source,
                })?;
            out.push_str(&metric.format(value));
            out.push_str("\t\t");
        }
        out.push_str(metric.unit.label());
        out.push('\n');
    }
    Ok(out)
}

/// Write the report to `dir`, returning the rendered text for echoing.
pub fn write_report(dir: &Path, table: &ResultsTable) -> Result<String, ExportError> {
    let text = render_report(table)?;
    let path = dir.join(REPORT_FILE);
    let mut writer = writer_for_path(&path)?;
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    info!(path = %path.display(), "wrote tabulated report");
    Ok(text)
}

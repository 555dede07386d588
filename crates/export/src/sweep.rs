//! Battery specific-energy sweep output: the CSV table and a four-panel
//! sensitivity figure with one line per configuration.

use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::figures::select_font_family;
use crate::{ExportError, writer_for_path};

pub const SWEEP_FILE: &str = "battery_sweep.csv";
pub const SWEEP_FIGURE_FILE: &str = "battery_sweep_sensitivity.png";

/// One sweep point. Infeasible points keep their inputs and leave the
/// results empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRecord {
    pub configuration: String,
    pub battery_wh_per_kg: f64,
    pub feasible: bool,
    pub mtom_kg: Option<f64>,
    pub battery_mass_kg: Option<f64>,
    pub cost_per_trip_per_passenger: Option<f64>,
    pub spl_db: Option<f64>,
}

impl SweepRecord {
    pub fn infeasible(configuration: impl Into<String>, battery_wh_per_kg: f64) -> Self {
        Self {
            configuration: configuration.into(),
            battery_wh_per_kg,
            feasible: false,
            mtom_kg: None,
            battery_mass_kg: None,
            cost_per_trip_per_passenger: None,
            spl_db: None,
        }
    }
}

/// Write sweep points to `path` (`-` for stdout).
pub fn write_sweep_csv(path: &Path, records: &[SweepRecord]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(writer_for_path(path)?);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    info!(path = %path.display(), points = records.len(), "wrote battery sweep");
    Ok(())
}

/// Feasible points of one configuration, ordered by battery specific energy.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepLine {
    pub configuration: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepPanel {
    pub title: &'static str,
    pub y_label: &'static str,
    pub lines: Vec<SweepLine>,
}

impl SweepPanel {
    fn peak(&self) -> f64 {
        self.lines
            .iter()
            .flat_map(|line| line.points.iter().map(|&(_, y)| y))
            .fold(0.0, f64::max)
    }
}

/// Panel data for the sensitivity figure. Every configuration gets a line in
/// every panel, even when none of its points were feasible.
pub fn sweep_panels(records: &[SweepRecord]) -> Vec<SweepPanel> {
    let mut configurations: Vec<&str> = Vec::new();
    for record in records {
        if !configurations.contains(&record.configuration.as_str()) {
            configurations.push(&record.configuration);
        }
    }

    let panel = |title, y_label, value: fn(&SweepRecord) -> Option<f64>| SweepPanel {
        title,
        y_label,
        lines: configurations
            .iter()
            .map(|&configuration| {
                let mut points: Vec<(f64, f64)> = records
                    .iter()
                    .filter(|r| r.feasible && r.configuration == configuration)
                    .filter_map(|r| value(r).map(|y| (r.battery_wh_per_kg, y)))
                    .collect();
                points.sort_by(|a, b| a.0.total_cmp(&b.0));
                SweepLine {
                    configuration: configuration.to_string(),
                    points,
                }
            })
            .collect(),
    };

    vec![
        panel("Maximum Takeoff Mass", "Mass (kg)", |r| r.mtom_kg),
        panel("Battery Mass", "Mass (kg)", |r| r.battery_mass_kg),
        panel("Cost per Trip, per Passenger", "Cost ($US)", |r| {
            r.cost_per_trip_per_passenger
        }),
        panel("Sound Pressure Level in Hover", "SPL (dBA)", |r| r.spl_db),
    ]
}

/// Draw the sensitivity panels on a 2x2 grid as a PNG at `path`.
pub fn render_sweep_png(
    records: &[SweepRecord],
    path: &Path,
    size: (u32, u32),
) -> Result<(), ExportError> {
    let plot_err = |err: &dyn std::fmt::Display| ExportError::Plot {
        figure: "BatterySensitivity".to_string(),
        message: err.to_string(),
    };
    if records.is_empty() {
        return Err(ExportError::Empty);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| plot_err(&e))?;

    let font_family = select_font_family();
    let title_font = FontDesc::new(font_family, 20.0, FontStyle::Normal);
    let label_font = FontDesc::new(font_family, 14.0, FontStyle::Normal);
    let desc_font = FontDesc::new(font_family, 16.0, FontStyle::Normal);

    let (mut x_min, mut x_max) = records.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), r| (lo.min(r.battery_wh_per_kg), hi.max(r.battery_wh_per_kg)),
    );
    if x_max <= x_min {
        x_min -= 1.0;
        x_max += 1.0;
    }

    let panels = sweep_panels(records);
    for (panel, area) in panels.iter().zip(root.split_evenly((2, 2)).iter()) {
        let y_max = match panel.peak() {
            peak if peak > 0.0 => 1.1 * peak,
            _ => 1.0,
        };
        let mut chart = ChartBuilder::on(area)
            .caption(panel.title, title_font.clone())
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, 0.0..y_max)
            .map_err(|e| plot_err(&e))?;

        chart
            .configure_mesh()
            .x_desc("Battery energy density (Wh/kg)")
            .y_desc(panel.y_label)
            .label_style(label_font.clone())
            .axis_desc_style(desc_font.clone())
            .draw()
            .map_err(|e| plot_err(&e))?;

        let mut drawn = 0;
        for (k, line) in panel.lines.iter().enumerate() {
            if line.points.is_empty() {
                continue;
            }
            let color = Palette99::pick(k).to_rgba();
            chart
                .draw_series(std::iter::once(PathElement::new(
                    line.points.clone(),
                    color.stroke_width(2),
                )))
                .map_err(|e| plot_err(&e))?
                .label(line.configuration.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
            chart
                .draw_series(
                    line.points
                        .iter()
                        .map(|&point| Circle::new(point, 4, color.filled())),
                )
                .map_err(|e| plot_err(&e))?;
            drawn += 1;
        }

        if drawn > 0 {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(&WHITE)
                .border_style(&BLACK)
                .label_font(label_font.clone())
                .draw()
                .map_err(|e| plot_err(&e))?;
        }
    }

    root.present().map_err(|e| plot_err(&e))?;
    Ok(())
}

/// Render the sensitivity figure into `dir`, returning the written path.
pub fn write_sweep_figure(dir: &Path, records: &[SweepRecord]) -> Result<PathBuf, ExportError> {
    let path = dir.join(SWEEP_FIGURE_FILE);
    render_sweep_png(records, &path, (1360, 880))?;
    info!(path = %path.display(), "wrote battery sweep figure");
    Ok(path)
}

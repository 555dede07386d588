//! Per-metric bar charts comparing configurations.
//!
//! Figure contents are plain data ([`Figure`]) so they can be checked without
//! drawing; [`render_png`] turns one into a bitmap with `plotters`.

use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::info;
use uam_core::Unit;
use uam_model::VarPath;
use uam_model::names::{aircraft as av, cost, mission};
use uam_solver::{ExtractError, Solution};

use crate::ExportError;
use crate::metrics::{aircraft, mission_cost, purchase_price_parts, revenue, sizing};
use crate::results::ResultsTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Series stacked on one bar per configuration.
    Stacked,
    /// Narrow side-by-side bars per configuration.
    Grouped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub legend: &'static str,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub number: u8,
    pub name: &'static str,
    pub y_label: &'static str,
    pub layout: Layout,
    /// Tick labels, one per configuration; may contain line breaks.
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

impl Figure {
    pub fn file_name(&self) -> String {
        format!("config_tradeStudy_plot_{:02}_{}.png", self.number, self.name)
    }

    /// Largest bar height.
    fn peak(&self) -> f64 {
        (0..self.categories.len())
            .map(|i| match self.layout {
                Layout::Stacked => self.series.iter().map(|s| s.values[i]).sum(),
                Layout::Grouped => self
                    .series
                    .iter()
                    .map(|s| s.values[i])
                    .fold(f64::NEG_INFINITY, f64::max),
            })
            .fold(0.0, f64::max)
    }
}

/// Signed sum of solution variables, all read in one unit.
struct SeriesSpec {
    legend: &'static str,
    unit: Unit,
    terms: Vec<(f64, VarPath)>,
}

impl SeriesSpec {
    fn var(legend: &'static str, unit: Unit, path: VarPath) -> Self {
        Self::sum(legend, unit, vec![path])
    }

    fn sum(legend: &'static str, unit: Unit, paths: Vec<VarPath>) -> Self {
        Self {
            legend,
            unit,
            terms: paths.into_iter().map(|p| (1.0, p)).collect(),
        }
    }

    fn value(&self, solution: &Solution) -> Result<f64, ExtractError> {
        self.terms.iter().try_fold(0.0, |acc, (sign, path)| {
            Ok(acc + sign * solution.extract(path, self.unit)?)
        })
    }
}

struct FigureSpec {
    number: u8,
    name: &'static str,
    y_label: &'static str,
    layout: Layout,
    series: Vec<SeriesSpec>,
}

fn figure_specs() -> Vec<FigureSpec> {
    use Layout::{Grouped, Stacked};
    let revenue_branch = |name: &str| mission_cost(&cost::in_branch(cost::REVENUE, name));

    vec![
        FigureSpec {
            number: 1,
            name: "MassBreakdown",
            y_label: "Mass (kg)",
            layout: Stacked,
            series: vec![
                SeriesSpec::var("Airframe", Unit::Kilogram, aircraft(av::AIRFRAME_MASS)),
                SeriesSpec::var("Battery", Unit::Kilogram, aircraft(av::BATTERY_MASS)),
                SeriesSpec {
                    legend: "Crew & passengers",
                    unit: Unit::Kilogram,
                    terms: vec![
                        (1.0, aircraft(av::MTOM)),
                        (-1.0, aircraft(av::AIRFRAME_MASS)),
                        (-1.0, aircraft(av::BATTERY_MASS)),
                    ],
                },
            ],
        },
        FigureSpec {
            number: 2,
            name: "EnergyUse",
            y_label: "Energy (kWh)",
            layout: Stacked,
            series: vec![
                SeriesSpec::var("Cruise", Unit::KilowattHour, sizing(mission::CRUISE_ENERGY)),
                SeriesSpec::sum(
                    "Hover",
                    Unit::KilowattHour,
                    vec![sizing(mission::TAKEOFF_ENERGY), sizing(mission::LANDING_ENERGY)],
                ),
                SeriesSpec::var("Reserve", Unit::KilowattHour, sizing(mission::RESERVE_ENERGY)),
            ],
        },
        FigureSpec {
            number: 3,
            name: "BatteryPowerDraw",
            y_label: "Power (kW)",
            layout: Grouped,
            series: vec![
                SeriesSpec::var("Cruise", Unit::Kilowatt, sizing(mission::CRUISE_ELECTRIC_POWER)),
                SeriesSpec::var("Hover", Unit::Kilowatt, sizing(mission::HOVER_ELECTRIC_POWER)),
                SeriesSpec::var("Reserve", Unit::Kilowatt, sizing(mission::RESERVE_ELECTRIC_POWER)),
            ],
        },
        FigureSpec {
            number: 4,
            name: "MissionTime",
            y_label: "Time (minutes)",
            layout: Stacked,
            series: vec![
                SeriesSpec::var("Flight time", Unit::Minute, revenue(mission::FLIGHT_TIME)),
                SeriesSpec::var("Charging time", Unit::Minute, revenue(mission::GROUND_TIME)),
            ],
        },
        FigureSpec {
            number: 5,
            name: "TripCost",
            y_label: "Cost ($US/trip)",
            layout: Stacked,
            series: vec![
                SeriesSpec::var(
                    "Revenue mission",
                    Unit::Usd,
                    mission_cost(cost::REVENUE_COST_PER_TRIP),
                ),
                SeriesSpec::var(
                    "Deadhead effect",
                    Unit::Usd,
                    mission_cost(cost::DEADHEAD_COST_PER_TRIP),
                ),
            ],
        },
        FigureSpec {
            number: 6,
            name: "CostPerPassengerKilometer",
            y_label: "Cost ($US/km)",
            layout: Stacked,
            series: vec![SeriesSpec::var(
                "Cost per passenger-km",
                Unit::PerKilometer,
                mission_cost(cost::COST_PER_PASSENGER_KM),
            )],
        },
        FigureSpec {
            number: 7,
            name: "PurchasePrice",
            y_label: "Price ($thousands US)",
            layout: Stacked,
            series: ["Airframe", "Avionics", "Battery"]
                .into_iter()
                .zip(purchase_price_parts())
                .map(|(legend, path)| SeriesSpec::var(legend, Unit::ThousandUsd, path))
                .collect(),
        },
        FigureSpec {
            number: 8,
            name: "MissionCapitalExpenses",
            y_label: "Cost ($US/mission)",
            layout: Stacked,
            series: vec![
                SeriesSpec::var("Airframe", Unit::Usd, revenue_branch(cost::AIRFRAME_ACQUISITION_PER_MISSION)),
                SeriesSpec::var("Avionics", Unit::Usd, revenue_branch(cost::AVIONICS_ACQUISITION_PER_MISSION)),
                SeriesSpec::var("Battery", Unit::Usd, revenue_branch(cost::BATTERY_ACQUISITION_PER_MISSION)),
            ],
        },
        FigureSpec {
            number: 9,
            name: "MissionOperatingExpenses",
            y_label: "Cost ($US/mission)",
            layout: Stacked,
            series: vec![
                SeriesSpec::var("Pilot", Unit::Usd, revenue_branch(cost::PILOT_COST_PER_MISSION)),
                SeriesSpec::var("Maintenance", Unit::Usd, revenue_branch(cost::MAINTENANCE_COST_PER_MISSION)),
                SeriesSpec::var("Energy", Unit::Usd, revenue_branch(cost::ENERGY_COST_PER_MISSION)),
                SeriesSpec::var("IOC", Unit::Usd, revenue_branch(cost::IOC_PER_MISSION)),
            ],
        },
    ]
}

/// Solution variables read by the figures.
pub(crate) fn figure_paths() -> Vec<(VarPath, Unit)> {
    figure_specs()
        .into_iter()
        .flat_map(|figure| figure.series)
        .flat_map(|series| {
            let unit = series.unit;
            series.terms.into_iter().map(move |(_, path)| (path, unit))
        })
        .collect()
}

/// Tick label for a configuration; the long rotorcraft names wrap.
fn category_label(configuration: &str) -> String {
    match configuration {
        "Compound heli" | "Coaxial heli" => configuration.replace(' ', "\n"),
        other => other.to_string(),
    }
}

/// Data for every figure. The sound-pressure figure is left out unless every
/// configuration has a noise estimate.
pub fn figures(table: &ResultsTable) -> Result<Vec<Figure>, ExportError> {
    if table.is_empty() {
        return Err(ExportError::Empty);
    }
    let categories: Vec<String> = table.configurations().map(category_label).collect();

    let mut out = Vec::new();
    for spec in figure_specs() {
        let mut series = Vec::with_capacity(spec.series.len());
        for s in &spec.series {
            let values = table
                .iter()
                .map(|entry| {
                    s.value(&entry.solution)
                        .map_err(|source| ExportError::Extract {
                            configuration: entry.configuration.clone(),
                            source,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            series.push(Series {
                legend: s.legend,
                values,
            });
        }
        out.push(Figure {
            number: spec.number,
            name: spec.name,
            y_label: spec.y_label,
            layout: spec.layout,
            categories: categories.clone(),
            series,
        });
    }

    if table.has_noise() {
        out.push(Figure {
            number: 10,
            name: "SoundPressureLevel",
            y_label: "SPL (dBA)",
            layout: Layout::Stacked,
            categories,
            series: vec![Series {
                legend: "A-weighted",
                values: table
                    .iter()
                    .filter_map(|e| e.noise.map(|n| n.a_weighted.spl_db))
                    .collect(),
            }],
        });
    }
    Ok(out)
}

const PALETTE: [RGBColor; 4] = [
    RGBColor(128, 128, 128),
    WHITE,
    BLACK,
    RGBColor(211, 211, 211),
];

pub(crate) fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

/// Draw `figure` as a PNG at `path`.
pub fn render_png(figure: &Figure, path: &Path, size: (u32, u32)) -> Result<(), ExportError> {
    let plot_err = |err: &dyn std::fmt::Display| ExportError::Plot {
        figure: figure.name.to_string(),
        message: err.to_string(),
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| plot_err(&e))?;

    let font_family = select_font_family();
    let label_font = FontDesc::new(font_family, 16.0, FontStyle::Normal);
    let desc_font = FontDesc::new(font_family, 18.0, FontStyle::Normal);

    let n = figure.categories.len();
    let y_max = match figure.peak() {
        peak if peak > 0.0 => 1.6 * peak,
        _ => 1.0,
    };
    let line_height: i32 = 18;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(20 + 2 * line_height as u32)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), 0.0..y_max)
        .map_err(|e| plot_err(&e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(0)
        .y_labels(8)
        .y_desc(figure.y_label)
        .label_style(label_font.clone())
        .axis_desc_style(desc_font)
        .draw()
        .map_err(|e| plot_err(&e))?;

    let (width, offsets): (f64, Vec<f64>) = match figure.layout {
        Layout::Stacked => (0.5, vec![0.0; figure.series.len()]),
        Layout::Grouped => (0.25, vec![-0.25, 0.0, 0.25]),
    };
    let mut base = vec![0.0; n];
    for (k, series) in figure.series.iter().enumerate() {
        let color = PALETTE[k % PALETTE.len()];
        let offset = offsets.get(k).copied().unwrap_or(0.0);
        let mut bars = Vec::with_capacity(2 * n);
        for (i, value) in series.values.iter().enumerate() {
            let x = i as f64 + offset;
            let (y0, y1) = match figure.layout {
                Layout::Stacked => (base[i], base[i] + value),
                Layout::Grouped => (0.0, *value),
            };
            if figure.layout == Layout::Stacked {
                base[i] = y1;
            }
            let corners = [(x - width / 2.0, y0), (x + width / 2.0, y1)];
            bars.push(Rectangle::new(corners, color.filled()));
            bars.push(Rectangle::new(corners, BLACK.stroke_width(1)));
        }
        chart
            .draw_series(bars)
            .map_err(|e| plot_err(&e))?
            .label(series.legend)
            .legend(move |(x, y)| {
                EmptyElement::at((x, y))
                    + Rectangle::new([(0, -6), (12, 6)], color.filled())
                    + Rectangle::new([(0, -6), (12, 6)], BLACK.stroke_width(1))
            });
    }

    if figure.series.len() > 1 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE)
            .border_style(&BLACK)
            .label_font(label_font.clone())
            .draw()
            .map_err(|e| plot_err(&e))?;
    }

    let tick_style = label_font
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    for (i, category) in figure.categories.iter().enumerate() {
        let (px, py) = chart.backend_coord(&(i as f64, 0.0));
        for (row, line) in category.lines().enumerate() {
            root.draw(&Text::new(
                line.to_string(),
                (px, py + 8 + row as i32 * line_height),
                tick_style.clone(),
            ))
            .map_err(|e| plot_err(&e))?;
        }
    }

    root.present().map_err(|e| plot_err(&e))?;
    Ok(())
}

/// Render every figure into `dir`, returning the written paths.
pub fn write_figures(dir: &Path, table: &ResultsTable) -> Result<Vec<PathBuf>, ExportError> {
    let mut written = Vec::new();
    for figure in figures(table)? {
        let path = dir.join(figure.file_name());
        render_png(&figure, &path, (1000, 700))?;
        info!(path = %path.display(), "wrote figure");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use approx::assert_relative_eq;

    fn find<'a>(figures: &'a [Figure], name: &str) -> &'a Figure {
        figures.iter().find(|f| f.name == name).unwrap()
    }

    #[test]
    fn file_names_are_numbered() {
        let figures = figures(&testing::table(true)).unwrap();
        let names: Vec<String> = figures.iter().map(Figure::file_name).collect();
        assert_eq!(names.len(), 10);
        assert_eq!(names[0], "config_tradeStudy_plot_01_MassBreakdown.png");
        assert_eq!(names[9], "config_tradeStudy_plot_10_SoundPressureLevel.png");
    }

    #[test]
    fn sound_pressure_figure_needs_noise_results() {
        let figures = figures(&testing::table(false)).unwrap();
        assert_eq!(figures.len(), 9);
        assert!(figures.iter().all(|f| f.number != 10));
    }

    #[test]
    fn stacked_mass_adds_up_to_takeoff_mass() {
        let table = testing::table(false);
        let figures = figures(&table).unwrap();
        let mass = find(&figures, "MassBreakdown");
        for (i, entry) in table.iter().enumerate() {
            let stacked: f64 = mass.series.iter().map(|s| s.values[i]).sum();
            let mtom = entry
                .solution
                .extract(&aircraft(av::MTOM), Unit::Kilogram)
                .unwrap();
            assert_relative_eq!(stacked, mtom, max_relative = 1e-12);
        }
    }

    #[test]
    fn hover_energy_counts_takeoff_and_landing_once_each() {
        let table = testing::table(false);
        let figures = figures(&table).unwrap();
        let hover = &find(&figures, "EnergyUse").series[1];
        let solution = &table.iter().next().unwrap().solution;
        let takeoff = solution
            .extract(&sizing(mission::TAKEOFF_ENERGY), Unit::KilowattHour)
            .unwrap();
        let landing = solution
            .extract(&sizing(mission::LANDING_ENERGY), Unit::KilowattHour)
            .unwrap();
        assert_relative_eq!(hover.values[0], takeoff + landing);
    }

    #[test]
    fn long_names_wrap_onto_two_lines() {
        let figures = figures(&testing::table(false)).unwrap();
        assert_eq!(figures[0].categories, ["Multirotor", "Coaxial\nheli"]);
        assert_eq!(category_label("Lift + cruise"), "Lift + cruise");
    }

    #[test]
    fn grouped_power_figure_keeps_three_series() {
        let figures = figures(&testing::table(false)).unwrap();
        let power = find(&figures, "BatteryPowerDraw");
        assert_eq!(power.layout, Layout::Grouped);
        let legends: Vec<_> = power.series.iter().map(|s| s.legend).collect();
        assert_eq!(legends, ["Cruise", "Hover", "Reserve"]);
        assert!(power.peak() > 0.0);
    }
}

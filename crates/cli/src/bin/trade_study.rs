use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use uam_cli::{init_logging, load_study, noise_model_for, solver_for};
use uam_trade_study::acoustics::NoiseModel;
use uam_trade_study::export_results;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Configuration trade study for on-demand aircraft"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve every configuration and write the report, sidecar and figures
    Run {
        /// Study file (TOML, YAML or JSON)
        #[arg(long)]
        config: PathBuf,

        /// Output directory (defaults to the study file's `output_dir`)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Skip PNG figures
        #[arg(long, default_value_t = false)]
        no_figures: bool,
    },
    /// Resolve and assemble every configuration without solving
    Validate {
        #[arg(long)]
        config: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            config,
            out,
            no_figures,
        } => {
            let study = load_study(&config)?;
            let solver = solver_for(&study)?;
            let noise = noise_model_for(&study);
            let table = study.run(&solver, noise.as_ref().map(|n| n as &dyn NoiseModel))?;

            let out = out.unwrap_or_else(|| study.config().output_dir.clone());
            let summary = export_results(&out, study.scenario(), &table, !no_figures)
                .with_context(|| format!("writing results to {}", out.display()))?;
            print!("{}", summary.report);
            info!(
                report = %summary.report_path.display(),
                figures = summary.figures.len(),
                "trade study complete"
            );
        }
        Command::Validate { config } => {
            let study = load_study(&config)?;
            let summaries = study.validate()?;
            let mut incomplete = 0;
            for summary in &summaries {
                println!(
                    "{}: {} aircraft substitutions, {} total",
                    summary.configuration,
                    summary.aircraft_substitutions,
                    summary.total_substitutions
                );
                for path in &summary.missing {
                    println!("  missing {path}");
                }
                if !summary.missing.is_empty() {
                    incomplete += 1;
                }
            }
            if incomplete > 0 {
                bail!("{incomplete} configuration(s) lack required aircraft inputs");
            }
        }
    }
    Ok(())
}

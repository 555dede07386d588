use std::path::{Path, PathBuf};

use clap::Parser;
use uam_cli::{init_logging, load_study, noise_model_for, solver_for};
use uam_trade_study::acoustics::NoiseModel;
use uam_trade_study::battery_sweep;
use uam_trade_study::export::{SWEEP_FILE, write_sweep_csv, write_sweep_figure};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Sweep battery specific energy for each configuration of a study"
)]
struct Cli {
    /// Study file (TOML, YAML or JSON)
    #[arg(long)]
    config: PathBuf,

    /// CSV output path, `-` for stdout (defaults to `<output_dir>/battery_sweep.csv`)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Skip the sensitivity figure (written next to the CSV, or to
    /// `<output_dir>` when the CSV goes to stdout)
    #[arg(long)]
    no_figures: bool,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let study = load_study(&cli.config)?;
    let solver = solver_for(&study)?;
    let noise = noise_model_for(&study);

    let records = battery_sweep(&study, &solver, noise.as_ref().map(|n| n as &dyn NoiseModel))?;
    let output = cli
        .output
        .unwrap_or_else(|| study.config().output_dir.join(SWEEP_FILE));
    write_sweep_csv(&output, &records)?;

    if !cli.no_figures {
        let dir = if output == Path::new("-") {
            study.config().output_dir.clone()
        } else {
            output.parent().map(Path::to_path_buf).unwrap_or_default()
        };
        write_sweep_figure(&dir, &records)?;
    }
    Ok(())
}

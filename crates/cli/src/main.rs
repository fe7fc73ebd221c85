//! Thermofin CLI - steady-state cooling fin analysis.
//!
//! Solves the 1D fin equation for a fin described by a preset, a TOML file
//! and command-line flags, then reports total heat transfer, efficiency,
//! effectiveness and the fin parameter `m`.

mod input;
mod output;
mod presets;

use std::{borrow::Cow, path::PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use thermofin_core::units::TemperatureUnit;
use thermofin_fin::{
    Action, Config, Event, Evaluation, FinParameters, TipCondition, analyze, solve_with,
    sweep_lengths,
};
use uom::si::{f64::Length, length::meter, ratio::ratio};

use input::{FinInput, FinPatch, Scale, TipInput};
use output::Format;
use presets::Preset;

/// Steady-state cooling fin solver.
#[derive(Parser)]
#[command(name = "thermofin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve one fin and report its temperature profile and metrics.
    Solve {
        #[command(flatten)]
        fin: FinArgs,

        /// Write metrics and the profile to a CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Output format.
        #[arg(short, long, default_value = "text")]
        format: Format,

        /// Print solver progress to stderr.
        #[arg(short, long)]
        verbose: bool,
    },

    /// Evaluate the same fin over several lengths in parallel.
    Sweep {
        #[command(flatten)]
        fin: FinArgs,

        /// Fin lengths in meters, comma separated.
        #[arg(long, value_delimiter = ',', required = true)]
        lengths: Vec<f64>,

        /// Output format.
        #[arg(short, long, default_value = "text")]
        format: Format,
    },

    /// List the built-in presets.
    Presets,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TipKind {
    Adiabatic,
    Convective,
    Fixed,
}

/// Fin description shared by `solve` and `sweep`.
///
/// Layers apply in order: baseline, `--preset`, `--config`, then flags.
#[derive(Args)]
struct FinArgs {
    /// Start from a named preset.
    #[arg(short, long)]
    preset: Option<Preset>,

    /// TOML file with fin parameters.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Thermal conductivity k [W/(m·K)].
    #[arg(short = 'k', long)]
    conductivity: Option<f64>,

    /// Convection coefficient h [W/(m²·K)].
    #[arg(long)]
    convection: Option<f64>,

    /// Rectangular fin thickness t [m].
    #[arg(long)]
    thickness: Option<f64>,

    /// Rectangular fin width b [m].
    #[arg(long)]
    width: Option<f64>,

    /// Cross-sectional area A [m²], overrides thickness and width.
    #[arg(long, requires = "perimeter")]
    area: Option<f64>,

    /// Wetted perimeter P [m], overrides thickness and width.
    #[arg(long, requires = "area")]
    perimeter: Option<f64>,

    /// Fin length L [m].
    #[arg(short = 'L', long)]
    length: Option<f64>,

    /// Base temperature T_b.
    #[arg(long)]
    base_temperature: Option<f64>,

    /// Ambient temperature T_inf.
    #[arg(long)]
    ambient_temperature: Option<f64>,

    /// Number of grid nodes (3 to 10,000,000).
    #[arg(short, long)]
    nodes: Option<usize>,

    /// Tip boundary condition.
    #[arg(long)]
    tip: Option<TipKind>,

    /// Tip temperature for a fixed tip.
    #[arg(long)]
    tip_temperature: Option<f64>,

    /// Temperature scale for input and output.
    #[arg(short, long)]
    unit: Option<Scale>,
}

impl FinArgs {
    fn patch(&self) -> Result<FinPatch> {
        let tip = match (self.tip, self.tip_temperature) {
            (None, None) => None,
            (Some(TipKind::Adiabatic), None) => Some(TipInput::Adiabatic),
            (Some(TipKind::Convective), None) => Some(TipInput::Convective),
            (Some(TipKind::Fixed) | None, Some(temperature)) => {
                Some(TipInput::Fixed { temperature })
            }
            (Some(TipKind::Fixed), None) => bail!("--tip fixed needs --tip-temperature"),
            (Some(_), Some(_)) => bail!("--tip-temperature only applies to --tip fixed"),
        };

        Ok(FinPatch {
            conductivity: self.conductivity,
            convection: self.convection,
            thickness: self.thickness,
            width: self.width,
            area: self.area,
            perimeter: self.perimeter,
            length: self.length,
            base_temperature: self.base_temperature,
            ambient_temperature: self.ambient_temperature,
            nodes: self.nodes,
            tip,
            unit: self.unit,
        })
    }

    fn resolve(&self) -> Result<FinInput> {
        let mut input = FinInput::default();
        if let Some(preset) = self.preset {
            input.apply(&preset.patch());
        }
        if let Some(path) = &self.config {
            input.apply(&FinPatch::from_toml_file(path)?);
        }
        input.apply(&self.patch()?);
        Ok(input)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            fin,
            csv,
            format,
            verbose,
        } => run_solve(&fin, csv, format, verbose),
        Commands::Sweep {
            fin,
            lengths,
            format,
        } => run_sweep(&fin, &lengths, format),
        Commands::Presets => {
            for preset in Preset::ALL {
                println!("{:<16} {}", preset.name(), preset.description());
            }
            Ok(())
        }
    }
}

fn run_solve(fin: &FinArgs, csv: Option<PathBuf>, format: Format, verbose: bool) -> Result<()> {
    let input = fin.resolve()?;
    let params = FinParameters::new(input.to_config()?).context("Invalid fin parameters")?;

    if verbose {
        eprintln!(
            "info: solving {} nodes over L = {} m, tip {}",
            params.nodes(),
            params.length().get::<meter>(),
            tip_name(params.tip(), input.unit),
        );
    }

    let mut rows = 0_usize;
    let mut weakest = f64::INFINITY;
    let observer = |event: &Event| -> Option<Action> {
        rows += 1;
        weakest = weakest.min(event.relative_pivot());
        None
    };
    let profile =
        solve_with(&params, &Config::default(), observer).context("Fin solve failed")?;

    if verbose {
        eprintln!("info: eliminated {rows} rows, smallest relative pivot {weakest:.3e}");
    }

    let metrics = analyze(&params, &profile).context("Fin analysis failed")?;
    if verbose {
        eprintln!("info: heat rate from {:?}", metrics.method);
    }
    if !metrics.efficiency.is_physical() {
        eprintln!(
            "warning: fin efficiency {:.4} is outside [0, 1]; check the grid and tip condition",
            metrics.efficiency.get::<ratio>()
        );
    }

    let unit = input.unit;
    let evaluation = Evaluation {
        params,
        profile,
        metrics,
    };
    match format {
        Format::Text => print!("{}", output::summary(&evaluation.metrics)),
        Format::Json => println!("{}", output::json(&evaluation, unit)?),
    }

    if let Some(path) = csv {
        output::export_csv(&path, &evaluation, unit)?;
        if verbose {
            eprintln!("info: wrote {}", path.display());
        }
    }

    Ok(())
}

fn run_sweep(fin: &FinArgs, lengths: &[f64], format: Format) -> Result<()> {
    let input = fin.resolve()?;
    let config = input.to_config()?;
    let lengths: Vec<Length> = lengths.iter().copied().map(Length::new::<meter>).collect();

    let evaluations = sweep_lengths(&config, &lengths)
        .into_iter()
        .zip(&lengths)
        .map(|(result, length)| {
            result.with_context(|| format!("Evaluation failed at L = {} m", length.get::<meter>()))
        })
        .collect::<Result<Vec<_>>>()?;

    match format {
        Format::Text => {
            println!("{:>10} {:>12} {:>8} {:>8} {:>8}", "L [m]", "Q [W]", "η", "ε", "m [1/m]");
            for evaluation in &evaluations {
                let [q, eta, eps, m] = evaluation.metrics.rows();
                println!(
                    "{:>10.4} {:>12.3} {:>8.3} {:>8.3} {:>8.1}",
                    evaluation.params.length().get::<meter>(),
                    q.value,
                    eta.value,
                    eps.value,
                    m.value,
                );
            }
        }
        Format::Json => println!("{}", output::json_many(&evaluations, input.unit)?),
    }

    Ok(())
}

fn tip_name(tip: TipCondition, unit: TemperatureUnit) -> Cow<'static, str> {
    match tip {
        TipCondition::Adiabatic => Cow::Borrowed("adiabatic"),
        TipCondition::Convective => Cow::Borrowed("convective"),
        TipCondition::FixedTemperature(t) => {
            Cow::Owned(format!("fixed at {} {}", unit.value(t), unit.symbol()))
        }
    }
}

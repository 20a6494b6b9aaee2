use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{WrapErr, bail};
use streamsweep::{ConfigSource, Overrides, PlanFormat, commands, init_logging, settings};
use streamsweep_core::Preset;

#[derive(Parser, Debug)]
#[command(name = "streamsweep")]
#[command(about = "Resumable parameter sweeps over an external stream-mining evaluator")]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    /// Write logs to `<DIR>/streamsweep.log` instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run this node's share of the sweep, skipping finished combinations
    Run(SweepArgs),
    /// List this node's combinations and whether each is done, without running anything
    Plan {
        #[command(flatten)]
        sweep: SweepArgs,

        #[arg(long, value_enum, default_value_t = PlanFormat::Text)]
        format: PlanFormat,
    },
    /// Count instances in ARFF files and show the derived run parameters
    Count {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Number of evaluation reports per stream
        #[arg(long, default_value_t = 10)]
        reporting_points: u64,
    },
    /// Print a built-in sweep definition as YAML
    Preset {
        #[arg(value_parser = parse_preset)]
        name: Preset,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct SweepArgs {
    /// YAML sweep definition
    #[arg(short, long, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Built-in sweep definition (arff, imbalanced, drift)
    #[arg(short, long, value_parser = parse_preset)]
    preset: Option<Preset>,

    /// Total number of nodes sharing the sweep
    #[arg(long)]
    nodes: Option<usize>,

    /// This node's 0-based index
    #[arg(short, long)]
    node: Option<usize>,

    /// Directory result files are written to
    #[arg(long)]
    results_dir: Option<PathBuf>,

    /// Directory ARFF dataset paths are resolved against
    #[arg(long)]
    base_dir: Option<PathBuf>,
}

fn parse_preset(s: &str) -> Result<Preset, String> {
    s.parse()
}

impl SweepArgs {
    fn resolve(&self) -> color_eyre::Result<streamsweep_core::SweepConfig> {
        let source = match (&self.config, self.preset) {
            (Some(path), _) => ConfigSource::File(path.clone()),
            (None, Some(preset)) => ConfigSource::Preset(preset),
            (None, None) => bail!("either --config or --preset is required"),
        };
        let overrides = Overrides {
            nodes: self.nodes,
            node: self.node,
            results_dir: self.results_dir.clone(),
            base_dir: self.base_dir.clone(),
        };
        let config = settings::resolve(&source, &overrides)
            .wrap_err("Failed to load sweep configuration")?;
        config.validate()?;
        Ok(config)
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.log_dir.as_deref(), &cli.log_level)?;

    let stdout = std::io::stdout();
    match cli.command {
        Command::Run(args) => {
            let config = args.resolve()?;
            commands::run(config, stdout.lock())?;
        }
        Command::Plan { sweep, format } => {
            let config = sweep.resolve()?;
            commands::plan(&config, format, stdout.lock())?;
        }
        Command::Count {
            files,
            reporting_points,
        } => {
            let failures = commands::count(&files, reporting_points, stdout.lock())?;
            if failures > 0 {
                tracing::warn!(failures, "Some files could not be counted");
            }
        }
        Command::Preset { name, output } => {
            commands::preset(name, output.as_deref(), stdout.lock())?;
        }
    }

    Ok(())
}

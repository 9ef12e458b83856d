use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::warn;
use yaml2gcode::{init_logging, Config, Job};

/// Expand a YAML macro file into G-code
#[derive(Parser, Debug)]
#[command(
    name = "yaml2gcode",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"),
    about
)]
struct Cli {
    /// Input YAML file
    input: PathBuf,

    /// Output file, `-` for stdout (default from config, `out.nc`)
    output: Option<PathBuf>,

    /// Config file (.toml or .json)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Fail when any inline error comment would be emitted
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("invalid config file {}", path.display()))?,
        None => Config::load_default().context("invalid default config file")?,
    };
    if cli.strict {
        config.output.strict = true;
    }
    Ok(config)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    let job = Job {
        input: cli.input,
        output: cli.output,
        config,
    };

    let rendered = job.run()?;
    if !rendered.diagnostics.is_empty() {
        warn!(
            "{} inline error(s) written to the output",
            rendered.diagnostics.len()
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.verbose) {
        eprintln!("warning: {:#}", err);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

//! # yaml2gcode
//!
//! Expands a YAML macro language for CNC toolpaths into flat G-code.
//!
//! ## Architecture
//!
//! yaml2gcode is organized as a workspace with multiple crates:
//!
//! 1. **yaml2gcode-core** - Error types, number formatting, motion commands
//! 2. **yaml2gcode-camtools** - Polar vectors, arcs, box rasters, rotation
//! 3. **yaml2gcode-macros** - Loader, macro registry, interpreter, emitter
//! 4. **yaml2gcode-settings** - Configuration files
//! 5. **yaml2gcode** - Command-line binary that ties them together

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

pub use yaml2gcode_core::{Error, Result};
pub use yaml2gcode_macros::{render, CodeEmitter, EmitterOptions, Program, Rendered};
pub use yaml2gcode_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Output path meaning standard output
pub const STDOUT_PATH: &str = "-";

/// Initialize logging
///
/// Log lines go to stderr so G-code can be piped from stdout. The level
/// follows `verbosity` (0 = warn, 1 = info, 2 = debug, 3+ = trace) unless
/// `RUST_LOG` is set.
pub fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(verbosity >= 2);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(())
}

/// One compilation job
#[derive(Debug, Clone)]
pub struct Job {
    pub input: PathBuf,
    /// `None` falls back to the configured default file
    pub output: Option<PathBuf>,
    pub config: Config,
}

impl Job {
    /// Where the output goes, after applying the configured default
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.config.output.default_file.clone())
    }

    /// Compile the input file to G-code text
    pub fn compile(&self) -> anyhow::Result<Rendered> {
        let program = Program::load(&self.input)
            .with_context(|| format!("failed to load {}", self.input.display()))?;
        let rendered = CodeEmitter::new(self.config.emitter_options())
            .render(&program)
            .with_context(|| format!("failed to compile {}", self.input.display()))?;
        Ok(rendered)
    }

    /// Compile and write the result
    pub fn run(&self) -> anyhow::Result<Rendered> {
        let rendered = self.compile()?;
        let output = self.output_path();
        write_output(&output, &rendered.text)?;
        info!(
            "Wrote {} bytes to {} ({} diagnostics)",
            rendered.text.len(),
            output.display(),
            rendered.diagnostics.len()
        );
        Ok(rendered)
    }
}

/// Write G-code to a file, or to stdout when the path is `-`
pub fn write_output(path: &Path, text: &str) -> anyhow::Result<()> {
    if path.as_os_str() == STDOUT_PATH {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        lock.write_all(text.as_bytes())
            .context("failed to write to stdout")?;
        lock.flush().context("failed to flush stdout")?;
        return Ok(());
    }

    std::fs::write(path, text)
        .with_context(|| format!("failed to write {}", path.display()))
}

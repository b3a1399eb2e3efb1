// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Centralized logging setup for keypath binaries.
//!
//! Console output goes to stderr so stdout stays free for the document being
//! rewritten. `RUST_LOG` overrides the level chosen on the command line.

use std::io;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Re-export Level for convenience
pub use tracing::Level;

/// Output format for log messages
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable plaintext format
    #[default]
    Plaintext,
    /// Structured JSON format
    Json,
}

/// CLI log level enum for clap integration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CliLogLevel {
    Error,
    /// Default: only problems worth a user's attention
    #[default]
    Warn,
    Info,
    /// Every override applied
    Debug,
    /// Every container created or grown
    Trace,
}

impl From<CliLogLevel> for Level {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => Level::ERROR,
            CliLogLevel::Warn => Level::WARN,
            CliLogLevel::Info => Level::INFO,
            CliLogLevel::Debug => Level::DEBUG,
            CliLogLevel::Trace => Level::TRACE,
        }
    }
}

/// Logging flags shared by keypath binaries; use with `#[command(flatten)]`
#[derive(Clone, Debug, Default, clap::Args)]
pub struct CliLoggingArgs {
    /// Log verbosity level
    #[arg(long, value_enum, global = true, env = "KEYPATH_LOG_LEVEL")]
    pub log_level: Option<CliLogLevel>,

    /// Log output format
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<String>,
}

impl CliLoggingArgs {
    /// Initialize logging based on the parsed CLI arguments
    pub fn init(self, component: &str) -> anyhow::Result<()> {
        let level = self.log_level.unwrap_or_default().into();
        let format = self.log_format.unwrap_or_default();

        match &self.log_file {
            Some(path) => init_to_file(component, level, format, Path::new(path)),
            None => init(component, level, format),
        }
    }
}

/// Initialize console logging on stderr
pub fn init(component: &str, default_level: Level, format: LogFormat) -> anyhow::Result<()> {
    init_with_writer(component, default_level, format, io::stderr)
}

/// Initialize logging to a file, creating parent directories as needed
pub fn init_to_file(
    component: &str,
    default_level: Level,
    format: LogFormat,
    log_path: &Path,
) -> anyhow::Result<()> {
    use std::fs;

    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let log_file = fs::OpenOptions::new().create(true).append(true).open(log_path)?;

    init_with_writer(component, default_level, format, log_file)
}

/// Initialize logging with a custom writer
///
/// # Arguments
/// * `component` - The component name, used as an extra filter directive
/// * `default_level` - Default log level when RUST_LOG is not set
/// * `format` - Output format for log messages
/// * `writer` - Where to write log output
pub fn init_with_writer<W>(
    component: &str,
    default_level: Level,
    format: LogFormat,
    writer: W,
) -> anyhow::Result<()>
where
    W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(component, default_level)));

    match format {
        LogFormat::Json => {
            let layer = tracing_subscriber::fmt::layer().with_writer(writer).json();
            #[cfg(debug_assertions)]
            let layer = layer.with_file(true).with_line_number(true);

            tracing_subscriber::registry().with(filter).with(layer).try_init()?;
        }
        LogFormat::Plaintext => {
            let layer = tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false);
            #[cfg(debug_assertions)]
            let layer = layer.with_file(true).with_line_number(true);

            tracing_subscriber::registry().with(filter).with(layer).try_init()?;
        }
    }

    Ok(())
}

/// Filter directives used when RUST_LOG is unset
fn default_directives(component: &str, level: Level) -> String {
    // Crate targets use underscores
    let target = component.replace('-', "_");
    format!("{level},{target}={level},keypath_core={level}")
}

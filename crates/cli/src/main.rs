//! LiftLog CLI entry point.
//!
//! This binary is the composition root for the workspace. Responsibilities:
//!
//! 1. **Parse configuration**: command-line flags via `clap`, optionally layered
//!    over a TOML file passed with `--config`.
//! 2. **Wire observability**: install a `tracing-subscriber` with a pretty or
//!    JSON formatter, plus an OpenTelemetry OTLP exporter when an endpoint is
//!    configured. Spans and events from every crate flow through it.
//! 3. **Construct ports**: satisfy the `tracker` ports with the in-memory
//!    implementations and inject them into the `usecases` bundles.
//! 4. **Run the subcommand** and print its result on stdout.

mod commands;
mod config;
mod observability;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::observability::{LogFormat, LogLevel};

/// Workout tracking from the command line.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, env = "LIFTLOG_CONFIG")]
    config: Option<PathBuf>,

    /// Log level; overrides `[logging] level`
    #[arg(long, env = "LIFTLOG_LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,

    /// Log formatter; overrides `[logging] format`
    #[arg(long, env = "LIFTLOG_LOG_FORMAT", value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Increment the counter N times and print its value
    Counter {
        #[arg(default_value_t = 1)]
        times: u32,
    },
    /// Run a scripted workout session and print the completed log as JSON
    Demo,
}

impl Cli {
    fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    let _guard = observability::init(&config.logging)?;

    match cli.command {
        Command::Counter { times } => {
            let value = commands::counter(&config.counter, times).await?;
            println!("{value}");
        }
        Command::Demo => {
            let log = commands::demo().await?;
            println!("{}", serde_json::to_string_pretty(&log)?);
        }
    }

    Ok(())
}

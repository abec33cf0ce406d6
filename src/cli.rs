// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::types::FailurePolicy;

/// Command-line arguments for `parbuild`.
///
/// With no arguments the two built-in build commands are run.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "parbuild",
    version,
    about = "Run a fixed set of build commands in parallel.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to an optional config file (TOML) replacing the built-in commands.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of parallel workers.
    ///
    /// Default: available parallelism minus one (at least one).
    #[arg(long, short = 'j', value_name = "N")]
    pub jobs: Option<usize>,

    /// What to do when a command exits non-zero.
    #[arg(long, value_enum, value_name = "POLICY")]
    pub on_failure: Option<FailurePolicy>,

    /// Working directory for the commands (defaults to the current one).
    #[arg(long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PARBUILD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve and lint the commands, print them, but don't execute anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

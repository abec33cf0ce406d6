// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;

use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::{lint_commands, resolve_config, ConfigFile, LintWarning};
use crate::engine::{Runner, RunnerOptions, RunSummary};
use crate::errors::Result;
use crate::exec::ShellBackend;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config resolution (built-in commands, optional TOML file, CLI overrides)
/// - command linting (warnings only)
/// - the worker pool runner with the real shell backend
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = resolve_config(&args)?;
    let options = RunnerOptions::from_config(&cfg);

    let warnings = lint_commands(&cfg.commands)?;
    for warning in &warnings {
        warn!(%warning, "suspicious shell syntax; the command runs unchanged");
    }

    if args.dry_run {
        print_dry_run(&cfg, &options, &warnings);
        return Ok(());
    }

    let runner = Runner::new(ShellBackend::new(), options);
    let summary = runner.run(cfg.commands).await?;
    log_summary(&summary);

    Ok(())
}

fn log_summary(summary: &RunSummary) {
    info!(
        attempted = summary.attempted(),
        failed = summary.failed().count(),
        skipped = summary.skipped(),
        "all commands finished"
    );
}

/// Simple dry-run output: print commands, pool size and policy.
fn print_dry_run(cfg: &ConfigFile, options: &RunnerOptions, warnings: &[LintWarning]) {
    println!("parbuild dry-run");
    println!("  workers = {}", options.workers);
    println!("  on_command_failure = {}", options.on_command_failure);
    match &options.diagnostic_cmd {
        Some(diag) => println!("  diagnostic_cmd = {diag}"),
        None => println!("  diagnostic_cmd = (disabled)"),
    }
    if let Some(dir) = &options.working_dir {
        println!("  working_dir = {}", dir.display());
    }
    println!();

    println!("commands ({}):", cfg.commands.len());
    for (idx, cmd) in cfg.commands.iter().enumerate() {
        println!("  {idx}: {cmd}");
    }

    if !warnings.is_empty() {
        println!();
        println!("warnings ({}):", warnings.len());
        for warning in warnings {
            println!("  - {warning}");
        }
    }

    debug!("dry-run complete (no execution)");
}

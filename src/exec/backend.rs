// src/exec/backend.rs

//! Pluggable command backend abstraction.
//!
//! The runner talks to a `CommandBackend` instead of spawning processes
//! directly, so tests can swap in a fake that records commands and returns
//! scripted outcomes.
//!
//! - `ShellBackend` is the default implementation used by `parbuild`. It runs
//!   each command line through the platform shell with inherited stdio.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use anyhow::Context;
use tokio::process::Command;
use tracing::debug;

use crate::errors::Result;
use crate::types::CommandOutcome;

/// Per-run settings every command is executed with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecContext {
    /// Directory the child process starts in; `None` inherits ours.
    pub working_dir: Option<PathBuf>,
}

/// Trait abstracting how a single command line is executed.
///
/// Production code uses [`ShellBackend`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait CommandBackend: Send + Sync {
    /// Run `cmd` to completion and report how it exited.
    ///
    /// `Err` means the command could not be run at all (e.g. the shell is
    /// missing), as opposed to running and exiting non-zero.
    fn run<'a>(
        &'a self,
        cmd: &'a str,
        ctx: &'a ExecContext,
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutcome>> + Send + 'a>>;
}

/// Build a shell command appropriate for the platform.
pub fn shell_command(cmd: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmd);
        c
    }
}

/// Real backend used in production.
///
/// The child inherits stdin/stdout/stderr, so whatever it prints shows up
/// directly in the launcher's output.
#[derive(Debug, Clone, Default)]
pub struct ShellBackend;

impl ShellBackend {
    pub fn new() -> Self {
        Self
    }
}

impl CommandBackend for ShellBackend {
    fn run<'a>(
        &'a self,
        cmd: &'a str,
        ctx: &'a ExecContext,
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutcome>> + Send + 'a>> {
        Box::pin(async move {
            let mut command = shell_command(cmd);
            if let Some(dir) = &ctx.working_dir {
                command.current_dir(dir);
            }
            // Kill the child if the owning pool task is aborted.
            command.kill_on_drop(true);

            let status = command
                .status()
                .await
                .with_context(|| format!("spawning shell for command '{cmd}'"))?;

            debug!(cmd, code = ?status.code(), "shell exited");

            Ok(CommandOutcome::from_exit_code(status.code(), status.success()))
        })
    }
}

// src/exec/task_runner.rs

//! Individual build job runner.

use tracing::{debug, error, info};

use crate::exec::backend::{CommandBackend, ExecContext};
use crate::types::CommandOutcome;

/// One command line to run, tagged with its position in the input list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildJob {
    pub index: usize,
    pub cmd: String,
}

impl BuildJob {
    pub fn new(index: usize, cmd: impl Into<String>) -> Self {
        Self {
            index,
            cmd: cmd.into(),
        }
    }
}

/// Settings shared by every job of a run.
#[derive(Debug, Clone, Default)]
pub struct JobSettings {
    pub exec: ExecContext,
    /// Run before the job's command; its outcome is discarded.
    pub diagnostic_cmd: Option<String>,
}

/// Run a single build job:
///
/// 1. print `BUILDING <cmd>` on stdout,
/// 2. run the diagnostic command (if any) and ignore its result,
/// 3. run the job's command and wait for it.
///
/// Never fails: a command that cannot even be spawned is logged and reported
/// as `Failed(-1)`, so the caller's failure policy decides what happens.
pub async fn run_build_process<B>(
    job: &BuildJob,
    backend: &B,
    settings: &JobSettings,
) -> CommandOutcome
where
    B: CommandBackend + ?Sized,
{
    println!("BUILDING {}", job.cmd);

    if let Some(diag) = settings.diagnostic_cmd.as_deref() {
        match backend.run(diag, &settings.exec).await {
            Ok(outcome) => debug!(
                job = job.index,
                cmd = diag,
                ?outcome,
                "diagnostic command finished"
            ),
            Err(err) => debug!(
                job = job.index,
                cmd = diag,
                error = %err,
                "diagnostic command could not run"
            ),
        }
    }

    info!(job = job.index, cmd = %job.cmd, "starting build command");

    let outcome = match backend.run(&job.cmd, &settings.exec).await {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(
                job = job.index,
                cmd = %job.cmd,
                error = %err,
                "build command could not be started"
            );
            CommandOutcome::Failed(-1)
        }
    };

    let exit_code = match outcome {
        CommandOutcome::Success => 0,
        CommandOutcome::Failed(code) => code,
    };

    info!(
        job = job.index,
        cmd = %job.cmd,
        exit_code,
        success = outcome.is_success(),
        "build command exited"
    );

    outcome
}

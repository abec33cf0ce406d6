// src/engine/runner.rs

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::{ConfigFile, DEFAULT_DIAGNOSTIC_CMD};
use crate::errors::{ParbuildError, Result};
use crate::exec::{run_build_process, BuildJob, CommandBackend, ExecContext, JobSettings};
use crate::types::{CommandOutcome, FailurePolicy};

use super::pool::{detect_parallelism, pool_size, StopSignal, WorkerPool};
use super::summary::{JobReport, JobStatus, RunSummary};

/// Runner options, normally derived from a [`ConfigFile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerOptions {
    pub workers: usize,
    pub on_command_failure: FailurePolicy,
    pub diagnostic_cmd: Option<String>,
    pub working_dir: Option<PathBuf>,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            workers: pool_size(detect_parallelism()),
            on_command_failure: FailurePolicy::default(),
            diagnostic_cmd: Some(DEFAULT_DIAGNOSTIC_CMD.to_string()),
            working_dir: None,
        }
    }
}

impl RunnerOptions {
    pub fn from_config(cfg: &ConfigFile) -> Self {
        Self {
            workers: cfg
                .jobs
                .unwrap_or_else(|| pool_size(detect_parallelism())),
            on_command_failure: cfg.on_command_failure,
            diagnostic_cmd: cfg.diagnostic_cmd.clone(),
            working_dir: cfg.working_dir.clone(),
        }
    }
}

/// Runs a list of independent command lines on a fixed-size worker pool.
///
/// Every command is attempted at most once. Under `ignore` and `log` every
/// command is attempted regardless of how the others exit, and the run
/// succeeds; under `abort` a failure stops dispatch of jobs that have not
/// started yet and the run returns [`ParbuildError::CommandFailed`].
pub struct Runner<B: CommandBackend> {
    backend: Arc<B>,
    options: RunnerOptions,
}

impl<B: CommandBackend> fmt::Debug for Runner<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runner")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<B: CommandBackend + 'static> Runner<B> {
    pub fn new(backend: B, options: RunnerOptions) -> Self {
        Self {
            backend: Arc::new(backend),
            options,
        }
    }

    pub fn options(&self) -> &RunnerOptions {
        &self.options
    }

    /// Run every command and wait for all of them.
    pub async fn run(&self, commands: Vec<String>) -> Result<RunSummary> {
        let pool = WorkerPool::new(self.options.workers);
        let policy = self.options.on_command_failure;

        info!(
            workers = pool.size(),
            commands = commands.len(),
            policy = %policy,
            "starting build run"
        );

        let settings = Arc::new(JobSettings {
            exec: ExecContext {
                working_dir: self.options.working_dir.clone(),
            },
            diagnostic_cmd: self.options.diagnostic_cmd.clone(),
        });
        let stop = pool.stop_signal();

        let jobs: Vec<BuildJob> = commands
            .iter()
            .enumerate()
            .map(|(index, cmd)| BuildJob::new(index, cmd.as_str()))
            .collect();

        let outcomes = pool
            .scope(jobs, |job| {
                let backend = Arc::clone(&self.backend);
                let settings = Arc::clone(&settings);
                let stop = stop.clone();
                async move {
                    let outcome = run_build_process(&job, backend.as_ref(), &settings).await;
                    if let CommandOutcome::Failed(code) = outcome {
                        report_failure(&job, code, policy, &stop);
                    }
                    outcome
                }
            })
            .await?;

        let summary = RunSummary {
            jobs: commands
                .into_iter()
                .zip(outcomes)
                .enumerate()
                .map(|(index, (cmd, outcome))| JobReport {
                    index,
                    cmd,
                    status: outcome.map_or(JobStatus::Skipped, JobStatus::Finished),
                })
                .collect(),
        };

        finish_run(&summary, policy)?;
        Ok(summary)
    }
}

/// Called from the worker as soon as its command fails.
fn report_failure(job: &BuildJob, code: i32, policy: FailurePolicy, stop: &StopSignal) {
    match policy {
        FailurePolicy::Ignore => {}
        FailurePolicy::Log => {
            warn!(job = job.index, cmd = %job.cmd, exit_code = code, "build command failed");
        }
        FailurePolicy::Abort => {
            error!(
                job = job.index,
                cmd = %job.cmd,
                exit_code = code,
                "build command failed; not starting remaining commands"
            );
            stop.stop();
        }
    }
}

/// Apply the failure policy to the joined run.
fn finish_run(summary: &RunSummary, policy: FailurePolicy) -> Result<()> {
    let failed = summary.failed().count();

    match policy {
        FailurePolicy::Ignore => {}
        FailurePolicy::Log => {
            if failed > 0 {
                warn!(
                    failed,
                    total = summary.jobs.len(),
                    "build run finished with failed commands"
                );
            } else {
                info!(total = summary.jobs.len(), "build run finished");
            }
        }
        FailurePolicy::Abort => {
            if let Some(first) = summary.first_failure() {
                return Err(ParbuildError::CommandFailed {
                    cmd: first.cmd.clone(),
                    code: first.failure_code().unwrap_or(-1),
                });
            }
            info!(total = summary.jobs.len(), "build run finished");
        }
    }

    Ok(())
}

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

/// What the runner does when a command exits non-zero.
///
/// - `Ignore`: swallow the failure; nothing is reported by the runner.
/// - `Log`: report the failure (and a summary after the join), then carry on
///   (default behaviour).
/// - `Abort`: report the failure, stop handing out jobs that have not started
///   yet, and make the run fail once in-flight jobs have finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    Ignore,
    Log,
    Abort,
}

impl Default for FailurePolicy {
    fn default() -> Self {
        FailurePolicy::Log
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ignore" => Ok(FailurePolicy::Ignore),
            "log" => Ok(FailurePolicy::Log),
            "abort" => Ok(FailurePolicy::Abort),
            other => Err(format!(
                "invalid on_command_failure: {other} (expected \"ignore\", \"log\" or \"abort\")"
            )),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailurePolicy::Ignore => "ignore",
            FailurePolicy::Log => "log",
            FailurePolicy::Abort => "abort",
        };
        f.write_str(s)
    }
}

/// Outcome of a single command process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Success,
    /// Exit code, or `-1` when the process was killed by a signal or could
    /// not be spawned.
    Failed(i32),
}

impl CommandOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CommandOutcome::Success)
    }

    pub fn from_exit_code(code: Option<i32>, success: bool) -> Self {
        if success {
            CommandOutcome::Success
        } else {
            CommandOutcome::Failed(code.unwrap_or(-1))
        }
    }
}

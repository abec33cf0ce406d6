use std::str::FromStr;

use crate::config::model::{ConfigFile, RawConfigFile, DEFAULT_DIAGNOSTIC_CMD};
use crate::errors::{ParbuildError, Result};
use crate::types::FailurePolicy;

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - there is at least one command
/// - no command is empty or whitespace-only
/// - `on_command_failure` is one of "ignore", "log", "abort"
/// - `jobs`, when given, is >= 1
///
/// It does **not** check shell syntax; see [`crate::config::lint`].
pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_commands(cfg)?;
    validate_global_config(cfg)?;
    Ok(())
}

fn ensure_has_commands(cfg: &RawConfigFile) -> Result<()> {
    if cfg.commands.is_empty() {
        return Err(ParbuildError::ConfigError(
            "config must contain at least one entry in `commands`".to_string(),
        ));
    }

    if let Some(idx) = cfg.commands.iter().position(|c| c.trim().is_empty()) {
        return Err(ParbuildError::ConfigError(format!(
            "command #{idx} in `commands` is empty"
        )));
    }

    Ok(())
}

fn validate_global_config(cfg: &RawConfigFile) -> Result<()> {
    FailurePolicy::from_str(&cfg.config.on_command_failure).map_err(|e| {
        ParbuildError::ConfigError(format!("invalid [config].on_command_failure: {e}"))
    })?;

    validate_jobs(cfg.config.jobs, "[config].jobs")?;

    Ok(())
}

/// `jobs` must be positive when given; shared with the `--jobs` override.
pub(crate) fn validate_jobs(jobs: Option<usize>, origin: &str) -> Result<()> {
    if jobs == Some(0) {
        return Err(ParbuildError::ConfigError(format!(
            "{origin} must be >= 1 (got 0)"
        )));
    }
    Ok(())
}

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = ParbuildError;

    fn try_from(raw: RawConfigFile) -> Result<Self> {
        validate_config(&raw)?;

        let on_command_failure = FailurePolicy::from_str(&raw.config.on_command_failure)
            .map_err(ParbuildError::ConfigError)?;

        // Absent means the default `pwd`; an explicit empty string disables it.
        let diagnostic_cmd = match raw.config.diagnostic_cmd {
            None => Some(DEFAULT_DIAGNOSTIC_CMD.to_string()),
            Some(s) if s.trim().is_empty() => None,
            Some(s) => Some(s),
        };

        Ok(ConfigFile {
            on_command_failure,
            jobs: raw.config.jobs,
            diagnostic_cmd,
            working_dir: raw.config.working_dir,
            commands: raw.commands,
        })
    }
}

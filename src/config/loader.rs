// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::cli::CliArgs;
use crate::config::model::{ConfigFile, RawConfigFile};
use crate::config::validate::validate_jobs;
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run basic validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Build the effective configuration for a run.
///
/// - No `--config`: the built-in commands and defaults.
/// - `--config PATH`: the validated file.
///
/// `--jobs`, `--on-failure` and `--dir` then override whatever the file (or
/// the defaults) said.
pub fn resolve_config(args: &CliArgs) -> Result<ConfigFile> {
    let mut cfg = match &args.config {
        Some(path) => load_and_validate(path)?,
        None => ConfigFile::builtin(),
    };

    if let Some(jobs) = args.jobs {
        validate_jobs(Some(jobs), "--jobs")?;
        cfg.jobs = Some(jobs);
    }

    if let Some(policy) = args.on_failure {
        cfg.on_command_failure = policy;
    }

    if let Some(dir) = &args.dir {
        cfg.working_dir = Some(dir.clone());
    }

    Ok(cfg)
}

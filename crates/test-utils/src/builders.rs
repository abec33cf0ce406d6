#![allow(dead_code)]

use std::path::PathBuf;

use parbuild::config::{ConfigFile, ConfigSection, RawConfigFile};

/// Builder for `ConfigFile` to simplify test setup.
///
/// Starts from an empty command list, unlike `RawConfigFile::default()`.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                commands: Vec::new(),
            },
        }
    }

    pub fn with_command(mut self, cmd: &str) -> Self {
        self.config.commands.push(cmd.to_string());
        self
    }

    pub fn with_policy(mut self, policy: &str) -> Self {
        self.config.config.on_command_failure = policy.to_string();
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.config.config.jobs = Some(jobs);
        self
    }

    pub fn with_diagnostic(mut self, cmd: &str) -> Self {
        self.config.config.diagnostic_cmd = Some(cmd.to_string());
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.config.working_dir = Some(dir.into());
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

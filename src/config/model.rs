use std::path::PathBuf;

use serde::Deserialize;

use crate::types::FailurePolicy;

/// The commands run when no config file is given.
///
/// The second entry contains a dangling `&&` before `popd`. It is kept
/// verbatim; [`crate::config::lint`] reports it at startup.
pub const DEFAULT_COMMANDS: [&str; 2] = [
    "cp -R dist ../electron_app/dist/renderer",
    "pushd ../web_app && npm run build &&  && popd",
];

/// Printed-working-directory command run before every job.
pub const DEFAULT_DIAGNOSTIC_CMD: &str = "pwd";

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// commands = [
///   "cp -R dist ../electron_app/dist/renderer",
///   "pushd ../web_app && npm run build && popd",
/// ]
///
/// [config]
/// on_command_failure = "log"
/// jobs = 3
/// diagnostic_cmd = "pwd"
/// working_dir = "packages/electron_app"
/// ```
///
/// `commands` is a top-level key, so it must come before any table header.
/// All sections are optional; missing ones fall back to the built-in
/// defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    /// Global behaviour config from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// Shell command lines to run, in dispatch order.
    #[serde(default = "default_commands")]
    pub commands: Vec<String>,
}

impl Default for RawConfigFile {
    fn default() -> Self {
        Self {
            config: ConfigSection::default(),
            commands: default_commands(),
        }
    }
}

fn default_commands() -> Vec<String> {
    DEFAULT_COMMANDS.iter().map(|s| s.to_string()).collect()
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigSection {
    /// `"ignore"`, `"log"` or `"abort"`. Parsed during validation.
    #[serde(default = "default_on_command_failure")]
    pub on_command_failure: String,

    /// Worker count; `None` means "available parallelism minus one".
    #[serde(default)]
    pub jobs: Option<usize>,

    /// Diagnostic command; an empty string disables the step.
    #[serde(default)]
    pub diagnostic_cmd: Option<String>,

    /// Directory the commands run in.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

fn default_on_command_failure() -> String {
    FailurePolicy::default().to_string()
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            on_command_failure: default_on_command_failure(),
            jobs: None,
            diagnostic_cmd: None,
            working_dir: None,
        }
    }
}

/// Validated configuration used by the rest of the crate.
///
/// Build one from a [`RawConfigFile`] with `ConfigFile::try_from`, or use
/// [`ConfigFile::builtin`] for the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub on_command_failure: FailurePolicy,
    pub jobs: Option<usize>,
    pub diagnostic_cmd: Option<String>,
    pub working_dir: Option<PathBuf>,
    pub commands: Vec<String>,
}

impl ConfigFile {
    /// The configuration used when no file and no flags are given.
    pub fn builtin() -> Self {
        Self {
            on_command_failure: FailurePolicy::default(),
            jobs: None,
            diagnostic_cmd: Some(DEFAULT_DIAGNOSTIC_CMD.to_string()),
            working_dir: None,
            commands: default_commands(),
        }
    }
}

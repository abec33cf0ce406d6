// src/config/mod.rs

//! Configuration loading and validation for parbuild.
//!
//! Responsibilities:
//! - Define the TOML-backed data model and the built-in defaults (`model.rs`).
//! - Load a config file from disk and apply CLI overrides (`loader.rs`).
//! - Validate the raw model into a `ConfigFile` (`validate.rs`).
//! - Flag suspicious shell operator sequences in commands (`lint.rs`).

pub mod lint;
pub mod loader;
pub mod model;
pub mod validate;

pub use lint::{lint_command, lint_commands, LintWarning};
pub use loader::{load_and_validate, load_from_path, resolve_config};
pub use model::{
    ConfigFile, ConfigSection, RawConfigFile, DEFAULT_COMMANDS, DEFAULT_DIAGNOSTIC_CMD,
};
pub use validate::validate_config;

// tests/config_loading.rs

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tempfile::NamedTempFile;

use parbuild::cli::CliArgs;
use parbuild::config::{
    load_and_validate, resolve_config, ConfigFile, RawConfigFile, DEFAULT_COMMANDS,
    DEFAULT_DIAGNOSTIC_CMD,
};
use parbuild::engine::{detect_parallelism, pool_size, RunnerOptions};
use parbuild::errors::ParbuildError;
use parbuild::types::FailurePolicy;
use parbuild_test_utils::builders::ConfigFileBuilder;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn builtin_config_reproduces_hardcoded_commands() {
    let cfg = ConfigFile::builtin();

    assert_eq!(cfg.commands, DEFAULT_COMMANDS.to_vec());
    assert_eq!(cfg.on_command_failure, FailurePolicy::Log);
    assert_eq!(cfg.diagnostic_cmd.as_deref(), Some(DEFAULT_DIAGNOSTIC_CMD));
    assert_eq!(cfg.jobs, None);
    assert_eq!(cfg.working_dir, None);
}

#[test]
fn raw_default_validates_to_builtin() {
    let cfg = ConfigFile::try_from(RawConfigFile::default()).unwrap();
    assert_eq!(cfg, ConfigFile::builtin());
}

#[test]
fn no_arguments_resolves_to_builtin() {
    let args = CliArgs::try_parse_from(["parbuild"]).unwrap();
    let cfg = resolve_config(&args).unwrap();

    assert_eq!(cfg, ConfigFile::builtin());

    let options = RunnerOptions::from_config(&cfg);
    assert_eq!(options.workers, pool_size(detect_parallelism()));
}

#[test]
fn full_file_is_parsed() {
    let file = config_file(
        r#"
commands = ["cp -R dist out", "npm run build"]

[config]
on_command_failure = "abort"
jobs = 3
diagnostic_cmd = "ls"
working_dir = "packages/electron_app"
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.commands, vec!["cp -R dist out", "npm run build"]);
    assert_eq!(cfg.on_command_failure, FailurePolicy::Abort);
    assert_eq!(cfg.jobs, Some(3));
    assert_eq!(cfg.diagnostic_cmd.as_deref(), Some("ls"));
    assert_eq!(cfg.working_dir, Some(PathBuf::from("packages/electron_app")));
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let file = config_file(
        r#"
[config]
on_command_failure = "ignore"
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.commands, DEFAULT_COMMANDS.to_vec());
    assert_eq!(cfg.on_command_failure, FailurePolicy::Ignore);
}

#[test]
fn empty_diagnostic_disables_it() {
    let cfg = ConfigFileBuilder::new()
        .with_command("true")
        .with_diagnostic("")
        .build();

    assert_eq!(cfg.diagnostic_cmd, None);
}

#[test]
fn empty_command_list_is_rejected() {
    let file = config_file("commands = []\n");

    match load_and_validate(file.path()) {
        Err(ParbuildError::ConfigError(msg)) => assert!(msg.contains("at least one")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn blank_command_is_rejected() {
    let raw = ConfigFileBuilder::new()
        .with_command("true")
        .with_command("   ")
        .raw();

    match ConfigFile::try_from(raw) {
        Err(ParbuildError::ConfigError(msg)) => assert!(msg.contains("#1")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn unknown_policy_is_rejected() {
    let raw = ConfigFileBuilder::new()
        .with_command("true")
        .with_policy("explode")
        .raw();

    match ConfigFile::try_from(raw) {
        Err(ParbuildError::ConfigError(msg)) => {
            assert!(msg.contains("on_command_failure"));
            assert!(msg.contains("explode"));
        }
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn zero_jobs_is_rejected() {
    let raw = ConfigFileBuilder::new().with_command("true").with_jobs(0).raw();

    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(ParbuildError::ConfigError(_))
    ));
}

#[test]
fn invalid_toml_is_a_toml_error() {
    let file = config_file("commands = [\"unterminated\n");

    assert!(matches!(
        load_and_validate(file.path()),
        Err(ParbuildError::TomlError(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    assert!(matches!(
        load_and_validate("/definitely/not/here/parbuild.toml"),
        Err(ParbuildError::IoError(_))
    ));
}

#[test]
fn cli_flags_override_file() {
    let file = config_file(
        r#"
commands = ["true"]

[config]
on_command_failure = "ignore"
jobs = 8
"#,
    );
    let path = file.path().to_string_lossy().into_owned();

    let args = CliArgs::try_parse_from([
        "parbuild",
        "--config",
        path.as_str(),
        "--jobs",
        "2",
        "--on-failure",
        "abort",
        "--dir",
        "/tmp",
    ])
    .unwrap();

    let cfg = resolve_config(&args).unwrap();

    assert_eq!(cfg.jobs, Some(2));
    assert_eq!(cfg.on_command_failure, FailurePolicy::Abort);
    assert_eq!(cfg.working_dir, Some(PathBuf::from("/tmp")));
    assert_eq!(cfg.commands, vec!["true"]);
}

#[test]
fn zero_jobs_flag_is_rejected() {
    let args = CliArgs::try_parse_from(["parbuild", "--jobs", "0"]).unwrap();

    match resolve_config(&args) {
        Err(ParbuildError::ConfigError(msg)) => assert!(msg.contains("--jobs")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn commands_under_config_table_are_rejected() {
    // `commands` after the `[config]` header parses as `config.commands`.
    let file = config_file(
        r#"
[config]
on_command_failure = "log"
jobs = 3

commands = [
  "cp -R dist ../electron_app/dist/renderer",
  "pushd ../web_app && npm run build && popd",
]
"#,
    );

    match load_and_validate(file.path()) {
        Err(ParbuildError::TomlError(err)) => assert!(err.to_string().contains("commands")),
        other => panic!("expected TomlError, got {other:?}"),
    }
}

#[test]
fn unknown_top_level_key_is_rejected() {
    let file = config_file("comands = [\"true\"]\n");

    assert!(matches!(
        load_and_validate(file.path()),
        Err(ParbuildError::TomlError(_))
    ));
}

#[test]
fn unknown_config_key_is_rejected() {
    let file = config_file(
        r#"
commands = ["true"]

[config]
on_failure = "abort"
"#,
    );

    assert!(matches!(
        load_and_validate(file.path()),
        Err(ParbuildError::TomlError(_))
    ));
}

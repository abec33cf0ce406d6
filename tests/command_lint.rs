// tests/command_lint.rs

use parbuild::config::lint::LintKind;
use parbuild::config::{lint_command, lint_commands, DEFAULT_COMMANDS};

#[test]
fn flags_dangling_operator_in_builtin_build_command() {
    let commands: Vec<String> = DEFAULT_COMMANDS.iter().map(|s| s.to_string()).collect();

    let warnings = lint_commands(&commands).unwrap();

    assert_eq!(warnings.len(), 1);
    let w = &warnings[0];
    assert_eq!(w.command, 1);
    assert_eq!(w.kind, LintKind::DoubledOperator);
    assert_eq!(w.operator, "&&");
    assert_eq!(&commands[1][w.offset..w.offset + 2], "&&");
    assert!(commands[1][w.offset + 2..].trim_start().starts_with("&&"));
}

#[test]
fn well_formed_commands_are_clean() {
    for cmd in [
        "cp -R dist ../electron_app/dist/renderer",
        "pushd ../web_app && npm run build && popd",
        "make || echo failed",
        "ls | wc -l",
        "cd build; make;",
    ] {
        assert!(lint_command(cmd).unwrap().is_empty(), "flagged {cmd:?}");
    }
}

#[test]
fn operators_inside_quotes_are_ignored() {
    assert!(lint_command(r#"echo "a && && b""#).unwrap().is_empty());
    assert!(lint_command("echo 'x || | y'").unwrap().is_empty());
}

#[test]
fn trailing_operator_is_flagged() {
    let warnings = lint_command("npm run build &&").unwrap();

    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind, LintKind::TrailingOperator);
    assert_eq!(warnings[0].offset, 14);
}

#[test]
fn leading_operator_is_flagged() {
    let warnings = lint_command("  || make").unwrap();

    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind, LintKind::LeadingOperator);
    assert_eq!(warnings[0].operator, "||");
}

#[test]
fn doubled_pair_at_end_is_reported_once() {
    let warnings = lint_command("make && &&").unwrap();

    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind, LintKind::DoubledOperator);
}

#[test]
fn warning_message_names_command_and_operator() {
    let warnings = lint_commands(&["true".to_string(), "a ; ; b".to_string()]).unwrap();

    assert_eq!(warnings.len(), 1);
    let msg = warnings[0].to_string();
    assert!(msg.contains("command #1"));
    assert!(msg.contains("`;`"));
}

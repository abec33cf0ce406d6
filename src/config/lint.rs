// src/config/lint.rs

//! Lightweight checks for shell command strings.
//!
//! Commands are handed to the shell untouched. This module only looks for
//! chain operators (`&&`, `||`, `;`, `|`) that have no command on one side,
//! e.g. `npm run build &&  && popd`. Findings are reported as warnings at
//! startup; the command is never rewritten.
//!
//! Quoted segments are blanked before matching so `echo "a && && b"` is not
//! flagged. Anything fancier (heredocs, `case` arms, subshells) is out of
//! reach of a regex and may produce false positives.

use std::fmt;

use anyhow::Context;
use regex::{Captures, Match, Regex};

use crate::errors::Result;

const OPERATOR: &str = r"&&|\|\||;|\|";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintKind {
    /// An operator immediately followed by another operator.
    DoubledOperator,
    /// An operator at the very start of the command.
    LeadingOperator,
    /// A `&&`, `||` or `|` at the end of the command.
    TrailingOperator,
}

/// A single finding for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintWarning {
    /// Index of the command in the input list.
    pub command: usize,
    /// Byte offset of the offending operator.
    pub offset: usize,
    pub operator: String,
    pub kind: LintKind,
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LintKind::DoubledOperator => write!(
                f,
                "command #{}: `{}` at byte {} has no command before the next operator",
                self.command, self.operator, self.offset
            ),
            LintKind::LeadingOperator => write!(
                f,
                "command #{}: starts with `{}`",
                self.command, self.operator
            ),
            LintKind::TrailingOperator => write!(
                f,
                "command #{}: ends with a dangling `{}` at byte {}",
                self.command, self.operator, self.offset
            ),
        }
    }
}

/// Compiled patterns, built once per lint pass.
#[derive(Debug)]
pub struct CommandLinter {
    quoted: Regex,
    operator: Regex,
}

impl CommandLinter {
    pub fn new() -> Result<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern).with_context(|| format!("compiling lint pattern {pattern:?}"))
        };

        Ok(Self {
            quoted: compile(r#"'[^']*'|"(?:[^"\\]|\\.)*""#)?,
            operator: compile(OPERATOR)?,
        })
    }

    /// Lint one command; `index` is only used to label the findings.
    pub fn lint(&self, index: usize, cmd: &str) -> Vec<LintWarning> {
        // Same-length placeholder keeps byte offsets valid for the original.
        let blanked = self
            .quoted
            .replace_all(cmd, |caps: &Captures| "_".repeat(caps[0].len()));

        // Leftmost-first alternation tokenizes `||` as one operator.
        let ops: Vec<Match<'_>> = self.operator.find_iter(&blanked).collect();
        let gap_is_empty = |from: usize, to: usize| blanked[from..to].trim().is_empty();
        let warning = |op: &Match<'_>, kind: LintKind| LintWarning {
            command: index,
            offset: op.start(),
            operator: op.as_str().to_string(),
            kind,
        };

        let mut warnings = Vec::new();

        if let Some(first) = ops.first() {
            if gap_is_empty(0, first.start()) {
                warnings.push(warning(first, LintKind::LeadingOperator));
            }
        }

        for pair in ops.windows(2) {
            if gap_is_empty(pair[0].end(), pair[1].start()) {
                warnings.push(warning(&pair[0], LintKind::DoubledOperator));
            }
        }

        if let Some(last) = ops.last() {
            // A trailing `;` is valid shell.
            let dangling = last.as_str() != ";" && gap_is_empty(last.end(), blanked.len());
            // Already reported as the second half of a doubled pair.
            let covered = ops.len() > 1 && {
                let prev = &ops[ops.len() - 2];
                gap_is_empty(prev.end(), last.start())
            };
            if dangling && !covered {
                warnings.push(warning(last, LintKind::TrailingOperator));
            }
        }

        warnings
    }
}

/// Lint a single command string.
pub fn lint_command(cmd: &str) -> Result<Vec<LintWarning>> {
    Ok(CommandLinter::new()?.lint(0, cmd))
}

/// Lint every command, labelling findings with the command's index.
pub fn lint_commands(commands: &[String]) -> Result<Vec<LintWarning>> {
    let linter = CommandLinter::new()?;
    Ok(commands
        .iter()
        .enumerate()
        .flat_map(|(idx, cmd)| linter.lint(idx, cmd))
        .collect())
}

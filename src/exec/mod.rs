// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the command lines, using
//! `tokio::process::Command`.
//!
//! - [`backend`] provides the `CommandBackend` trait and the concrete
//!   `ShellBackend` used in production, which tests can replace with a fake
//!   implementation.
//! - [`task_runner`] runs one build job: start notice, diagnostic command,
//!   then the command itself.

pub mod backend;
pub mod task_runner;

pub use backend::{shell_command, CommandBackend, ExecContext, ShellBackend};
pub use task_runner::{run_build_process, BuildJob, JobSettings};

// src/engine/mod.rs

//! Orchestration engine for parbuild.
//!
//! - [`pool`] sizes the worker pool and provides the scoped pool that
//!   dispatches jobs and joins them.
//! - [`runner`] drives a run: one build job per command, failure policy
//!   applied as jobs finish and once more after the join.
//! - [`summary`] holds the per-job results of a run.

pub mod pool;
pub mod runner;
pub mod summary;

pub use pool::{detect_parallelism, pool_size, StopSignal, WorkerPool};
pub use runner::{Runner, RunnerOptions};
pub use summary::{JobReport, JobStatus, RunSummary};

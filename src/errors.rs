// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParbuildError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Command failed with exit code {code}: {cmd}")]
    CommandFailed { cmd: String, code: i32 },

    #[error("Worker pool failure: {0}")]
    Join(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<tokio::task::JoinError> for ParbuildError {
    fn from(err: tokio::task::JoinError) -> Self {
        ParbuildError::Join(err.to_string())
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ParbuildError>;

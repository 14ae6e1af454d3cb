//! Error types shared across commit-reel crates.

use std::path::PathBuf;

/// Top-level error type for commit-reel operations.
#[derive(Debug, thiserror::Error)]
pub enum ReelError {
    #[error("Unable to read git log: {message}")]
    CommitLog { message: String },

    #[error("Avatar error: {message}")]
    Avatar { message: String },

    #[error("Failed to run {program}: {message}")]
    Tool { program: String, message: String },

    #[error("{program} exited with {status}: {stderr}")]
    ToolFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Result type alias using ReelError.
pub type ReelResult<T> = Result<T, ReelError>;

impl ReelError {
    pub fn commit_log(msg: impl Into<String>) -> Self {
        Self::CommitLog {
            message: msg.into(),
        }
    }

    pub fn avatar(msg: impl Into<String>) -> Self {
        Self::Avatar {
            message: msg.into(),
        }
    }

    pub fn tool(program: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Tool {
            program: program.into(),
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}

//! CLI-level errors

use std::error::Error as StdError;

use thiserror::Error;

use crate::kube::KubeconfigError;

/// How the dispatcher treats an error when picking severity and exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A request against the API ended with a meaningful status.
    Request { status_code: i32 },
    /// Everything else.
    Plain,
}

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    /// Failure reported by an operation against the API, with its status.
    #[error("{source}")]
    Request {
        status_code: i32,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("could not read from stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("{0}")]
    Args(String),

    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("{0}")]
    Kubeconfig(#[from] KubeconfigError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("render output: {0}")]
    Render(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Wrap a failure with the status the request ended with.
    pub fn request(status_code: i32, source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::Request {
            status_code,
            source: source.into(),
        }
    }

    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Argument parsing failure, reduced to clap's one-line summary.
    pub fn from_clap(err: &clap::Error) -> Self {
        let rendered = err.to_string();
        let line = rendered
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or_default();
        Self::Args(line.strip_prefix("error: ").unwrap_or(line).to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CliError::Request { status_code, .. } => ErrorKind::Request {
                status_code: *status_code,
            },
            _ => ErrorKind::Plain,
        }
    }
}

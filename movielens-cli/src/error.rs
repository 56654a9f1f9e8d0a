use thiserror::Error;

use movielens_db::{PageError, QueryError, SchemaError};

/// Exit status for invalid arguments (`EX_USAGE` from sysexits.h).
pub(crate) const EX_USAGE: i32 = 64;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// A point lookup matched nothing
    #[error("{0}")]
    NotFound(String),

    /// Out-of-range or malformed input
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Dataset import failed
    #[error("Import error: {0}")]
    Import(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Output serialization failed
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    pub(crate) fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn import(msg: impl Into<String>) -> Self {
        Self::Import(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Process exit status for this error.
    pub(crate) fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound(_) => 2,
            Self::Validation(_) => EX_USAGE,
            _ => 1,
        }
    }
}

impl From<QueryError> for CliError {
    fn from(e: QueryError) -> Self {
        Self::database(e.to_string())
    }
}

impl From<SchemaError> for CliError {
    fn from(e: SchemaError) -> Self {
        Self::database(format!("Failed to open catalog database: {}", e))
    }
}

impl From<PageError> for CliError {
    fn from(e: PageError) -> Self {
        Self::validation(e.to_string())
    }
}

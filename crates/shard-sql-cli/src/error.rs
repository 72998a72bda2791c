//! Error types for the command-line tool.

/// Errors raised while reading, analyzing or rewriting a query.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The query could not be analyzed.
    #[error("Cannot analyze query: {0}")]
    Parse(#[from] shard_sql_core::ParseError),

    /// A `--table` argument is not `logical=physical`.
    #[error("Invalid table route '{0}': expected logical=physical")]
    InvalidTableRoute(String),

    /// No SQL was given on the command line or stdin.
    #[error("No SQL query given")]
    EmptyQuery,

    /// IO error while reading stdin.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for command-line operations.
pub type Result<T> = std::result::Result<T, CliError>;

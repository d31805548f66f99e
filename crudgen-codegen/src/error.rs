//! Error types for crudgen-codegen

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for crudgen-codegen operations
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during code generation
///
/// Unrecognized column types map to `String` and never fail generation.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// No column of the table is flagged as primary key
    #[error("Table `{table}` has no primary key column")]
    MissingPrimaryKey { table: String },

    /// The target package (or the project base it lives under) cannot be resolved
    #[error("Cannot resolve target package: {0}")]
    MissingHostRoot(String),

    /// Persisting a generated file failed
    #[error("Failed to write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load table metadata: {0}")]
    SchemaError(String),

    #[error("Invalid table name: {0:?}")]
    InvalidTableName(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Generation cancelled")]
    Cancelled,
}

impl CodegenError {
    pub(crate) fn write_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CodegenError::WriteFailure {
            path: path.into(),
            source,
        }
    }
}

impl From<config::ConfigError> for CodegenError {
    fn from(err: config::ConfigError) -> Self {
        CodegenError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for CodegenError {
    fn from(err: serde_json::Error) -> Self {
        CodegenError::SchemaError(err.to_string())
    }
}

impl From<toml::de::Error> for CodegenError {
    fn from(err: toml::de::Error) -> Self {
        CodegenError::SchemaError(err.to_string())
    }
}

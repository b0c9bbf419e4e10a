//! Common error types for chipcheck

use thiserror::Error;

/// Common result type for chipcheck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across chipcheck crates
#[derive(Error, Debug)]
pub enum Error {
    /// Sheet rejected at load time
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Sheet JSON could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML config could not be parsed
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Load-time schema failures
///
/// A sheet failing any of these checks is rejected whole; the active
/// dataset is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Required column not declared by the sheet
    #[error("required column '{0}' is missing")]
    MissingColumn(String),

    /// Required column declared but the row has no value
    #[error("row {row}: column '{column}' has no value")]
    MissingValue { row: usize, column: String },

    /// Chip code too short to split into LOT and position
    #[error("row {row}: chip code '{chip}' is shorter than 2 characters")]
    ChipTooShort { row: usize, chip: String },
}

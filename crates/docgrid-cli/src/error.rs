//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid column definition
    #[error("Invalid column definition: {0}")]
    InvalidColumns(String),

    /// Re-run selection did not match any loaded document
    #[error("Invalid selection: {0}")]
    Selection(String),

    /// Document conversion error
    #[error("Conversion error: {0}")]
    Conversion(#[from] docgrid_domain::ConversionFailure),

    /// Export rendering error
    #[error("Export error: {0}")]
    Export(#[from] docgrid_export::ExportError),

    /// The extraction run task was aborted
    #[error("Run task error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

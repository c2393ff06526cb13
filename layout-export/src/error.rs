//! Export error types.

use thiserror::Error;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The export configuration cannot produce a valid page.
    #[error("Invalid export configuration: {0}")]
    InvalidConfig(String),

    /// Writing the markup failed.
    #[error("Failed to format markup: {0}")]
    Format(#[from] std::fmt::Error),
}

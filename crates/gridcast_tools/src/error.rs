//! Error type for the tools crate.

use std::path::PathBuf;

use gridcast_core::error::GridcastError;
use thiserror::Error;

/// Result type alias using [`ToolError`].
pub type Result<T> = std::result::Result<T, ToolError>;

/// Errors raised by the developer tools.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A file or directory could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A level config failed to parse or validate.
    #[error("{}: {source}", path.display())]
    Config {
        /// Offending file.
        path: PathBuf,
        /// Core error.
        source: GridcastError,
    },

    /// Any other core error.
    #[error(transparent)]
    Core(#[from] GridcastError),

    /// Frame dimensions that cannot be drawn.
    #[error("Frame must be at least 1x1, got {columns}x{rows}")]
    EmptyFrame {
        /// Requested columns.
        columns: u16,
        /// Requested rows.
        rows: u16,
    },
}

//! Error types for the raycasting core.

use thiserror::Error;

/// Result type alias using [`GridcastError`].
pub type Result<T> = std::result::Result<T, GridcastError>;

/// Top-level error type for all core errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridcastError {
    /// A grid was requested with a zero dimension.
    #[error("Invalid grid dimensions {width}x{height}: both must be at least 1")]
    InvalidDimensions {
        /// Requested width in cells.
        width: u32,
        /// Requested height in cells.
        height: u32,
    },

    /// A grid dimension exceeds what the traversal can address.
    #[error("Grid dimension {requested} exceeds the maximum of {max} cells per axis")]
    DimensionTooLarge {
        /// The offending dimension.
        requested: u32,
        /// Largest accepted dimension.
        max: u32,
    },

    /// Fixed-point division by a zero-valued divisor.
    #[error("Fixed-point division by zero")]
    DivisionByZero,

    /// A palette wall material coincides with the transparent floor.
    #[error("Invalid palette: {0}")]
    InvalidPalette(String),

    /// Level configuration could not be parsed.
    #[error("Failed to parse level config: {0}")]
    ConfigParse(String),
}

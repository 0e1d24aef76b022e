//! Error types for dthresh-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// dthresh-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image extent (no dimensions, or pixel count overflows `usize`)
    #[error("invalid image extent: {0:?}")]
    InvalidDimension(Vec<usize>),

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Coordinates outside the image extent
    #[error("coordinates {coords:?} outside extent {sizes:?}")]
    CoordsOutOfBounds {
        coords: Vec<usize>,
        sizes: Vec<usize>,
    },

    /// Image extent mismatch
    #[error("dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Pixel buffer length does not match the extent
    #[error("pixel buffer length mismatch: expected {expected}, got {actual}")]
    DataLength { expected: usize, actual: usize },
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for the overlay pipeline.

use thiserror::Error;

/// Result type alias using OverlayError.
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Primary error type for overlay pipeline operations.
#[derive(Debug, Error)]
pub enum OverlayError {
    // === Extraction Errors ===
    #[error("No matching level/variable in source: {0}")]
    Selection(String),

    #[error("Failed to read source data: {0}")]
    DataRead(String),

    // === Derivation Errors ===
    #[error("Grid shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("No finite samples in grid: {0}")]
    DegenerateRange(String),

    // === Rendering Errors ===
    #[error("Rendering failed: {0}")]
    Render(String),

    // === Infrastructure Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

//! Geometry error types

use thiserror::Error;

/// Errors produced by the geometry layer.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// The view specification cannot describe a usable pinhole camera.
    #[error("invalid view spec: {reason}")]
    InvalidViewSpec { reason: String },

    /// A pixel produced a zero-length or non-finite direction vector.
    ///
    /// Recoverable: callers skip the offending corner or box instead of
    /// failing the whole request.
    #[error("degenerate direction vector at view pixel ({x}, {y})")]
    DegenerateDirection { x: f64, y: f64 },
}

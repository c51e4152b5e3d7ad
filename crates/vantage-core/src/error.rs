//! Error types for Vantage

use thiserror::Error;

/// Result type alias using Vantage's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the parameter-mutation boundary
///
/// The matrix derivation itself never fails; these errors exist so that
/// invalid edits are rejected before they can reach it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Non-positive dimensions, non-finite values, or `near >= far`
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Vertical field of view outside the open interval (0, 180) degrees
    #[error("Degenerate field of view: {0} degrees (expected 0 < fov < 180)")]
    DegenerateFieldOfView(f32),

    /// Unrecognised projection mode name
    #[error("Unknown projection mode '{0}'. Valid options: perspective, orthographic, isometric")]
    UnknownMode(String),

    /// Unrecognised parameter name
    #[error("Unknown parameter '{0}'. Valid options: fov, aspect, near, far, ortho_width, ortho_height")]
    UnknownParameter(String),
}

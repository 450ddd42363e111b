//! Error types for the diagram renderer.

use thiserror::Error;

/// Result type alias for renderer operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors from renderer setup and export.
///
/// Drawing itself never fails: degenerate drawing input degrades to a
/// logged no-op instead.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The registry has no surface under the requested id.
    #[error("surface '{id}' not found")]
    SurfaceNotFound { id: String },

    /// Rink dimensions were non-finite or not positive.
    #[error("invalid rink config: {message}")]
    InvalidConfig { message: String },

    /// PNG encoding failed in the pixmap backend.
    #[error("PNG encoding failed: {0}")]
    PngEncode(String),
}

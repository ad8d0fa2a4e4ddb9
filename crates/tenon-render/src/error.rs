//! Error types for the rendering pipeline.

use thiserror::Error;

/// The main error type for render operations.
///
/// Rendering is a pure computation over trusted in-process data, so every
/// variant here marks a caller contract violation rather than a recoverable
/// runtime condition. A failed render is abandoned; nothing is retried and
/// no partial write-back happens.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("shape constants not initialized; call ConstantProvider::init first")]
    ShapesNotInitialized,

    #[error("invalid theme: {0}")]
    Theme(String),

    #[error("value or statement input has no connection")]
    MissingConnection,

    #[error("statement row has no statement input to align")]
    MissingStatementInput,

    #[error("block must be measured before drawing")]
    NotMeasured,

    #[error("no type bits left to allocate for `{0}`")]
    TypeSpaceExhausted(String),
}

//! Error types for Horizon Select core.

use thiserror::Error;

/// Errors raised by the core building blocks.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// The connection ID is invalid or has already been disconnected.
    #[error("invalid or disconnected connection ID")]
    InvalidConnection,

    /// A rectangle was requested with a negative extent.
    #[error("invalid rectangle dimensions: {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },
}

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

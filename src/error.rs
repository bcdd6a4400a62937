//! Error types for the eye screening library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding or processing failed
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// JSON serialization or deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Frame source could not be opened or decoded
    #[error("Cannot open frame source: {0}")]
    SourceOpen(String),

    /// Input exists but contains no data
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Source opened but zero samples were accumulated
    #[error("No valid frames were processed")]
    NoValidFrames,

    /// Landmark provider could not be constructed
    #[error("Landmark provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;

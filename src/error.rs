use thiserror::Error;

/// Errors raised by the drawing core
#[derive(Debug, Error)]
pub enum InkError {
    /// A caller-supplied value is out of range or unrecognized
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The image source is not something we can turn into a raster
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// A snapshot or image blob could not be decoded
    #[error("Failed to decode: {0}")]
    DecodeFailure(String),

    /// A raster could not be encoded into a snapshot
    #[error("Failed to encode: {0}")]
    EncodeFailure(String),

    /// The session is not in a state that allows this operation
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The history store was cleared and can no longer record snapshots
    #[error("History has been cleared")]
    HistoryCleared,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for InkError {
    fn from(error: serde_json::Error) -> Self {
        InkError::Config(error.to_string())
    }
}

impl From<std::io::Error> for InkError {
    fn from(error: std::io::Error) -> Self {
        InkError::Config(error.to_string())
    }
}

/// Result type for drawing operations
pub type InkResult<T> = Result<T, InkError>;

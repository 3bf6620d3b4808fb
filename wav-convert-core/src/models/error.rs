use thiserror::Error;

/// Errors that can occur while assembling, encoding, or saving audio.
///
/// Empty input is never an error: zero chunks or a zero-length buffer
/// produce silence.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Impossible format parameters or a malformed sample buffer.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

//! Error types for body decoding

use thiserror::Error;

/// Errors raised by the strict decoding primitives.
///
/// The public extraction entry points never surface these: each caller picks
/// its own fallback (UTF-8, then the original text).
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The declared charset does not resolve to a known text decoder
    #[error("Unknown charset: {0}")]
    UnknownCharset(String),

    /// The bytes are not valid in the declared charset
    #[error("Bytes are not valid {charset}")]
    Malformed { charset: String },

    /// The base64 payload could not be decoded
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Result type for decoding operations
pub type Result<T> = std::result::Result<T, DecodeError>;

//! Codec error types

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Codec-level failures: a malformed request on encode, a corrupted or
/// foreign slot on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Input is smaller than the fixed record layout.
    #[error("buffer too short: {len} bytes, record layout needs {need}")]
    BufferTooShort { len: usize, need: usize },

    /// The type tag header does not identify an expense record.
    #[error("type tag mismatch: slot does not hold an expense record")]
    TypeMismatch,

    /// The merchant name exceeds the fixed layout bound.
    #[error("merchant name too long: {len} bytes, bound is {max}")]
    FieldTooLong { len: usize, max: usize },

    /// The stored merchant name bytes are not valid UTF-8.
    #[error("merchant name is not valid UTF-8")]
    InvalidUtf8,
}

//! Error types for encoded-word operations.

/// Result type alias for encoded-word operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Encoded-word error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Charset name not present in the encoding catalog.
    #[error("Unsupported charset: {0}")]
    UnsupportedCharset(String),

    /// Content encoding given to the encoder was not Q or Base64.
    #[error("Unknown content encoding: expected Q or B")]
    UnknownEncoding,

    /// Q encoding requested with a charset that is not single-byte.
    #[error("Charset {0} is not single-byte; Q encoding requires one byte per character")]
    MultiByteCharset(String),

    /// Base64 decode error.
    #[error("Base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),
}

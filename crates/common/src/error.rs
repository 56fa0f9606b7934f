//! Error kinds surfaced across the sealer API boundary.

use thiserror::Error;

/// Top-level error type returned by every encrypt, decrypt, sign and verify call.
///
/// The set is deliberately coarser than the internal failure reasons. In
/// particular [`SealError::Decryption`] and [`SealError::Signature`] carry no
/// detail at all: a caller cannot tell a malformed envelope from a wrong key or
/// a tampered tag.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SealError {
    /// Key material rejected at construction: empty ring or a key that is not
    /// exactly 32 bytes.
    #[error("invalid key configuration: {0}")]
    Configuration(String),

    /// Call-level options were rejected before any cryptographic work.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// The value could not be serialised, compressed or sealed.
    #[error("could not encode the value: {0}")]
    Encoding(String),

    /// The payload is malformed or failed authentication under every key.
    #[error("the payload is invalid")]
    Decryption,

    /// The payload carried an expiry timestamp that has passed.
    #[error("the payload has expired")]
    Expired,

    /// The payload was bound to a context but none was supplied.
    #[error("a context is required to decrypt this payload")]
    ContextRequired,

    /// The signed payload is malformed or no key produced a matching digest.
    #[error("the signature is invalid")]
    Signature,
}

impl SealError {
    /// Short machine-readable error code, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            SealError::Configuration(_) => "configuration_error",
            SealError::InvalidOptions(_) => "invalid_options",
            SealError::Encoding(_) => "encoding_error",
            SealError::Decryption => "decryption_error",
            SealError::Expired => "expired_payload",
            SealError::ContextRequired => "context_required",
            SealError::Signature => "signature_error",
        }
    }

    /// Returns `true` for the opaque integrity failures.
    pub fn is_integrity_failure(&self) -> bool {
        matches!(self, SealError::Decryption | SealError::Signature)
    }
}

//! Envelope records exchanged through untrusted storage and transport.
//!
//! Both records are serialised as compact JSON and then transport-encoded as a
//! single printable string by the codec in the `sealer` crate. Binary fields
//! are carried as standard base64 inside the JSON.
//!
//! Readers ignore fields they do not recognise, so later format versions can
//! add fields without breaking older deployments.

use serde::{Deserialize, Serialize};

/// Envelope format version written by this release.
pub const ENVELOPE_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Encryption envelope
// ---------------------------------------------------------------------------

/// Self-describing record produced by every encrypt call.
///
/// `iv`, `ciphertext` and `authTag` are required; a record missing any of them
/// fails to deserialise and is treated as malformed. The context string bound
/// as associated data is never stored here, only the `aadRequired` marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionEnvelope {
    /// Base64 nonce, fresh for every call.
    pub iv: String,
    /// Base64 ciphertext without the tag.
    pub ciphertext: String,
    /// Base64 authentication tag produced by the AEAD.
    pub auth_tag: String,
    /// Format evolution marker.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Set when the plaintext was compressed before encryption.
    #[serde(default, skip_serializing_if = "is_false")]
    pub compressed: bool,
    /// Absolute expiry as Unix epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    /// Set when a context string must be supplied to decrypt.
    #[serde(default, skip_serializing_if = "is_false")]
    pub aad_required: bool,
}

// ---------------------------------------------------------------------------
// Signing envelope
// ---------------------------------------------------------------------------

/// Record produced by sign: the canonical value in cleartext plus its digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningEnvelope {
    /// Canonical JSON text of the signed value.
    pub value: String,
    /// Hex-encoded keyed-hash digest over `value`.
    pub signature: String,
}

fn default_version() -> u32 {
    ENVELOPE_VERSION
}

fn is_false(b: &bool) -> bool {
    !*b
}

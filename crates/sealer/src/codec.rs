//! Envelope codec: records to and from a single printable transport string.
//!
//! # Format
//!
//! ```text
//! base64url-no-pad( compact JSON record )
//! ```
//!
//! Decoding runs three stages (transport decoding, JSON parsing, field
//! validation). Each stage has its own [`CodecError`] variant for the
//! diagnostics log, but callers of the engines only ever see one opaque error.

use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine as _,
};
use common::{EncryptionEnvelope, SigningEnvelope};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::crypto::{Sealed, NONCE_LEN, TAG_LEN};

/// Errors produced by the envelope codec.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The payload is not valid transport base64.
    #[error("transport decoding failed")]
    Transport,

    /// The decoded payload is not a JSON object.
    #[error("envelope is not structured JSON")]
    Structure,

    /// A required field is missing or has the wrong type.
    #[error("envelope is missing required fields")]
    MissingFields,

    /// A present field has an invalid value.
    #[error("envelope field `{0}` is invalid")]
    InvalidField(&'static str),

    /// The record could not be serialised.
    #[error("envelope serialisation failed: {0}")]
    Serialise(String),
}

/// Envelope metadata that travels in cleartext next to the ciphertext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Format version.
    pub version: u32,
    /// Plaintext was compressed before sealing.
    pub compressed: bool,
    /// Absolute expiry, Unix epoch milliseconds.
    pub expires_at: Option<i64>,
    /// A context string must be supplied to decrypt.
    pub aad_required: bool,
}

/// Serialise `record` as compact JSON and transport-encode it.
pub fn encode<E: Serialize>(record: &E) -> Result<String, CodecError> {
    let json = serde_json::to_vec(record).map_err(|e| CodecError::Serialise(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Transport-decode `payload`, parse it, and check it has the shape of `E`.
pub fn decode<E: DeserializeOwned>(payload: &str) -> Result<E, CodecError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim())
        .map_err(|_| CodecError::Transport)?;
    let value: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|_| CodecError::Structure)?;
    if !value.is_object() {
        return Err(CodecError::Structure);
    }
    serde_json::from_value(value).map_err(|_| CodecError::MissingFields)
}

/// Build and encode an encryption envelope.
pub fn encode_encrypted(header: &Header, sealed: &Sealed) -> Result<String, CodecError> {
    encode(&EncryptionEnvelope {
        iv: STANDARD.encode(sealed.nonce),
        ciphertext: STANDARD.encode(&sealed.ciphertext),
        auth_tag: STANDARD.encode(sealed.tag),
        version: header.version,
        compressed: header.compressed,
        expires_at: header.expires_at,
        aad_required: header.aad_required,
    })
}

/// Decode an encryption envelope and its binary fields.
pub fn decode_encrypted(payload: &str) -> Result<(Header, Sealed), CodecError> {
    let env: EncryptionEnvelope = decode(payload)?;
    if env.version == 0 {
        return Err(CodecError::InvalidField("version"));
    }

    let nonce = decode_fixed::<NONCE_LEN>(&env.iv, "iv")?;
    let tag = decode_fixed::<TAG_LEN>(&env.auth_tag, "authTag")?;
    let ciphertext = STANDARD
        .decode(&env.ciphertext)
        .map_err(|_| CodecError::InvalidField("ciphertext"))?;

    let header = Header {
        version: env.version,
        compressed: env.compressed,
        expires_at: env.expires_at,
        aad_required: env.aad_required,
    };
    Ok((
        header,
        Sealed {
            nonce,
            ciphertext,
            tag,
        },
    ))
}

/// Build and encode a signing envelope.
pub fn encode_signed(value: String, signature: &[u8]) -> Result<String, CodecError> {
    encode(&SigningEnvelope {
        value,
        signature: hex::encode(signature),
    })
}

/// Decode a signing envelope into its cleartext value and raw digest bytes.
pub fn decode_signed(payload: &str) -> Result<(String, Vec<u8>), CodecError> {
    let env: SigningEnvelope = decode(payload)?;
    let signature =
        hex::decode(&env.signature).map_err(|_| CodecError::InvalidField("signature"))?;
    Ok((env.value, signature))
}

fn decode_fixed<const N: usize>(field: &str, name: &'static str) -> Result<[u8; N], CodecError> {
    let bytes = STANDARD
        .decode(field)
        .map_err(|_| CodecError::InvalidField(name))?;
    bytes.try_into().map_err(|_| CodecError::InvalidField(name))
}

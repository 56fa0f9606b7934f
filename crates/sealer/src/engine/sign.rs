//! Signing engine: keyed-hash integrity over a cleartext canonical value.

use common::SealError;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use super::Encrypter;
use crate::codec;
use crate::crypto::mac;
use crate::telemetry::DIAGNOSTICS;

impl Encrypter {
    /// Sign the canonical JSON form of `value` with the active key.
    ///
    /// The value is carried in cleartext; only its integrity is protected.
    ///
    /// # Errors
    ///
    /// Returns [`SealError::Encoding`] if `value` cannot be serialized.
    pub fn sign<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, SealError> {
        let canonical =
            serde_json::to_string(value).map_err(|e| SealError::Encoding(e.to_string()))?;
        let signature = mac::digest(self.keys.active(), canonical.as_bytes())
            .map_err(|e| SealError::Encoding(e.to_string()))?;
        codec::encode_signed(canonical, &signature).map_err(|e| SealError::Encoding(e.to_string()))
    }

    /// Verify a signed payload against every key in the ring and return its value.
    ///
    /// # Errors
    ///
    /// Returns [`SealError::Signature`] if the envelope is malformed, no key
    /// produces a matching digest, or the verified value does not deserialize
    /// as `T`.
    pub fn verify<T: DeserializeOwned>(&self, payload: &str) -> Result<T, SealError> {
        let (value, signature) = codec::decode_signed(payload).map_err(|e| {
            debug!(target: DIAGNOSTICS, error = %e, "signing envelope rejected");
            SealError::Signature
        })?;

        let matched = self
            .keys
            .candidates()
            .position(|key| mac::verify(key, value.as_bytes(), &signature));
        if matched.is_none() {
            debug!(
                target: DIAGNOSTICS,
                candidates = self.keys.len(),
                "no key produced a matching signature"
            );
            return Err(SealError::Signature);
        }

        serde_json::from_str(&value).map_err(|e| {
            debug!(target: DIAGNOSTICS, error = %e, "verified value failed to deserialize");
            SealError::Signature
        })
    }
}

//! Encryption engine: serialize → compress → seal, and the reverse.

use common::{SealError, ENVELOPE_VERSION};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use super::{policy, DecryptOptions, EncryptOptions, Encrypter};
use crate::codec::{self, Header};
use crate::compression;
use crate::crypto::cipher;
use crate::telemetry::DIAGNOSTICS;

impl Encrypter {
    /// Serialize `value` to JSON and encrypt it under the active key.
    ///
    /// # Errors
    ///
    /// Returns [`SealError::InvalidOptions`] for a zero or out-of-range ttl and
    /// [`SealError::Encoding`] if `value` cannot be serialized.
    pub fn encrypt<T: Serialize + ?Sized>(
        &self,
        value: &T,
        options: &EncryptOptions,
    ) -> Result<String, SealError> {
        options.validate()?;
        let bytes = serde_json::to_vec(value).map_err(|e| SealError::Encoding(e.to_string()))?;
        self.seal_bytes(&bytes, options)
    }

    /// Encrypt bytes the caller has already serialized.
    ///
    /// # Errors
    ///
    /// Returns [`SealError::InvalidOptions`] for a zero or out-of-range ttl.
    pub fn encrypt_raw(&self, bytes: &[u8], options: &EncryptOptions) -> Result<String, SealError> {
        options.validate()?;
        self.seal_bytes(bytes, options)
    }

    /// Encrypt a string as-is, without JSON serialization.
    ///
    /// # Errors
    ///
    /// See [`Encrypter::encrypt_raw`].
    pub fn encrypt_string(&self, value: &str, options: &EncryptOptions) -> Result<String, SealError> {
        self.encrypt_raw(value.as_bytes(), options)
    }

    /// Decrypt a payload and deserialize the JSON plaintext into `T`.
    ///
    /// # Errors
    ///
    /// - [`SealError::Expired`] if the payload's expiry has passed.
    /// - [`SealError::ContextRequired`] if the payload is context-bound and no
    ///   context was supplied.
    /// - [`SealError::Decryption`] for everything else, including a plaintext
    ///   that does not deserialize as `T`.
    pub fn decrypt<T: DeserializeOwned>(
        &self,
        payload: &str,
        options: &DecryptOptions,
    ) -> Result<T, SealError> {
        let bytes = self.decrypt_raw(payload, options)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            debug!(target: DIAGNOSTICS, error = %e, "decrypted plaintext failed to deserialize");
            SealError::Decryption
        })
    }

    /// Decrypt a payload to raw plaintext bytes, skipping deserialization.
    ///
    /// # Errors
    ///
    /// See [`Encrypter::decrypt`].
    pub fn decrypt_raw(&self, payload: &str, options: &DecryptOptions) -> Result<Vec<u8>, SealError> {
        let (header, sealed) = codec::decode_encrypted(payload).map_err(|e| {
            debug!(target: DIAGNOSTICS, error = %e, "encryption envelope rejected");
            SealError::Decryption
        })?;

        policy::check_expiry(&header, self.clock.now())?;
        let context = options.context.as_deref();
        policy::check_context(&header, context)?;

        let aad = policy::associated_data(&header, context);
        let plaintext = self
            .keys
            .candidates()
            .enumerate()
            .find_map(|(idx, key)| match cipher::open(key, &sealed, &aad) {
                Ok(plaintext) => Some(plaintext),
                Err(e) => {
                    debug!(target: DIAGNOSTICS, candidate = idx, error = %e, "candidate key rejected");
                    None
                }
            })
            .ok_or_else(|| {
                debug!(
                    target: DIAGNOSTICS,
                    candidates = self.keys.len(),
                    "no key authenticated the payload"
                );
                SealError::Decryption
            })?;

        if !header.compressed {
            return Ok(plaintext);
        }
        compression::decompress(&plaintext).map_err(|e| {
            debug!(target: DIAGNOSTICS, error = %e, "authenticated plaintext failed to inflate");
            SealError::Decryption
        })
    }

    /// Decrypt a payload produced by [`Encrypter::encrypt_string`].
    ///
    /// # Errors
    ///
    /// See [`Encrypter::decrypt`]; non-UTF-8 plaintext is a
    /// [`SealError::Decryption`].
    pub fn decrypt_string(&self, payload: &str, options: &DecryptOptions) -> Result<String, SealError> {
        let bytes = self.decrypt_raw(payload, options)?;
        String::from_utf8(bytes).map_err(|_| {
            debug!(target: DIAGNOSTICS, "decrypted plaintext is not UTF-8");
            SealError::Decryption
        })
    }

    fn seal_bytes(&self, bytes: &[u8], options: &EncryptOptions) -> Result<String, SealError> {
        let header = Header {
            version: ENVELOPE_VERSION,
            compressed: options.compress,
            expires_at: policy::expiry_for(self.clock.now(), options.ttl)?,
            aad_required: options.context.is_some(),
        };

        let packed;
        let input = if options.compress {
            packed = compression::compress(bytes).map_err(|e| SealError::Encoding(e.to_string()))?;
            packed.as_slice()
        } else {
            bytes
        };

        let aad = policy::associated_data(&header, options.context.as_deref());
        let sealed = cipher::seal(self.keys.active(), input, &aad)
            .map_err(|e| SealError::Encoding(e.to_string()))?;
        codec::encode_encrypted(&header, &sealed).map_err(|e| SealError::Encoding(e.to_string()))
    }
}

//! [`Key`]: a single 256-bit secret, parsed and validated eagerly.

use aes_gcm_siv::aead::{rand_core::RngCore, OsRng};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::SealError;
use zeroize::{Zeroize, Zeroizing};

/// Byte length of every key in a ring (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Label prefix for standard-base64 encoded key strings.
pub const BASE64_LABEL: &str = "base64:";

/// Label prefix for hex encoded key strings.
pub const HEX_LABEL: &str = "hex:";

/// Fixed-size key buffer that holds exactly [`KEY_LEN`] bytes.
///
/// The memory is overwritten with zeroes when the key is dropped.
#[derive(Clone)]
pub struct Key(Box<[u8; KEY_LEN]>);

impl Key {
    /// Build a key from raw secret bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SealError::Configuration`] if `bytes` is not [`KEY_LEN`] long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SealError> {
        if bytes.len() != KEY_LEN {
            return Err(SealError::Configuration(format!(
                "key must be {KEY_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        let mut buf = Box::new([0u8; KEY_LEN]);
        buf.copy_from_slice(bytes);
        Ok(Self(buf))
    }

    /// Parse a key specification string.
    ///
    /// Accepted forms:
    /// - `base64:<standard base64>`
    /// - `hex:<hex digits>`
    /// - anything else is taken verbatim as UTF-8 bytes
    ///
    /// # Errors
    ///
    /// Returns [`SealError::Configuration`] if a labeled value does not decode
    /// or the decoded key is not [`KEY_LEN`] bytes.
    pub fn parse(spec: &str) -> Result<Self, SealError> {
        let decoded = if let Some(encoded) = spec.strip_prefix(BASE64_LABEL) {
            Zeroizing::new(STANDARD.decode(encoded.trim()).map_err(|_| {
                SealError::Configuration("key labeled base64: is not valid base64".into())
            })?)
        } else if let Some(encoded) = spec.strip_prefix(HEX_LABEL) {
            Zeroizing::new(hex::decode(encoded.trim()).map_err(|_| {
                SealError::Configuration("key labeled hex: is not valid hex".into())
            })?)
        } else {
            Zeroizing::new(spec.as_bytes().to_vec())
        };
        Self::from_bytes(&decoded)
    }

    /// Generate a fresh random key from the OS CSPRNG.
    pub fn generate() -> Self {
        let mut buf = Box::new([0u8; KEY_LEN]);
        OsRng.fill_bytes(&mut buf[..]);
        Self(buf)
    }

    /// Render the key in its `base64:` labeled form, suitable for `APP_KEY`.
    pub fn to_labeled(&self) -> String {
        format!("{BASE64_LABEL}{}", STANDARD.encode(&self.0[..]))
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        let bytes: &mut [u8; KEY_LEN] = &mut self.0;
        bytes.zeroize();
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.write_str("Key([REDACTED])")
    }
}

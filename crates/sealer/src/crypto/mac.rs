//! HMAC-SHA-256 digests for signed envelopes.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::cipher::CipherError;
use crate::keyring::Key;

type HmacSha256 = Hmac<Sha256>;

/// Byte length of an HMAC-SHA-256 digest.
pub const DIGEST_LEN: usize = 32;

/// Compute the keyed digest of `data` under `key`.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if the MAC rejects the key
/// (unreachable for HMAC, which accepts any key length).
pub fn digest(key: &Key, data: &[u8]) -> Result<[u8; DIGEST_LEN], CipherError> {
    let mut mac = build_mac(key)?;
    mac.update(data);
    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

/// Check `expected` against the digest of `data` under `key`.
///
/// The comparison runs in constant time over the digest; only a length
/// mismatch is detected early.
pub fn verify(key: &Key, data: &[u8], expected: &[u8]) -> bool {
    match build_mac(key) {
        Ok(mut mac) => {
            mac.update(data);
            mac.verify_slice(expected).is_ok()
        }
        Err(_) => false,
    }
}

fn build_mac(key: &Key) -> Result<HmacSha256, CipherError> {
    HmacSha256::new_from_slice(&key.as_bytes()[..]).map_err(|_| CipherError::InvalidKeyLength)
}

//! AES-256-GCM-SIV sealing with a detached authentication tag.
//!
//! Every call to [`seal`] draws a fresh 96-bit nonce from the OS CSPRNG. The
//! associated data passed to [`seal`] must be reproduced byte-for-byte by the
//! caller of [`open`], otherwise authentication fails closed.

use aes_gcm_siv::{
    aead::{rand_core::RngCore, AeadInPlace, KeyInit, OsRng},
    Aes256GcmSiv, Nonce, Tag,
};
use thiserror::Error;

use crate::keyring::Key;

/// Byte length of an AES-GCM-SIV nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the authentication tag (16 bytes = 128 bits).
pub const TAG_LEN: usize = 16;

/// Output of one sealing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    /// Raw nonce bytes.
    pub nonce: [u8; NONCE_LEN],
    /// Raw ciphertext bytes, same length as the plaintext.
    pub ciphertext: Vec<u8>,
    /// Raw authentication tag bytes.
    pub tag: [u8; TAG_LEN],
}

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The key could not initialise the cipher.
    #[error("invalid key length")]
    InvalidKeyLength,

    /// AES-GCM-SIV encryption failed or the tag did not verify.
    #[error("aead operation failed")]
    AeadFailure,
}

/// Encrypt `plaintext` under `key`, binding `aad` into the tag.
///
/// # Errors
///
/// Returns [`CipherError::AeadFailure`] on an internal AEAD error (should be
/// unreachable with a valid key).
pub fn seal(key: &Key, plaintext: &[u8], aad: &[u8]) -> Result<Sealed, CipherError> {
    let cipher = build_cipher(key)?;

    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(&nonce), aad, &mut buffer)
        .map_err(|_| CipherError::AeadFailure)?;

    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(tag.as_slice());

    Ok(Sealed {
        nonce,
        ciphertext: buffer,
        tag: tag_bytes,
    })
}

/// Authenticate and decrypt `sealed` under `key` with the same `aad` used to seal.
///
/// # Errors
///
/// Returns [`CipherError::AeadFailure`] if authentication fails: wrong key,
/// tampered nonce, ciphertext or tag, or mismatched associated data.
pub fn open(key: &Key, sealed: &Sealed, aad: &[u8]) -> Result<Vec<u8>, CipherError> {
    let cipher = build_cipher(key)?;
    let mut buffer = sealed.ciphertext.clone();
    cipher
        .decrypt_in_place_detached(
            Nonce::from_slice(&sealed.nonce),
            aad,
            &mut buffer,
            Tag::from_slice(&sealed.tag),
        )
        .map_err(|_| CipherError::AeadFailure)?;
    Ok(buffer)
}

fn build_cipher(key: &Key) -> Result<Aes256GcmSiv, CipherError> {
    Aes256GcmSiv::new_from_slice(&key.as_bytes()[..]).map_err(|_| CipherError::InvalidKeyLength)
}

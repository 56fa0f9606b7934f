//! Adapters over the cryptographic primitives.
//!
//! This module never implements a primitive itself. It wraps AES-256-GCM-SIV
//! (detached tag, caller-supplied associated data) and HMAC-SHA-256 behind the
//! small surface the engines consume.

pub mod cipher;
pub mod mac;

pub use cipher::{CipherError, Sealed, NONCE_LEN, TAG_LEN};

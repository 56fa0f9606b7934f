//! [`Encrypter`]: the encryption and signing engines over one [`KeyRing`].
//!
//! # Key usage
//!
//! - New envelopes are always produced with [`KeyRing::active`].
//! - Decrypt and verify try [`KeyRing::candidates`] in ring order and stop at
//!   the first key that authenticates. Per-key failures are never surfaced;
//!   only exhaustion of the ring is.
//!
//! An `Encrypter` is immutable after construction and is `Send + Sync`, so one
//! instance can serve any number of threads without locking.

mod encrypt;
pub mod options;
mod policy;
mod sign;

pub use options::{DecryptOptions, EncryptOptions};

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::keyring::KeyRing;

/// Authenticated encryption and signing over an immutable [`KeyRing`].
#[derive(Clone)]
pub struct Encrypter {
    keys: KeyRing,
    clock: Arc<dyn Clock>,
}

impl Encrypter {
    /// Create an encrypter over `keys` using the system clock.
    pub fn new(keys: KeyRing) -> Self {
        Self::with_clock(keys, Arc::new(SystemClock))
    }

    /// Create an encrypter with an explicit time source.
    pub fn with_clock(keys: KeyRing, clock: Arc<dyn Clock>) -> Self {
        Self { keys, clock }
    }

    /// The key ring this encrypter was built with.
    pub fn keys(&self) -> &KeyRing {
        &self.keys
    }
}

impl std::fmt::Debug for Encrypter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encrypter")
            .field("keys", &self.keys.len())
            .finish_non_exhaustive()
    }
}

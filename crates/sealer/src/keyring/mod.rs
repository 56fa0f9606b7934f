//! [`KeyRing`]: ordered, immutable set of validated keys.
//!
//! # Rotation
//!
//! Index 0 is the *active* key: every new envelope is encrypted or signed with
//! it. The remaining keys are rotation fallbacks, tried in order only when
//! decrypting or verifying. Rotating means building a new ring with the new
//! key in front; an existing ring is never mutated.

pub mod key;

pub use key::{Key, KEY_LEN};

use common::SealError;

/// Non-empty ordered sequence of [`Key`]s.
#[derive(Clone, Debug)]
pub struct KeyRing {
    keys: Vec<Key>,
}

impl KeyRing {
    /// Build a ring from already-validated keys, active key first.
    ///
    /// # Errors
    ///
    /// Returns [`SealError::Configuration`] if `keys` is empty.
    pub fn new(keys: Vec<Key>) -> Result<Self, SealError> {
        if keys.is_empty() {
            return Err(SealError::Configuration(
                "key ring requires at least one key".into(),
            ));
        }
        Ok(Self { keys })
    }

    /// Build a ring with a single key.
    pub fn single(key: Key) -> Self {
        Self { keys: vec![key] }
    }

    /// Build a ring from raw secret byte slices, active key first.
    ///
    /// # Errors
    ///
    /// Returns [`SealError::Configuration`] if the list is empty or any entry
    /// is not [`KEY_LEN`] bytes.
    pub fn from_bytes<I, B>(keys: I) -> Result<Self, SealError>
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let keys = keys
            .into_iter()
            .map(|k| Key::from_bytes(k.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(keys)
    }

    /// Build a ring from key specification strings (see [`Key::parse`]).
    ///
    /// # Errors
    ///
    /// Returns [`SealError::Configuration`] if the list is empty or any entry
    /// fails to parse.
    pub fn parse<I, S>(specs: I) -> Result<Self, SealError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = specs
            .into_iter()
            .enumerate()
            .map(|(idx, spec)| {
                Key::parse(spec.as_ref()).map_err(|e| match e {
                    SealError::Configuration(msg) => {
                        SealError::Configuration(format!("key #{idx}: {msg}"))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(keys)
    }

    /// The key used for all new encryption and signing.
    pub fn active(&self) -> &Key {
        // Non-empty by construction.
        &self.keys[0]
    }

    /// Rotation fallbacks, most recent first.
    pub fn previous(&self) -> &[Key] {
        &self.keys[1..]
    }

    /// Every key in ring order. Each call starts a fresh pass.
    pub fn candidates(&self) -> std::slice::Iter<'_, Key> {
        self.keys.iter()
    }

    /// Number of keys in the ring (always at least one).
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always `false`; present for API symmetry with [`KeyRing::len`].
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

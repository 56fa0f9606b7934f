//! Lock-free handle to the current [`Encrypter`], swapped on key reload.
//!
//! Rotation never mutates an encrypter: a reload builds a new one from the new
//! [`KeyRing`](crate::KeyRing) and swaps it in atomically. Calls already in
//! flight finish against the instance they loaded.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::info;

use crate::engine::Encrypter;

/// Shared, cheaply cloneable holder of the current [`Encrypter`].
#[derive(Clone, Debug)]
pub struct SharedEncrypter {
    inner: Arc<ArcSwap<Encrypter>>,
}

impl SharedEncrypter {
    /// Wrap an initial encrypter.
    pub fn new(encrypter: Encrypter) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(encrypter)),
        }
    }

    /// Snapshot of the current encrypter. Lock-free.
    pub fn load(&self) -> Arc<Encrypter> {
        self.inner.load_full()
    }

    /// Swap in a freshly constructed encrypter.
    pub fn replace(&self, encrypter: Encrypter) {
        let keys = encrypter.keys().len();
        self.inner.store(Arc::new(encrypter));
        info!(keys, "encrypter replaced");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{DecryptOptions, EncryptOptions};
    use crate::keyring::{Key, KeyRing};

    #[test]
    fn replace_rotates_active_key_for_new_writes() {
        let old = Key::generate();
        let new = Key::generate();
        let shared = SharedEncrypter::new(Encrypter::new(KeyRing::single(old.clone())));

        let before = shared.load().encrypt("v1", &EncryptOptions::new()).unwrap();
        shared.replace(Encrypter::new(KeyRing::new(vec![new.clone(), old]).unwrap()));
        let after = shared.load().encrypt("v2", &EncryptOptions::new()).unwrap();

        let current = shared.load();
        assert_eq!(current.keys().len(), 2);
        let a: String = current.decrypt(&before, &DecryptOptions::new()).unwrap();
        let b: String = current.decrypt(&after, &DecryptOptions::new()).unwrap();
        assert_eq!((a.as_str(), b.as_str()), ("v1", "v2"));

        // New writes only open under the new key.
        let only_new = Encrypter::new(KeyRing::single(new));
        let res: Result<String, _> = only_new.decrypt(&after, &DecryptOptions::new());
        assert!(res.is_ok());
    }

    #[test]
    fn snapshot_survives_replace() {
        let shared = SharedEncrypter::new(Encrypter::new(KeyRing::single(Key::generate())));
        let snapshot = shared.load();
        shared.replace(Encrypter::new(KeyRing::single(Key::generate())));
        assert!(!Arc::ptr_eq(&snapshot, &shared.load()));
    }
}

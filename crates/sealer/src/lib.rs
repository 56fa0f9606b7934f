//! Authenticated encryption and signing envelopes with multi-key rotation.
//!
//! Values are serialized, optionally compressed, sealed with AES-256-GCM-SIV
//! under the active key of a [`KeyRing`], and emitted as a single printable
//! string. Decryption tries every key in ring order so that older payloads
//! stay readable after a rotation.
//!
//! ```no_run
//! use sealer::{DecryptOptions, EncryptOptions, Encrypter, KeyRing};
//!
//! # fn main() -> Result<(), common::SealError> {
//! let keys = KeyRing::parse(["base64:AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA="])?;
//! let enc = Encrypter::new(keys);
//! let payload = enc.encrypt("Hello World", &EncryptOptions::new().with_context("user:1"))?;
//! let value: String = enc.decrypt(&payload, &DecryptOptions::new().with_context("user:1"))?;
//! assert_eq!(value, "Hello World");
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod codec;
pub mod compression;
pub mod config;
pub mod crypto;
pub mod engine;
pub mod keyring;
pub mod shared;
pub mod telemetry;

pub use clock::{Clock, SystemClock};
pub use common::SealError;
pub use crate::config::Config;
pub use engine::{DecryptOptions, EncryptOptions, Encrypter};
pub use keyring::{Key, KeyRing, KEY_LEN};
pub use shared::SharedEncrypter;

//! Error kinds and envelope wire records shared across `sealer` crates.

pub mod error;
pub mod protocol;

pub use error::SealError;
pub use protocol::{EncryptionEnvelope, SigningEnvelope, ENVELOPE_VERSION};

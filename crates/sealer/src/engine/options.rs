//! Call-level options for encrypt and decrypt.

use std::time::Duration;

use common::SealError;

/// Options recognised by [`Encrypter::encrypt`](super::Encrypter::encrypt)
/// and its raw variants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncryptOptions {
    /// Compress the plaintext before sealing.
    pub compress: bool,
    /// Lifetime of the payload; `None` means it never expires.
    pub ttl: Option<Duration>,
    /// Context bound as associated data; `None` means no binding.
    pub context: Option<String>,
}

impl EncryptOptions {
    /// Default options: no compression, no expiry, no context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compress the plaintext before sealing.
    pub fn compressed(mut self) -> Self {
        self.compress = true;
        self
    }

    /// Expire the payload `ttl` after the encrypt call.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Bind `context` into the authentication tag.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<(), SealError> {
        match self.ttl {
            Some(ttl) if ttl.is_zero() => {
                Err(SealError::InvalidOptions("ttl must be greater than zero".into()))
            }
            _ => Ok(()),
        }
    }
}

/// Options recognised by [`Encrypter::decrypt`](super::Encrypter::decrypt)
/// and its raw variants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecryptOptions {
    /// Must equal the context supplied at encryption time.
    pub context: Option<String>,
}

impl DecryptOptions {
    /// Default options: no context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply the context the payload was bound to.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = EncryptOptions::new();
        assert!(!opts.compress);
        assert!(opts.ttl.is_none());
        assert!(opts.context.is_none());
        assert!(DecryptOptions::new().context.is_none());
    }

    #[test]
    fn builders_set_fields() {
        let opts = EncryptOptions::new()
            .compressed()
            .with_ttl(Duration::from_secs(60))
            .with_context("user:1");
        assert!(opts.compress);
        assert_eq!(opts.ttl, Some(Duration::from_secs(60)));
        assert_eq!(opts.context.as_deref(), Some("user:1"));
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn zero_ttl_rejected() {
        let opts = EncryptOptions::new().with_ttl(Duration::ZERO);
        assert!(matches!(opts.validate(), Err(SealError::InvalidOptions(_))));
    }
}

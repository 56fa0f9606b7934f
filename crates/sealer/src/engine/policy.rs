//! Expiry and context policy applied around the AEAD.
//!
//! Both checks on the decrypt path run before any cipher call. A context
//! *mismatch* is not checked here: it surfaces as an authentication failure
//! because the context is part of the associated data.

use std::time::Duration;

use chrono::{DateTime, Utc};
use common::SealError;

use crate::codec::Header;

/// Domain label at the start of every associated-data block.
const AAD_LABEL: &str = "sealer";

/// Absolute expiry (epoch milliseconds) for a payload sealed at `now`.
pub(crate) fn expiry_for(
    now: DateTime<Utc>,
    ttl: Option<Duration>,
) -> Result<Option<i64>, SealError> {
    let Some(ttl) = ttl else {
        return Ok(None);
    };
    let expires_at = chrono::Duration::from_std(ttl)
        .ok()
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| SealError::InvalidOptions("ttl is out of range".into()))?;
    Ok(Some(expires_at.timestamp_millis()))
}

/// Reject the payload once `now` is past its expiry.
pub(crate) fn check_expiry(header: &Header, now: DateTime<Utc>) -> Result<(), SealError> {
    match header.expires_at {
        Some(expires_at) if now.timestamp_millis() > expires_at => Err(SealError::Expired),
        _ => Ok(()),
    }
}

/// Reject a context-bound payload when the caller supplied no context.
pub(crate) fn check_context(header: &Header, context: Option<&str>) -> Result<(), SealError> {
    if header.aad_required && context.is_none() {
        return Err(SealError::ContextRequired);
    }
    Ok(())
}

/// Associated data for the AEAD: the cleartext header followed by the context.
///
/// Binding the header means a forged `expiresAt` or `compressed` flag fails
/// authentication like any other tampering.
pub(crate) fn associated_data(header: &Header, context: Option<&str>) -> Vec<u8> {
    let expires = header
        .expires_at
        .map_or_else(|| "-".to_owned(), |ms| ms.to_string());
    let mut aad = format!(
        "{AAD_LABEL};v={};c={};e={};a={}\n",
        header.version,
        u8::from(header.compressed),
        expires,
        u8::from(header.aad_required),
    )
    .into_bytes();
    if let Some(context) = context {
        aad.extend_from_slice(context.as_bytes());
    }
    aad
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn header(expires_at: Option<i64>, aad_required: bool) -> Header {
        Header {
            version: 1,
            compressed: false,
            expires_at,
            aad_required,
        }
    }

    fn at_millis(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn expiry_is_now_plus_ttl() {
        let now = at_millis(1_000_000);
        assert_eq!(expiry_for(now, None).unwrap(), None);
        assert_eq!(
            expiry_for(now, Some(Duration::from_millis(1_500))).unwrap(),
            Some(1_001_500)
        );
    }

    #[test]
    fn huge_ttl_is_invalid_option() {
        let res = expiry_for(at_millis(0), Some(Duration::from_secs(u64::MAX)));
        assert!(matches!(res, Err(SealError::InvalidOptions(_))));
    }

    #[test]
    fn expired_only_after_deadline() {
        let h = header(Some(5_000), false);
        assert!(check_expiry(&h, at_millis(4_999)).is_ok());
        assert!(check_expiry(&h, at_millis(5_000)).is_ok());
        assert_eq!(check_expiry(&h, at_millis(5_001)), Err(SealError::Expired));
        assert!(check_expiry(&header(None, false), at_millis(4_102_444_800_000)).is_ok());
    }

    #[test]
    fn context_required_only_when_flagged() {
        assert_eq!(
            check_context(&header(None, true), None),
            Err(SealError::ContextRequired)
        );
        assert!(check_context(&header(None, true), Some("a")).is_ok());
        assert!(check_context(&header(None, false), None).is_ok());
        assert!(check_context(&header(None, false), Some("a")).is_ok());
    }

    #[test]
    fn associated_data_binds_header_and_context() {
        let base = associated_data(&header(Some(10), true), Some("user:1"));
        assert_ne!(base, associated_data(&header(Some(11), true), Some("user:1")));
        assert_ne!(base, associated_data(&header(Some(10), true), Some("user:2")));
        assert_ne!(base, associated_data(&header(Some(10), false), Some("user:1")));
        assert_eq!(base, associated_data(&header(Some(10), true), Some("user:1")));
        assert!(base.ends_with(b"\nuser:1"));
    }
}

//! Tracing setup and the diagnostics channel.
//!
//! # Telemetry invariants
//!
//! - **No key material, plaintext, or context strings** in any log field.
//! - The specific reason a payload was rejected (decode stage, candidate
//!   index, inflate or deserialize failure) is logged at `debug` on the
//!   [`DIAGNOSTICS`] target only. It never reaches the caller.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Target for internal rejection diagnostics.
pub const DIAGNOSTICS: &str = "sealer::diagnostics";

/// Initialise a JSON tracing subscriber at `log_level`.
///
/// `RUST_LOG` takes precedence when set, so the diagnostics channel can be
/// enabled on its own with `RUST_LOG=sealer::diagnostics=debug`.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been set.
pub fn init(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise tracing subscriber: {e}"))
}

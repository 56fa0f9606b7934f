//! Key configuration loaded from the environment.
//!
//! | Variable            | Meaning                                           |
//! |---------------------|---------------------------------------------------|
//! | `APP_KEY`           | Active key (`base64:`, `hex:` or raw). Required.  |
//! | `APP_PREVIOUS_KEYS` | Comma-separated rotation fallbacks, newest first. |
//! | `LOG_LEVEL`         | Tracing level, default `info`.                    |

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::keyring::KeyRing;

/// Validated key configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Active key specification. **Required.**
    pub app_key: String,

    /// Comma-separated previous key specifications.
    #[serde(default)]
    pub app_previous_keys: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `APP_KEY` is absent or empty.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Previous key specifications in order, blanks skipped.
    pub fn previous_keys(&self) -> Vec<&str> {
        self.app_previous_keys
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .collect()
    }

    /// Build the key ring: `APP_KEY` first, then each previous key.
    ///
    /// # Errors
    ///
    /// Returns an error if any key fails to parse or is not 32 bytes.
    pub fn key_ring(&self) -> Result<KeyRing> {
        let specs = std::iter::once(self.app_key.trim()).chain(self.previous_keys());
        KeyRing::parse(specs).context("APP_KEY / APP_PREVIOUS_KEYS are invalid")
    }

    fn validate(&self) -> Result<()> {
        if self.app_key.trim().is_empty() {
            anyhow::bail!("APP_KEY is required and must not be empty");
        }
        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("app_key", &"[REDACTED]")
            .field("app_previous_keys", &self.previous_keys().len())
            .field("log_level", &self.log_level)
            .finish()
    }
}

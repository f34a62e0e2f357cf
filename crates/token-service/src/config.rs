//! Configuration loading and validation for the token service.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any required variable is missing or invalid.

use std::fmt;

use anyhow::{Context, Result};
use serde::Deserialize;
use token::TokenCipher;

/// Validated token service configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Standard-base64 pre-shared key, 16 or 32 bytes once decoded. **Required.**
    pub token_key: String,

    /// Port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Request header carrying the caller token on protected routes.
    #[serde(default = "default_token_header")]
    pub token_header_name: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_listen_port() -> u16 {
    8080
}
fn default_token_header() -> String {
    "X-Caller-Token".into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
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

    /// Build the token cipher from [`Config::token_key`].
    pub fn cipher(&self) -> Result<TokenCipher> {
        TokenCipher::from_base64(&self.token_key).context("TOKEN_KEY is not a usable key")
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.token_key.trim().is_empty() {
            anyhow::bail!("TOKEN_KEY is required and must not be empty");
        }
        self.cipher()?;
        if self.token_header_name.trim().is_empty() {
            anyhow::bail!("TOKEN_HEADER_NAME must not be empty");
        }
        axum::http::HeaderName::from_bytes(self.token_header_name.as_bytes())
            .context("TOKEN_HEADER_NAME is not a valid header name")?;
        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token_key", &"[REDACTED]")
            .field("listen_port", &self.listen_port)
            .field("token_header_name", &self.token_header_name)
            .field("log_level", &self.log_level)
            .finish()
    }
}

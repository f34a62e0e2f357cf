//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderName;
use token::TokenHelper;

/// Application state shared across all request handlers.
///
/// All fields are cheaply cloneable (`Arc`-wrapped or already `Arc`-backed) so
/// that Axum can clone the state for each request without copying expensive data.
#[derive(Clone)]
pub struct AppState {
    /// Token issuer and validator sharing one pre-shared-key cipher.
    pub helper: TokenHelper,
    /// Header carrying the caller token on protected routes.
    pub token_header: Arc<HeaderName>,
}

impl AppState {
    /// Create a new [`AppState`] from a helper and the token header name.
    ///
    /// # Errors
    ///
    /// Returns an error if `token_header` is not a valid HTTP header name.
    pub fn new(helper: TokenHelper, token_header: &str) -> Result<Self> {
        let token_header = HeaderName::from_bytes(token_header.as_bytes())
            .with_context(|| format!("invalid token header name: {token_header}"))?;
        Ok(Self {
            helper,
            token_header: Arc::new(token_header),
        })
    }
}

#[cfg(test)]
impl Default for AppState {
    /// Creates an [`AppState`] with a fixed test key and the default header.
    fn default() -> Self {
        let cipher = token::TokenCipher::new(&[0x42u8; 32]).expect("32-byte test key");
        Self {
            helper: TokenHelper::new(cipher),
            token_header: Arc::new(HeaderName::from_static("x-caller-token")),
        }
    }
}

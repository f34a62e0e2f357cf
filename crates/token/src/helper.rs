//! [`TokenHelper`]: issue and parse caller tokens.
//!
//! # Parse pipeline
//!
//! ```text
//! Start ─base64─▶ TextDecoded ─decrypt─▶ Decrypted ─decode─▶ Valid
//!   └──────────────────┴───────────────────┴──────────────▶ Invalid
//! ```
//!
//! Any stage failure ends in `Invalid`. The `parse_*` methods return `None`
//! and log the stage and error kind; `try_parse_*` return the typed error.
//! Token text, plaintext, and key material are never logged.

use std::sync::Arc;

use common::{CallerInfo, GenerateError, TokenError};
use tracing::{debug, warn};

use crate::codec;
use crate::crypto::{CipherError, TokenCipher};
use crate::transport;

/// Stage of the parse pipeline that rejected a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    TextDecode,
    Decrypt,
    StructDecode,
}

impl Stage {
    fn as_str(self) -> &'static str {
        match self {
            Stage::TextDecode => "text_decode",
            Stage::Decrypt => "decrypt",
            Stage::StructDecode => "struct_decode",
        }
    }
}

/// Issues and validates caller tokens under one pre-shared key.
///
/// Cloning is cheap: clones share the same [`TokenCipher`].
#[derive(Clone, Debug)]
pub struct TokenHelper {
    cipher: Arc<TokenCipher>,
}

impl TokenHelper {
    /// Wrap an already-built cipher.
    pub fn new(cipher: TokenCipher) -> Self {
        Self {
            cipher: Arc::new(cipher),
        }
    }

    /// Build the helper from a standard-base64 pre-shared key.
    ///
    /// # Errors
    ///
    /// Returns a [`CipherError`] if the key text is not base64 or has the wrong length.
    pub fn from_base64_key(key_b64: &str) -> Result<Self, CipherError> {
        TokenCipher::from_base64(key_b64).map(Self::new)
    }

    /// Encode and encrypt `caller`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::FieldTooLong`] for an oversized key or oauthid,
    /// or [`GenerateError::Encryption`] if sealing fails. No token is produced.
    pub fn generate_user_token(&self, caller: &CallerInfo) -> Result<Vec<u8>, GenerateError> {
        let plain = codec::encode(caller)?;
        let token = self.cipher.encrypt(&plain)?;
        debug!(appid = caller.appid, device_token = caller.is_device_token(), "caller token issued");
        Ok(token)
    }

    /// Issue a token for the device only: `uid` is written as 0.
    ///
    /// `caller` is not modified; a derived copy is encoded.
    pub fn generate_device_token(&self, caller: &CallerInfo) -> Result<Vec<u8>, GenerateError> {
        self.generate_user_token(&caller.as_device())
    }

    /// [`generate_user_token`](Self::generate_user_token), base64-encoded.
    pub fn generate_string_user_token(&self, caller: &CallerInfo) -> Result<String, GenerateError> {
        self.generate_user_token(caller)
            .map(|token| transport::encode(&token))
    }

    /// [`generate_device_token`](Self::generate_device_token), base64-encoded.
    pub fn generate_string_device_token(&self, caller: &CallerInfo) -> Result<String, GenerateError> {
        self.generate_device_token(caller)
            .map(|token| transport::encode(&token))
    }

    /// Parse a base64 token. Returns `None` for any invalid token.
    pub fn parse_token(&self, token: &str) -> Option<CallerInfo> {
        self.parse_text(token).map_err(log_rejection).ok()
    }

    /// Parse a binary token. Returns `None` for any invalid token.
    pub fn parse_token_bytes(&self, token: &[u8]) -> Option<CallerInfo> {
        self.parse_binary(token).map_err(log_rejection).ok()
    }

    /// Parse a base64 token, keeping the reason for rejection.
    pub fn try_parse_token(&self, token: &str) -> Result<CallerInfo, TokenError> {
        self.parse_text(token).map_err(|(_, e)| e)
    }

    /// Parse a binary token, keeping the reason for rejection.
    pub fn try_parse_token_bytes(&self, token: &[u8]) -> Result<CallerInfo, TokenError> {
        self.parse_binary(token).map_err(|(_, e)| e)
    }

    fn parse_text(&self, token: &str) -> Result<CallerInfo, (Stage, TokenError)> {
        let bytes = transport::decode(token).map_err(|e| (Stage::TextDecode, e))?;
        self.parse_binary(&bytes)
    }

    fn parse_binary(&self, token: &[u8]) -> Result<CallerInfo, (Stage, TokenError)> {
        let plain = self.cipher.decrypt(token).map_err(|e| (Stage::Decrypt, e))?;
        codec::decode(&plain).map_err(|e| (Stage::StructDecode, e))
    }
}

fn log_rejection((stage, err): (Stage, TokenError)) {
    warn!(stage = stage.as_str(), kind = err.kind(), "caller token rejected");
}

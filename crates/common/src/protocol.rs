//! Request and response types exchanged with the token service.
//!
//! These types are serialised as JSON over the HTTP API. Issue requests reuse
//! [`CallerInfo`] directly as the request body.

use serde::{Deserialize, Serialize};

use crate::CallerInfo;

// ---------------------------------------------------------------------------
// Issue / parse endpoints
// ---------------------------------------------------------------------------

/// Response body for `POST /tokens/user` and `POST /tokens/device`, and the
/// request body for `POST /tokens/parse`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenEnvelope {
    /// Standard-base64 encrypted token.
    pub token: String,
}

/// Response body for `GET /whoami`.
///
/// Mirrors [`CallerInfo`] without the key material.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoAmIResponse {
    pub expire: i64,
    pub security_level: i32,
    pub appid: i32,
    pub device_id: i64,
    pub uid: i64,
    /// Whether the token was issued without a bound user.
    pub device_token: bool,
    /// Whether the token carries per-caller key material.
    pub has_key: bool,
}

impl From<&CallerInfo> for WhoAmIResponse {
    fn from(caller: &CallerInfo) -> Self {
        Self {
            expire: caller.expire,
            security_level: caller.security_level,
            appid: caller.appid,
            device_id: caller.device_id,
            uid: caller.uid,
            device_token: caller.is_device_token(),
            has_key: caller.key.is_some(),
        }
    }
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"unauthenticated"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status: always `"ok"` once the cipher is built.
    pub status: String,
}

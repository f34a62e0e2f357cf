//! Common error types shared across crates.

use thiserror::Error;

/// Why a token could not be turned back into a [`CallerInfo`](crate::CallerInfo).
///
/// Callers of the token facade only ever see "valid" or "invalid"; the kind is
/// kept for diagnostics so operators can tell tampering from stale versions.
/// No variant carries token or key bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The leading version tag names no known layout.
    #[error("unsupported token version {found}")]
    VersionMismatch { found: u16 },

    /// The buffer ended before a field could be read.
    #[error("token truncated: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput { needed: usize, remaining: usize },

    /// Bytes were left over after the last field.
    #[error("{remaining} trailing bytes after token fields")]
    TrailingData { remaining: usize },

    /// Malformed UTF-8 in a string field or malformed base64 transport text.
    #[error("encoding error: {0}")]
    EncodingError(String),

    /// Authentication failed, the key was wrong, or the ciphertext was malformed.
    #[error("token decryption failed")]
    DecryptionFailure,
}

impl TokenError {
    /// Stable snake_case label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::VersionMismatch { .. } => "version_mismatch",
            TokenError::TruncatedInput { .. } => "truncated_input",
            TokenError::TrailingData { .. } => "trailing_data",
            TokenError::EncodingError(_) => "encoding_error",
            TokenError::DecryptionFailure => "decryption_failure",
        }
    }
}

/// Token generation failed; no token was produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// A length-prefixed field does not fit its 16-bit signed prefix.
    #[error("{field} is {len} bytes, exceeds the {} byte limit", crate::MAX_FIELD_LEN)]
    FieldTooLong { field: &'static str, len: usize },

    /// The cipher refused to encrypt the encoded record.
    #[error("token encryption failed")]
    Encryption,
}

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::Unauthenticated`] → 401
/// - [`ServiceError::Internal`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed or asked for a token that cannot be issued.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// No valid caller token accompanied the request.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::Unauthenticated(_) => 401,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Short machine-readable error code used in [`ErrorResponse`](crate::protocol::ErrorResponse).
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::Unauthenticated(_) => "unauthenticated",
            ServiceError::Internal(_) => "internal_error",
        }
    }
}

impl From<GenerateError> for ServiceError {
    fn from(e: GenerateError) -> Self {
        match e {
            GenerateError::FieldTooLong { .. } => ServiceError::BadRequest(e.to_string()),
            GenerateError::Encryption => ServiceError::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_codes() {
        assert_eq!(ServiceError::BadRequest("x".into()).http_status(), 400);
        assert_eq!(ServiceError::Unauthenticated("x".into()).http_status(), 401);
        assert_eq!(ServiceError::Internal("x".into()).http_status(), 500);
    }

    #[test]
    fn display_includes_message() {
        let e = ServiceError::BadRequest("missing token".into());
        assert!(e.to_string().contains("missing token"));
    }

    #[test]
    fn token_error_kinds_are_distinct() {
        let kinds = [
            TokenError::VersionMismatch { found: 9 }.kind(),
            TokenError::TruncatedInput { needed: 8, remaining: 2 }.kind(),
            TokenError::TrailingData { remaining: 1 }.kind(),
            TokenError::EncodingError("bad utf-8".into()).kind(),
            TokenError::DecryptionFailure.kind(),
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn field_too_long_maps_to_bad_request() {
        let e: ServiceError = GenerateError::FieldTooLong { field: "key", len: 40_000 }.into();
        assert_eq!(e.http_status(), 400);
        assert!(e.to_string().contains("32767"));
    }

    #[test]
    fn encryption_failure_maps_to_internal() {
        let e: ServiceError = GenerateError::Encryption.into();
        assert_eq!(e.http_status(), 500);
    }
}

//! Standard-alphabet base64 for carrying binary tokens in headers and URLs.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::TokenError;

/// Encode an opaque payload as padded standard base64.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode padded standard base64.
///
/// # Errors
///
/// Returns [`TokenError::EncodingError`] if `text` is not valid base64.
pub fn decode(text: &str) -> Result<Vec<u8>, TokenError> {
    STANDARD
        .decode(text)
        .map_err(|e| TokenError::EncodingError(format!("base64: {e}")))
}

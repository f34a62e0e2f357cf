//! Common types, wire types, and errors shared across `caller-token` crates.

pub mod caller;
pub mod error;
pub mod protocol;
mod serde_base64;

pub use caller::CallerInfo;
pub use error::{GenerateError, ServiceError, TokenError};

/// Largest `key` or `oauthid` byte length a token can carry (16-bit signed prefix).
pub const MAX_FIELD_LEN: usize = i16::MAX as usize;

//! Compact, encrypted caller tokens.
//!
//! A token is a [`CallerInfo`] written in a positional, versioned binary
//! layout ([`codec`]), sealed with a pre-shared-key cipher ([`crypto`]) and
//! optionally base64-encoded for header or URL transport ([`transport`]).
//! [`TokenHelper`] composes the three into the issue and parse operations
//! used by calling services.
//!
//! ```text
//! issue:  CallerInfo ─encode─▶ bytes ─encrypt─▶ token ─base64─▶ text
//! parse:  text ─base64─▶ token ─decrypt─▶ bytes ─decode─▶ CallerInfo | invalid
//! ```

pub mod codec;
pub mod crypto;
pub mod helper;
pub mod transport;

pub use common::{CallerInfo, GenerateError, TokenError};
pub use crypto::{CipherError, TokenCipher};
pub use helper::TokenHelper;

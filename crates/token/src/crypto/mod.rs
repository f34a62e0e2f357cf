//! Pre-shared-key AES-GCM-SIV sealing of encoded tokens.
//!
//! # Ciphertext format
//!
//! ```text
//! nonce (12 bytes) || ciphertext || tag (16 bytes)
//! ```
//!
//! The cipher is authenticated, so a flipped bit, a wrong key, or a cut-short
//! buffer all fail the tag check and surface as
//! [`TokenError::DecryptionFailure`](common::TokenError::DecryptionFailure).

pub mod cipher;

pub use cipher::{CipherError, TokenCipher, NONCE_LEN, TAG_LEN};

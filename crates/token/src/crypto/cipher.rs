//! [`TokenCipher`]: the shared, immutable AES-GCM-SIV instance used for every token.
//!
//! **Algorithm choice:** AES-GCM-SIV (RFC 8452) is nonce-misuse-resistant, so
//! a duplicated random nonce across many issuing processes sharing one key
//! degrades to revealing equal plaintexts rather than breaking authentication.
//!
//! The key size follows the pre-shared key: 16 bytes selects AES-128-GCM-SIV,
//! 32 bytes selects AES-256-GCM-SIV.

use std::fmt;

use aes_gcm_siv::{
    aead::{rand_core::RngCore, Aead, KeyInit, OsRng},
    Aes128GcmSiv, Aes256GcmSiv, Nonce,
};
use common::{GenerateError, TokenError};
use thiserror::Error;

use crate::transport;

/// Byte length of an AES-GCM-SIV nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the authentication tag appended to the ciphertext.
pub const TAG_LEN: usize = 16;

/// Errors constructing a [`TokenCipher`].
#[derive(Debug, Error)]
pub enum CipherError {
    /// The key is neither 16 nor 32 bytes.
    #[error("invalid token key length: expected 16 or 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The base64 key text could not be decoded.
    #[error("token key is not valid base64")]
    InvalidKeyEncoding,
}

enum Inner {
    Aes128(Aes128GcmSiv),
    Aes256(Aes256GcmSiv),
}

/// Symmetric cipher for token bytes, built once from a pre-shared key.
///
/// Holds only the expanded key. `encrypt` and `decrypt` take `&self` and keep
/// no per-call state, so one instance can be shared across threads.
pub struct TokenCipher {
    inner: Inner,
}

impl TokenCipher {
    /// Build a cipher from raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidKeyLength`] unless `key` is 16 or 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self, CipherError> {
        let inner = match key.len() {
            16 => Aes128GcmSiv::new_from_slice(key).map(Inner::Aes128),
            32 => Aes256GcmSiv::new_from_slice(key).map(Inner::Aes256),
            n => return Err(CipherError::InvalidKeyLength(n)),
        }
        .map_err(|_| CipherError::InvalidKeyLength(key.len()))?;
        Ok(Self { inner })
    }

    /// Build a cipher from a standard-base64 key, as usually found in configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidKeyEncoding`] if `key_b64` is not base64,
    /// or [`CipherError::InvalidKeyLength`] if it decodes to the wrong length.
    pub fn from_base64(key_b64: &str) -> Result<Self, CipherError> {
        let mut key =
            transport::decode(key_b64.trim()).map_err(|_| CipherError::InvalidKeyEncoding)?;
        let cipher = Self::new(&key);
        // Zero the decoded key material once the key schedule is built.
        key.iter_mut().for_each(|b| *b = 0);
        cipher
    }

    /// Key size in bits.
    pub fn key_bits(&self) -> usize {
        match self.inner {
            Inner::Aes128(_) => 128,
            Inner::Aes256(_) => 256,
        }
    }

    /// Seal `plaintext` under a fresh random nonce.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Encryption`] on an internal AEAD error
    /// (unreachable with a valid key and nonce).
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, GenerateError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let sealed = match &self.inner {
            Inner::Aes128(c) => c.encrypt(nonce, plaintext),
            Inner::Aes256(c) => c.encrypt(nonce, plaintext),
        }
        .map_err(|_| GenerateError::Encryption)?;

        let mut out = Vec::with_capacity(NONCE_LEN + sealed.len());
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&sealed);
        Ok(out)
    }

    /// Open a token produced by [`TokenCipher::encrypt`].
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::DecryptionFailure`] if `token` is too short to hold
    /// a nonce and tag, or if authentication fails (wrong key or tampered data).
    pub fn decrypt(&self, token: &[u8]) -> Result<Vec<u8>, TokenError> {
        if token.len() < NONCE_LEN + TAG_LEN {
            return Err(TokenError::DecryptionFailure);
        }
        let (nonce_bytes, sealed) = token.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);
        match &self.inner {
            Inner::Aes128(c) => c.decrypt(nonce, sealed),
            Inner::Aes256(c) => c.decrypt(nonce, sealed),
        }
        .map_err(|_| TokenError::DecryptionFailure)
    }
}

impl fmt::Debug for TokenCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material — not even in debug builds.
        write!(f, "TokenCipher(AES-{}-GCM-SIV, [REDACTED])", self.key_bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn random_key(len: usize) -> Vec<u8> {
        let mut key = vec![0u8; len];
        OsRng.fill_bytes(&mut key);
        key
    }

    #[test]
    fn encrypt_decrypt_round_trip_both_sizes() {
        for len in [16, 32] {
            let cipher = TokenCipher::new(&random_key(len)).unwrap();
            assert_eq!(cipher.key_bits(), len * 8);
            let sealed = cipher.encrypt(b"caller bytes").unwrap();
            assert_eq!(sealed.len(), NONCE_LEN + 12 + TAG_LEN);
            assert_eq!(cipher.decrypt(&sealed).unwrap(), b"caller bytes");
        }
    }

    #[test]
    fn fresh_nonce_per_call() {
        let cipher = TokenCipher::new(&random_key(32)).unwrap();
        let a = cipher.encrypt(b"same").unwrap();
        let b = cipher.encrypt(b"same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn wrong_key_fails_decryption() {
        let sealed = TokenCipher::new(&random_key(32)).unwrap().encrypt(b"secret").unwrap();
        let other = TokenCipher::new(&random_key(32)).unwrap();
        assert_eq!(other.decrypt(&sealed), Err(TokenError::DecryptionFailure));
    }

    #[test]
    fn tampered_ciphertext_fails_auth() {
        let cipher = TokenCipher::new(&random_key(16)).unwrap();
        let mut sealed = cipher.encrypt(b"tamper me").unwrap();
        // Flip a byte in the ciphertext to simulate tampering.
        sealed[NONCE_LEN] ^= 0xFF;
        assert_eq!(cipher.decrypt(&sealed), Err(TokenError::DecryptionFailure));
    }

    #[test]
    fn short_input_fails_without_panicking() {
        let cipher = TokenCipher::new(&random_key(32)).unwrap();
        for len in 0..NONCE_LEN + TAG_LEN {
            assert!(cipher.decrypt(&vec![0u8; len]).is_err());
        }
    }

    #[test]
    fn invalid_key_length_rejected() {
        assert!(matches!(
            TokenCipher::new(&[0u8; 24]),
            Err(CipherError::InvalidKeyLength(24))
        ));
    }

    #[test]
    fn from_base64_accepts_padded_key_with_whitespace() {
        let cipher = TokenCipher::from_base64("  AAAAAAAAAAAAAAAAAAAAAA==\n").unwrap();
        assert_eq!(cipher.key_bits(), 128);
    }

    #[test]
    fn from_base64_rejects_bad_text() {
        assert!(matches!(
            TokenCipher::from_base64("***"),
            Err(CipherError::InvalidKeyEncoding)
        ));
    }

    #[test]
    fn debug_is_redacted() {
        let cipher = TokenCipher::new(&random_key(32)).unwrap();
        assert!(format!("{cipher:?}").contains("REDACTED"));
    }

    #[test]
    fn shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TokenCipher>();
    }
}

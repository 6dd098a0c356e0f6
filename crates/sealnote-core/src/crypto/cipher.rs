//! Authenticated encryption with XChaCha20-Poly1305.
//!
//! Sealed output is `ciphertext || 16-byte Poly1305 tag`. The nonce and the
//! additional authenticated data are supplied by the caller and must be
//! presented again, unchanged, to open the payload.

use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    XChaCha20Poly1305, XNonce,
};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::crypto::key::DerivedKey;
use crate::error::{Result, SealNoteError};

/// Size of an XChaCha20-Poly1305 nonce (192-bit).
pub const NONCE_LENGTH: usize = 24;

/// Size of the Poly1305 authentication tag.
pub const TAG_LENGTH: usize = 16;

/// A per-seal nonce.
///
/// 192 random bits per save make a repeated (key, nonce) pair negligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nonce([u8; NONCE_LENGTH]);

impl Nonce {
    /// Draw a fresh random nonce.
    pub fn generate() -> Self {
        let mut bytes = [0u8; NONCE_LENGTH];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; NONCE_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; NONCE_LENGTH] {
        &self.0
    }
}

/// Encrypt and authenticate `plaintext`, binding `aad` into the tag.
pub fn seal(key: &DerivedKey, nonce: &Nonce, aad: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());
    cipher
        .encrypt(
            XNonce::from_slice(nonce.as_bytes()),
            Payload {
                msg: plaintext,
                aad,
            },
        )
        .map_err(|e| SealNoteError::Crypto(format!("Encryption failed: {}", e)))
}

/// Verify and decrypt `ciphertext`.
///
/// Fails closed: any change to the key, nonce, aad, ciphertext or tag yields
/// [`SealNoteError::WrongPasswordOrCorrupt`] and no plaintext.
pub fn open(
    key: &DerivedKey,
    nonce: &Nonce,
    aad: &[u8],
    ciphertext: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    if ciphertext.len() < TAG_LENGTH {
        return Err(SealNoteError::WrongPasswordOrCorrupt);
    }

    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());
    cipher
        .decrypt(
            XNonce::from_slice(nonce.as_bytes()),
            Payload {
                msg: ciphertext,
                aad,
            },
        )
        .map(Zeroizing::new)
        .map_err(|_| SealNoteError::WrongPasswordOrCorrupt)
}

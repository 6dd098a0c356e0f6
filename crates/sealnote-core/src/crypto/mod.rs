//! Cryptographic operations for SealNote.
//!
//! This module provides key derivation and authenticated encryption using
//! well-audited libraries:
//! - **Argon2id**: memory-hard, salted password-to-key derivation
//! - **XChaCha20-Poly1305**: AEAD with 192-bit random nonces
//!
//! ## Security Model
//!
//! - Every store file carries its own random salt and KDF cost parameters
//! - Every save uses a fresh nonce
//! - The header is bound into the authentication tag as associated data
//! - Derived keys and decrypted plaintext are zeroized from memory on drop
//! - Passwords are never stored
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the encrypted store file
//! - Offline brute-force attacks on the password
//! - Tampering with any byte of the store file
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Access to an unlocked session / process memory

pub mod cipher;
pub mod key;
pub mod passphrase;

pub use cipher::{open, seal, Nonce, NONCE_LENGTH, TAG_LENGTH};
pub use key::{derive_key, DerivedKey, KdfAlgorithm, KdfParams, Salt, KEY_LENGTH, SALT_LENGTH};
pub use passphrase::passphrase_warnings;

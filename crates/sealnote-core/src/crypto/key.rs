//! Key derivation using Argon2id.
//!
//! This module derives encryption keys from passwords using the Argon2id
//! algorithm, which is memory-hard and resistant to GPU-based attacks. The
//! salt and cost parameters travel with each store file so the cost can be
//! tuned per file without breaking older files.

use argon2::Argon2;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::ZeroizeOnDrop;

use crate::error::{Result, SealNoteError};

/// Default Argon2id parameters.
///
/// - Memory: 64 MB (64 * 1024 KB)
/// - Iterations: 3
/// - Parallelism: 1 (single-threaded for simplicity)
const ARGON2_MEMORY_KB: u32 = 64 * 1024;
const ARGON2_ITERATIONS: u32 = 3;
const ARGON2_PARALLELISM: u32 = 1;

/// Upper bounds accepted from a store header.
const MAX_MEMORY_KB: u32 = 1024 * 1024;
const MAX_ITERATIONS: u32 = 64;
const MAX_PARALLELISM: u32 = 16;

/// Length of derived key in bytes (256 bits).
pub const KEY_LENGTH: usize = 32;

/// Length of freshly generated salts.
pub const SALT_LENGTH: usize = 16;

/// Shortest salt accepted for derivation.
pub const MIN_SALT_LENGTH: usize = 16;

/// Longest salt a store header can carry.
pub const MAX_SALT_LENGTH: usize = 64;

/// Key derivation algorithm recorded in the store header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdfAlgorithm {
    /// Argon2id, version 0x13
    Argon2id,
}

impl KdfAlgorithm {
    /// Wire identifier used in the store header.
    pub fn id(self) -> u8 {
        match self {
            KdfAlgorithm::Argon2id => 1,
        }
    }

    /// Look up an algorithm by its wire identifier.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(KdfAlgorithm::Argon2id),
            _ => None,
        }
    }
}

/// Cost parameters for password-to-key derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    pub algorithm: KdfAlgorithm,
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Time cost (passes over memory)
    pub iterations: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            algorithm: KdfAlgorithm::Argon2id,
            memory_kib: ARGON2_MEMORY_KB,
            iterations: ARGON2_ITERATIONS,
            parallelism: ARGON2_PARALLELISM,
        }
    }
}

impl KdfParams {
    /// Build Argon2id parameters, validating the bounds.
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self> {
        let params = Self {
            algorithm: KdfAlgorithm::Argon2id,
            memory_kib,
            iterations,
            parallelism,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check that the parameters are within the range this build will run.
    ///
    /// The bounds keep a hostile header from requesting unbounded memory or time.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_PARALLELISM).contains(&self.parallelism) {
            return Err(SealNoteError::InvalidInput(format!(
                "KDF parallelism must be between 1 and {}",
                MAX_PARALLELISM
            )));
        }
        if !(1..=MAX_ITERATIONS).contains(&self.iterations) {
            return Err(SealNoteError::InvalidInput(format!(
                "KDF iterations must be between 1 and {}",
                MAX_ITERATIONS
            )));
        }
        let min_memory = 8 * self.parallelism;
        if !(min_memory..=MAX_MEMORY_KB).contains(&self.memory_kib) {
            return Err(SealNoteError::InvalidInput(format!(
                "KDF memory must be between {} and {} KiB",
                min_memory, MAX_MEMORY_KB
            )));
        }
        Ok(())
    }
}

/// Random per-store salt, stored unencrypted in the file header.
#[derive(Clone, PartialEq, Eq)]
pub struct Salt(Vec<u8>);

impl Salt {
    /// Draw a fresh salt from the operating system RNG.
    pub fn generate() -> Self {
        let mut bytes = vec![0u8; SALT_LENGTH];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Wrap existing salt bytes (e.g. read from a header).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < MIN_SALT_LENGTH {
            return Err(SealNoteError::InvalidInput(format!(
                "Salt must be at least {} bytes",
                MIN_SALT_LENGTH
            )));
        }
        if bytes.len() > MAX_SALT_LENGTH {
            return Err(SealNoteError::InvalidInput(format!(
                "Salt must be at most {} bytes",
                MAX_SALT_LENGTH
            )));
        }
        Ok(Self(bytes.to_vec()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Salt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Salt").field("len", &self.0.len()).finish()
    }
}

/// A cryptographic key derived from a password.
///
/// This type ensures that key material is securely zeroized from memory
/// when dropped, reducing the window of exposure.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The raw key bytes (zeroized on drop)
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    /// Create a new DerivedKey from raw bytes.
    ///
    /// # Security
    ///
    /// The caller is responsible for ensuring the bytes come from a secure source.
    pub fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an encryption key from a password using Argon2id.
///
/// # Arguments
///
/// * `password` - The password bytes (may be empty, though that is discouraged)
/// * `salt` - The store's salt
/// * `params` - Cost parameters recorded in the store header
///
/// # Security
///
/// - Same password + salt + params always produces the same key
/// - Different salt produces a different key
/// - Memory-hard: resistant to GPU attacks
///
/// # Examples
///
/// ```
/// use sealnote_core::crypto::{derive_key, KdfParams, Salt};
///
/// let salt = Salt::generate();
/// let params = KdfParams::new(64, 1, 1).unwrap();
/// let key = derive_key(b"my-password", &salt, &params).unwrap();
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_key(password: &[u8], salt: &Salt, params: &KdfParams) -> Result<DerivedKey> {
    params.validate()?;

    let argon2_params = argon2::Params::new(
        params.memory_kib,
        params.iterations,
        params.parallelism,
        Some(KEY_LENGTH),
    )
    .map_err(|e| SealNoteError::Crypto(format!("Failed to create Argon2 params: {}", e)))?;

    let argon2 = match params.algorithm {
        KdfAlgorithm::Argon2id => {
            Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, argon2_params)
        }
    };

    let mut key_bytes = [0u8; KEY_LENGTH];
    argon2
        .hash_password_into(password, salt.as_bytes(), &mut key_bytes)
        .map_err(|e| SealNoteError::Crypto(format!("Key derivation failed: {}", e)))?;

    tracing::debug!(
        memory_kib = params.memory_kib,
        iterations = params.iterations,
        parallelism = params.parallelism,
        "derived store key"
    );

    let key = DerivedKey::from_bytes(key_bytes);
    zeroize::Zeroize::zeroize(&mut key_bytes);
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_params() -> KdfParams {
        KdfParams::new(64, 1, 1).unwrap()
    }

    fn salt(fill: u8) -> Salt {
        Salt::from_bytes(&[fill; SALT_LENGTH]).unwrap()
    }

    #[test]
    fn test_key_derivation_deterministic() {
        let key1 = derive_key(b"test-password", &salt(7), &fast_params()).unwrap();
        let key2 = derive_key(b"test-password", &salt(7), &fast_params()).unwrap();

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_single_salt_byte_changes_key() {
        let base = salt(7);
        let mut altered_bytes = base.as_bytes().to_vec();
        altered_bytes[SALT_LENGTH - 1] ^= 0x01;
        let altered = Salt::from_bytes(&altered_bytes).unwrap();

        let key1 = derive_key(b"test-password", &base, &fast_params()).unwrap();
        let key2 = derive_key(b"test-password", &altered, &fast_params()).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_password_different_key() {
        let key1 = derive_key(b"password-one", &salt(1), &fast_params()).unwrap();
        let key2 = derive_key(b"password-two", &salt(1), &fast_params()).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_cost_params_change_key() {
        let cheap = derive_key(b"pw", &salt(2), &fast_params()).unwrap();
        let costlier =
            derive_key(b"pw", &salt(2), &KdfParams::new(64, 2, 1).unwrap()).unwrap();

        assert_ne!(cheap.as_bytes(), costlier.as_bytes());
    }

    #[test]
    fn test_empty_password_allowed() {
        let key = derive_key(b"", &salt(3), &fast_params()).unwrap();
        assert_eq!(key.as_bytes().len(), KEY_LENGTH);
    }

    #[test]
    fn test_short_salt_rejected() {
        let result = Salt::from_bytes(b"short");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Salt must be at least 16 bytes"));
    }

    #[test]
    fn test_generated_salts_differ() {
        let a = Salt::generate();
        let b = Salt::generate();
        assert_eq!(a.len(), SALT_LENGTH);
        assert_ne!(a, b);
    }

    #[test]
    fn test_params_bounds() {
        assert!(KdfParams::new(64, 1, 1).is_ok());
        assert!(KdfParams::new(4, 1, 1).is_err());
        assert!(KdfParams::new(64, 0, 1).is_err());
        assert!(KdfParams::new(64, 1, 0).is_err());
        assert!(KdfParams::new(MAX_MEMORY_KB + 1, 1, 1).is_err());
        assert!(KdfParams::new(64, MAX_ITERATIONS + 1, 1).is_err());
        assert!(KdfParams::default().validate().is_ok());
    }

    #[test]
    fn test_algorithm_ids() {
        assert_eq!(KdfAlgorithm::Argon2id.id(), 1);
        assert_eq!(KdfAlgorithm::from_id(1), Some(KdfAlgorithm::Argon2id));
        assert_eq!(KdfAlgorithm::from_id(0), None);
    }

    #[test]
    fn test_derived_key_debug_redacts() {
        let key = derive_key(b"test-password", &salt(4), &fast_params()).unwrap();

        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));

        let key_hex = hex::encode(&key.as_bytes()[..4]);
        assert!(!debug_output.contains(&key_hex));
    }
}

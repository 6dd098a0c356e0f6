//! Error types for SealNote core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps them to
//! user-facing messages and exit codes.

use thiserror::Error;

/// Result type alias for SealNote operations.
pub type Result<T> = std::result::Result<T, SealNoteError>;

/// Failure outcomes of opening a store.
pub type OpenError = SealNoteError;

/// Core error type for SealNote operations.
#[derive(Debug, Error)]
pub enum SealNoteError {
    /// Authentication failed while unsealing a store file.
    ///
    /// A wrong password and a tampered or corrupted file are
    /// indistinguishable here and are reported the same way.
    #[error("Wrong password or corrupt store file")]
    WrongPasswordOrCorrupt,

    /// The store header names a format version this build cannot read.
    #[error("Unsupported store format version: {0}")]
    UnsupportedVersion(u8),

    /// A mutation referenced a note that does not exist.
    #[error("Note index {index} out of range (store has {len} notes)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Decrypted plaintext did not match the note schema.
    #[error("Malformed note record: {0}")]
    MalformedRecord(String),

    /// Invalid caller input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Encryption or key derivation primitive failed
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl SealNoteError {
    /// True when the error means the password should be re-prompted.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, SealNoteError::WrongPasswordOrCorrupt)
    }
}

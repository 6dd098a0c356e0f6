//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use sealnote_core::SealNoteError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (store file, note number)
    NotFound { message: String, hint: String },

    /// Authentication failed (wrong password, tampered file, too many attempts)
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),

    /// Store file cannot be interpreted by this build
    Integrity(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
            CliError::Integrity(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::Integrity(_) => exit_codes::INTEGRITY_FAILED,
        }
    }

    /// Print error message to stderr and exit with appropriate code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        std::process::exit(self.exit_code())
    }
}

/// Translate a core error into the CLI's error vocabulary.
///
/// Errors with no CLI-specific meaning (I/O, crypto) pass through unchanged
/// and exit with the general error code.
pub fn from_store_error(err: SealNoteError) -> anyhow::Error {
    match err {
        SealNoteError::WrongPasswordOrCorrupt => CliError::auth_failed_with_hint(
            "Wrong password or corrupt store file",
            "Check the password; if it is right, the file has been damaged or modified.",
        )
        .into(),
        SealNoteError::IndexOutOfRange { index, len } => CliError::not_found(
            format!("Note {} does not exist (store has {} notes)", index + 1, len),
            "Run `sealnote list` to see note numbers.",
        )
        .into(),
        SealNoteError::UnsupportedVersion(version) => CliError::Integrity(format!(
            "Store format version {} is not supported by this version of sealnote",
            version
        ))
        .into(),
        SealNoteError::MalformedRecord(detail) => {
            CliError::Integrity(format!("Store contents are malformed: {}", detail)).into()
        }
        SealNoteError::InvalidInput(message) => CliError::InvalidInput(message).into(),
        other => other.into(),
    }
}

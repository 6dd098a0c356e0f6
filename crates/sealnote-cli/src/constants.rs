//! Constants used throughout the CLI.

/// Environment variable holding the store password.
pub const PASSPHRASE_ENV: &str = "SEALNOTE_PASSPHRASE";

/// Environment variable holding the replacement password for `passwd`.
pub const NEW_PASSPHRASE_ENV: &str = "SEALNOTE_NEW_PASSPHRASE";

/// Environment variable overriding the log filter.
pub const LOG_ENV: &str = "SEALNOTE_LOG";

/// Password attempts allowed at an interactive prompt.
pub const MAX_PASSPHRASE_ATTEMPTS: usize = 3;

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (store file, note number).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong password or tampered file).
    pub const AUTH_FAILED: i32 = 5;

    /// Store file is from an unsupported version or its contents are malformed.
    pub const INTEGRITY_FAILED: i32 = 6;
}

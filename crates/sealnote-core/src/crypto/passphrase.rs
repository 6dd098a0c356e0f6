//! Password strength advice.
//!
//! The store accepts any password, including an empty one. These checks only
//! produce warnings for the caller to show when a password is chosen.

/// Passwords shorter than this draw a warning.
pub const RECOMMENDED_MIN_LENGTH: usize = 8;

/// Return human-readable weaknesses of `password`, or nothing if none apply.
///
/// # Examples
///
/// ```
/// use sealnote_core::crypto::passphrase_warnings;
///
/// assert!(passphrase_warnings("my-secure-password-123").is_empty());
/// assert!(!passphrase_warnings("short").is_empty());
/// ```
pub fn passphrase_warnings(password: &str) -> Vec<String> {
    let mut warnings = Vec::new();

    if password.is_empty() {
        warnings.push("Password is empty; anyone with the file can read your notes".to_string());
        return warnings;
    }

    if password.trim().is_empty() {
        warnings.push("Password contains only whitespace".to_string());
    }

    let length = password.chars().count();
    if length < RECOMMENDED_MIN_LENGTH {
        warnings.push(format!(
            "Password is shorter than {} characters (got {})",
            RECOMMENDED_MIN_LENGTH, length
        ));
    }

    warnings
}

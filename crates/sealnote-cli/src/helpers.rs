//! Input and parsing helper functions for the CLI.

use std::io::{self, IsTerminal, Read};

use dialoguer::{Confirm, Editor, Input, Password};
use secrecy::SecretString;

use crate::constants::{NEW_PASSPHRASE_ENV, PASSPHRASE_ENV};
use crate::errors::CliError;

/// True when prompts may be shown.
pub fn is_interactive(no_input: bool) -> bool {
    io::stdin().is_terminal() && !no_input
}

/// Read a password from `var` if it is set and not blank.
pub fn env_passphrase(var: &str) -> Option<SecretString> {
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(SecretString::from)
}

/// Prompt for the store password, or read it from SEALNOTE_PASSPHRASE.
pub fn prompt_passphrase(interactive: bool) -> anyhow::Result<SecretString> {
    if let Some(passphrase) = env_passphrase(PASSPHRASE_ENV) {
        return Ok(passphrase);
    }
    if !interactive {
        return Err(CliError::invalid_input(format!(
            "No password provided and no TTY available. Set {}.",
            PASSPHRASE_ENV
        ))
        .into());
    }
    Password::new()
        .with_prompt("Password")
        .allow_empty_password(true)
        .interact()
        .map(SecretString::from)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Prompt for a password to protect a new store, with confirmation.
///
/// `env_var` is consulted first so scripts can run without a TTY.
pub fn prompt_new_passphrase(
    env_var: &str,
    prompt: &str,
    interactive: bool,
) -> anyhow::Result<SecretString> {
    if let Some(passphrase) = env_passphrase(env_var) {
        return Ok(passphrase);
    }
    if !interactive {
        return Err(CliError::invalid_input(format!(
            "No password provided and no TTY available. Set {}.",
            env_var
        ))
        .into());
    }
    Password::new()
        .with_prompt(prompt)
        .with_confirmation("Confirm password", "Passwords do not match")
        .allow_empty_password(true)
        .interact()
        .map(SecretString::from)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Prompt for the replacement password used by `passwd`.
pub fn prompt_replacement_passphrase(interactive: bool) -> anyhow::Result<SecretString> {
    prompt_new_passphrase(NEW_PASSPHRASE_ENV, "New password", interactive)
}

/// Convert a 1-based note number from the command line to an index.
pub fn note_index(number: usize) -> anyhow::Result<usize> {
    number
        .checked_sub(1)
        .ok_or_else(|| CliError::invalid_input("Note numbers start at 1").into())
}

/// Resolve a single-line field: flag value, else prompt, else `fallback`.
pub fn read_line_field(
    label: &str,
    provided: Option<String>,
    fallback: Option<&str>,
    interactive: bool,
) -> anyhow::Result<String> {
    if let Some(value) = provided {
        return Ok(value);
    }
    if interactive {
        let mut input = Input::<String>::new().with_prompt(label);
        if let Some(current) = fallback {
            input = input.with_initial_text(current);
        }
        return input
            .interact_text()
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", label.to_lowercase(), e));
    }
    fallback
        .map(str::to_string)
        .ok_or_else(|| CliError::invalid_input(format!("--{} is required", label.to_lowercase())).into())
}

/// Resolve the note body: flag value, else piped stdin, else the editor.
pub fn read_body_field(
    provided: Option<String>,
    fallback: Option<&str>,
    no_input: bool,
) -> anyhow::Result<String> {
    if let Some(value) = provided {
        return Ok(value);
    }

    if !io::stdin().is_terminal() && fallback.is_none() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read body from stdin: {}", e))?;
        return Ok(buffer);
    }

    if is_interactive(no_input) {
        return match Editor::new()
            .edit(fallback.unwrap_or_default())
            .map_err(|e| anyhow::anyhow!("Failed to open editor: {}", e))?
        {
            Some(text) => Ok(text),
            None => Err(CliError::invalid_input("Editor closed without saving").into()),
        };
    }

    fallback
        .map(str::to_string)
        .ok_or_else(|| CliError::invalid_input("--body is required").into())
}

/// Ask before a destructive action. `assume_yes` skips the prompt.
pub fn confirm(prompt: &str, assume_yes: bool, interactive: bool) -> anyhow::Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    if !interactive {
        return Err(CliError::invalid_input("Refusing to continue without --yes").into());
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_index_is_zero_based() {
        assert_eq!(note_index(1).unwrap(), 0);
        assert_eq!(note_index(12).unwrap(), 11);
    }

    #[test]
    fn test_note_index_rejects_zero() {
        let err = note_index(0).unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
    }

    #[test]
    fn test_line_field_prefers_flag() {
        let value = read_line_field("Title", Some("given".into()), Some("old"), false).unwrap();
        assert_eq!(value, "given");
    }

    #[test]
    fn test_line_field_falls_back_without_tty() {
        let value = read_line_field("Title", None, Some("old"), false).unwrap();
        assert_eq!(value, "old");
        assert!(read_line_field("Title", None, None, false).is_err());
    }

    #[test]
    fn test_confirm_assume_yes() {
        assert!(confirm("Delete?", true, false).unwrap());
        assert!(confirm("Delete?", false, false).is_err());
    }
}

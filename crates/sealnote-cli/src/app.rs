//! Application context: path resolution, configuration and store unlocking.

use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use sealnote_core::crypto::{passphrase_warnings, KdfParams};
use sealnote_core::NoteStore;
use secrecy::ExposeSecret;

use crate::cli::Cli;
use crate::config::{default_store_path, load_config, SealNoteConfig};
use crate::constants::{MAX_PASSPHRASE_ATTEMPTS, PASSPHRASE_ENV};
use crate::errors::{from_store_error, CliError};
use crate::helpers::{env_passphrase, is_interactive, prompt_new_passphrase, prompt_passphrase};

/// Shared state for command handlers.
pub struct AppContext<'a> {
    pub cli: &'a Cli,
    config: SealNoteConfig,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> anyhow::Result<Self> {
        let config = load_config(cli.config.as_deref().map(Path::new))?;
        Ok(Self { cli, config })
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Store path from `--store`/SEALNOTE_PATH, then config, then the XDG default.
    pub fn store_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = self.cli.store.as_deref() {
            return Ok(PathBuf::from(path));
        }
        if let Some(path) = self.config.store.path.as_deref() {
            return Ok(PathBuf::from(path));
        }
        default_store_path()
    }

    /// KDF cost for new stores and password changes.
    pub fn kdf_params(&self) -> anyhow::Result<KdfParams> {
        self.config.kdf.params()
    }

    /// Require an existing store file, for read-only commands.
    pub fn require_existing_store(&self) -> anyhow::Result<PathBuf> {
        let path = self.store_path()?;
        if !path.exists() {
            return Err(CliError::not_found(
                format!("No store found at {}", path.display()),
                "Add a note with `sealnote add` to create it, or pass --store.",
            )
            .into());
        }
        Ok(path)
    }

    /// Unlock the store, creating an empty one if the file does not exist.
    ///
    /// A missing file prompts for a new password (with confirmation). An
    /// existing file gets up to three interactive attempts; a password taken
    /// from the environment gets exactly one.
    pub fn open_store(&self, no_input: bool) -> anyhow::Result<NoteStore> {
        let path = self.store_path()?;
        let interactive = is_interactive(no_input);

        if !path.exists() {
            let password = prompt_new_passphrase(PASSPHRASE_ENV, "New store password", interactive)?;
            self.warn_weak_passphrase(password.expose_secret());
            let params = self.kdf_params()?;
            tracing::info!(path = %path.display(), "creating new store");
            return NoteStore::open_with_params(&path, &password, &params).map_err(from_store_error);
        }

        if let Some(password) = env_passphrase(PASSPHRASE_ENV) {
            return NoteStore::open(&path, &password).map_err(from_store_error);
        }

        for attempt in 1..=MAX_PASSPHRASE_ATTEMPTS {
            let password = prompt_passphrase(interactive)?;
            match NoteStore::open(&path, &password) {
                Ok(store) => return Ok(store),
                Err(err) if err.is_auth_failure() => {
                    tracing::debug!(attempt, "unlock attempt failed");
                    if attempt < MAX_PASSPHRASE_ATTEMPTS {
                        eprintln!("Wrong password or corrupt store file. Try again.");
                    }
                }
                Err(err) => return Err(from_store_error(err)),
            }
        }

        Err(CliError::auth_failed_with_hint(
            "Too many failed attempts",
            "If the password is right, the store file has been damaged or modified.",
        )
        .into())
    }

    /// Print advice about a weak password to stderr (never blocks).
    pub fn warn_weak_passphrase(&self, password: &str) {
        if self.quiet() {
            return;
        }
        for warning in passphrase_warnings(password) {
            eprintln!("{} {}", "Warning:".yellow().bold(), warning);
        }
    }
}

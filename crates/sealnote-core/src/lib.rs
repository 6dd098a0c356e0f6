//! # SealNote Core
//!
//! Core library for SealNote - a password-protected, encrypted store for a
//! small collection of free-text notes kept in a single local file.
//!
//! This crate holds the store itself, independent of any user interface.
//! Callers pass in a path and a password and receive explicit `Result`s.
//!
//! ## Architecture
//!
//! - **crypto**: Argon2id key derivation and XChaCha20-Poly1305 sealing
//! - **store**: container format, note types, and the `NoteStore`
//! - **fs**: crash-safe file replacement
//!
//! ## Example
//!
//! ```no_run
//! use sealnote_core::{Note, NoteStore};
//! use secrecy::SecretString;
//!
//! let password = SecretString::from("correct horse battery staple");
//! let mut store = NoteStore::open("notes.sealnote", &password)?;
//! store.add(Note::new("Groceries", "milk, eggs"))?;
//! for note in store.list() {
//!     println!("{}", note.title);
//! }
//! # Ok::<(), sealnote_core::SealNoteError>(())
//! ```

pub mod crypto;
pub mod error;
pub mod fs;
pub mod store;

pub use error::{OpenError, Result, SealNoteError};
pub use store::{Note, NoteCollection, NoteStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

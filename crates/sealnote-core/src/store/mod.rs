//! Encrypted note storage for SealNote.
//!
//! ## Architecture
//!
//! - **types**: the `Note` record and the ordered `NoteCollection`
//! - **codec**: the on-disk container (header, nonce, AEAD ciphertext)
//! - **note_store**: `NoteStore`, which owns the collection and persists it
//!   after every mutation
//!
//! ## Security
//!
//! - Encryption at rest only (no plaintext modes)
//! - Salted Argon2id key derivation with per-file cost parameters
//! - Atomic writes to prevent corruption

pub mod codec;
pub mod note_store;
pub mod types;

pub use codec::{decode, encode, read_header, KeyMaterial, StoreHeader, FORMAT_VERSION};
pub use note_store::NoteStore;
pub use types::{Note, NoteCollection};

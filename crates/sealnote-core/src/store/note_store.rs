//! The authoritative in-memory note collection and its persistence.
//!
//! Every mutation is followed by a synchronous full re-encryption of the
//! collection and an atomic replacement of the store file. If that write
//! fails the mutation is rolled back, so memory never runs ahead of disk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};

use crate::crypto::{DerivedKey, KdfParams};
use crate::error::{Result, SealNoteError};
use crate::fs::write_atomic;
use crate::store::codec::{self, KeyMaterial};
use crate::store::types::{Note, NoteCollection};

/// An open, unlocked note store bound to one file path.
///
/// The derived key lives only as long as this value and is zeroized on drop.
/// Mutations take `&mut self`; sharing one store across threads requires
/// external synchronization.
#[derive(Debug)]
pub struct NoteStore {
    path: PathBuf,
    notes: NoteCollection,
    key_material: KeyMaterial,
    key: DerivedKey,
}

impl NoteStore {
    /// Open the store at `path`, or start an empty one with default KDF cost.
    ///
    /// See [`NoteStore::open_with_params`].
    pub fn open(path: impl AsRef<Path>, password: &SecretString) -> Result<Self> {
        Self::open_with_params(path, password, &KdfParams::default())
    }

    /// Open the store at `path`, or start an empty one using `params`.
    ///
    /// `params` only applies when no file exists yet; an existing file is
    /// always read with the salt and cost recorded in its header. A new store
    /// is not written to disk until its first mutation.
    ///
    /// # Errors
    ///
    /// - `WrongPasswordOrCorrupt` if the file does not authenticate
    /// - `UnsupportedVersion` if the file was written by a newer format
    /// - `MalformedRecord` if the decrypted notes do not match the schema
    /// - `Io` if the file cannot be read
    pub fn open_with_params(
        path: impl AsRef<Path>,
        password: &SecretString,
        params: &KdfParams,
    ) -> Result<Self> {
        let path = path.as_ref();
        match fs::read(path) {
            Ok(bytes) => Self::unlock(path, &bytes, password),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                params.validate()?;
                let key_material = KeyMaterial::generate(*params);
                let key = key_material.derive(password.expose_secret().as_bytes())?;
                tracing::debug!(path = %path.display(), "starting new empty store");
                Ok(Self {
                    path: path.to_path_buf(),
                    notes: NoteCollection::new(),
                    key_material,
                    key,
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    fn unlock(path: &Path, bytes: &[u8], password: &SecretString) -> Result<Self> {
        let unsealed = codec::unseal(bytes, password.expose_secret().as_bytes())?;
        let needs_migration = unsealed.needs_migration();
        let from_version = unsealed.header.version;

        let store = Self {
            path: path.to_path_buf(),
            notes: unsealed.notes,
            key_material: unsealed.header.key_material,
            key: unsealed.key,
        };
        tracing::debug!(
            path = %path.display(),
            notes = store.notes.len(),
            "opened store"
        );

        if needs_migration {
            match store.persist() {
                Ok(()) => tracing::info!(
                    path = %path.display(),
                    from_version,
                    to_version = codec::FORMAT_VERSION,
                    "migrated store format"
                ),
                Err(err) => tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "store format migration deferred until next save"
                ),
            }
        }

        Ok(store)
    }

    /// Path of the backing store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// KDF cost parameters of this store.
    pub fn kdf_params(&self) -> &KdfParams {
        &self.key_material.params
    }

    /// Read-only view of all notes in order.
    pub fn list(&self) -> &[Note] {
        self.notes.as_slice()
    }

    /// The full collection.
    pub fn notes(&self) -> &NoteCollection {
        &self.notes
    }

    pub fn get(&self, index: usize) -> Result<&Note> {
        self.notes.get(index).ok_or(SealNoteError::IndexOutOfRange {
            index,
            len: self.notes.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Append a note and persist. Returns its index.
    pub fn add(&mut self, note: Note) -> Result<usize> {
        let index = self.notes.push(note);
        if let Err(err) = self.persist() {
            self.notes.pop();
            return Err(err);
        }
        Ok(index)
    }

    /// Replace the note at `index` and persist.
    pub fn update(&mut self, index: usize, note: Note) -> Result<()> {
        let previous = self.notes.replace(index, note)?;
        if let Err(err) = self.persist() {
            let _ = self.notes.replace(index, previous);
            return Err(err);
        }
        Ok(())
    }

    /// Delete the note at `index` and persist. Returns the removed note.
    pub fn remove(&mut self, index: usize) -> Result<Note> {
        let removed = self.notes.remove(index)?;
        if let Err(err) = self.persist() {
            self.notes.insert(index, removed);
            return Err(err);
        }
        Ok(removed)
    }

    /// Re-encrypt the store under a new password.
    ///
    /// A new salt is generated and `params` becomes the store's KDF cost. The
    /// file is replaced atomically; on failure the old password stays valid.
    pub fn change_password(&mut self, new_password: &SecretString, params: &KdfParams) -> Result<()> {
        params.validate()?;
        let key_material = KeyMaterial::generate(*params);
        let key = key_material.derive(new_password.expose_secret().as_bytes())?;

        let bytes = codec::encode(&self.notes, &key_material, &key)?;
        write_atomic(&self.path, &bytes)?;

        self.key_material = key_material;
        self.key = key;
        tracing::info!(path = %self.path.display(), "store password changed");
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        let bytes = codec::encode(&self.notes, &self.key_material, &self.key)?;
        write_atomic(&self.path, &bytes)?;
        tracing::debug!(
            path = %self.path.display(),
            notes = self.notes.len(),
            bytes = bytes.len(),
            "persisted store"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn fast_params() -> KdfParams {
        KdfParams::new(64, 1, 1).unwrap()
    }

    fn password() -> SecretString {
        SecretString::from("test-password-123")
    }

    #[test]
    fn test_legacy_file_migrated_on_open() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.sealnote");
        let material = KeyMaterial::generate(fast_params());
        let key = material.derive(b"test-password-123").unwrap();
        let legacy = codec::encode_legacy(&["remember the milk"], &material, &key).unwrap();
        fs::write(&path, &legacy).unwrap();

        let store = NoteStore::open(&path, &password()).unwrap();
        assert_eq!(
            store.list(),
            &[Note::new("remember the milk", "remember the milk")]
        );

        let on_disk = fs::read(&path).unwrap();
        let header = codec::read_header(&on_disk).unwrap();
        assert_eq!(header.version, codec::FORMAT_VERSION);
        assert_eq!(header.key_material, material);
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_persist_rolls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.sealnote");
        let mut store = NoteStore::open_with_params(&path, &password(), &fast_params()).unwrap();
        store.add(Note::new("kept", "body")).unwrap();

        // A directory at the target path makes the final rename fail.
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(matches!(
            store.add(Note::new("lost", "body")),
            Err(SealNoteError::Io { .. })
        ));
        assert!(store.update(0, Note::new("changed", "body")).is_err());
        assert!(store.remove(0).is_err());

        assert_eq!(store.list(), &[Note::new("kept", "body")]);
    }

    #[test]
    fn test_get_out_of_range() {
        let dir = tempdir().unwrap();
        let store = NoteStore::open_with_params(
            dir.path().join("notes.sealnote"),
            &password(),
            &fast_params(),
        )
        .unwrap();

        assert!(matches!(
            store.get(0),
            Err(SealNoteError::IndexOutOfRange { index: 0, len: 0 })
        ));
    }
}

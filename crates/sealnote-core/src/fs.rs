//! Filesystem utilities for atomic store replacement.
//!
//! A store file is never written in place. New bytes go to a temporary file
//! in the same directory, are synced, and only then renamed over the target,
//! so the target is always either the previous version or the new one.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Result, SealNoteError};

/// A fully written and synced temporary file waiting to replace its target.
///
/// Dropping a `StagedFile` without calling [`StagedFile::commit`] removes the
/// temporary file and leaves the target untouched.
#[derive(Debug)]
pub struct StagedFile {
    temp_path: PathBuf,
    destination: PathBuf,
    committed: bool,
}

impl StagedFile {
    /// Path of the temporary file holding the new contents.
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Rename the temporary file over the destination.
    pub fn commit(mut self) -> Result<()> {
        rename_with_fallback(&self.temp_path, &self.destination)?;
        self.committed = true;
        sync_parent_dir(&self.destination);
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.temp_path);
        }
    }
}

/// Write `data` to a fresh temporary file next to `destination` and sync it.
///
/// The parent directory is created if it does not exist yet.
pub fn stage(destination: &Path, data: &[u8]) -> Result<StagedFile> {
    let parent = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let filename = destination
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| SealNoteError::InvalidInput("Invalid store filename".to_string()))?;

    fs::create_dir_all(&parent)?;

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    let temp_path = parent.join(format!(".{}.{}.{}.tmp", filename, std::process::id(), nanos));

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)?;

    // From here on the guard owns cleanup of the temp file.
    let staged = StagedFile {
        temp_path,
        destination: destination.to_path_buf(),
        committed: false,
    };

    file.write_all(data)?;
    file.sync_all()?;

    Ok(staged)
}

/// Atomically replace `destination` with `data`.
pub fn write_atomic(destination: &Path, data: &[u8]) -> Result<()> {
    stage(destination, data)?.commit()
}

/// Rename a file over an existing destination.
///
/// On Windows `fs::rename` fails if the destination exists, so the
/// destination is removed and the rename retried. Elsewhere rename already
/// replaces atomically and a failure is returned as-is, leaving the
/// destination untouched.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    match fs::rename(temp_path, destination) {
        Ok(()) => Ok(()),
        #[cfg(windows)]
        Err(initial_err) => {
            let _ = fs::remove_file(destination);
            fs::rename(temp_path, destination).map_err(|retry_err| {
                io::Error::new(
                    retry_err.kind(),
                    format!(
                        "Atomic rename failed (initial: {}, retry: {})",
                        initial_err, retry_err
                    ),
                )
            })
        }
        #[cfg(not(windows))]
        Err(err) => Err(err),
    }
}

#[cfg(unix)]
fn sync_parent_dir(path: &Path) {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Ok(dir) = File::open(parent) {
            let _ = dir.sync_all();
        }
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) {}

//! Core data types for the note store.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SealNoteError};

/// Longest title derived when migrating a legacy untitled note.
const LEGACY_TITLE_MAX_CHARS: usize = 60;

/// Title given to a legacy note with no usable first line.
const LEGACY_FALLBACK_TITLE: &str = "Untitled";

/// A single note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Note {
    /// Short title shown in listings
    pub title: String,

    /// Free-text content
    pub body: String,
}

impl Note {
    /// Build a note as-is, without validation.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Build a note from user input, trimming both fields.
    ///
    /// Rejects an empty title or body. The store itself accepts any note; this
    /// is the guard callers apply before committing user input.
    pub fn validated(title: &str, body: &str) -> Result<Self> {
        let title = title.trim();
        let body = body.trim();
        if title.is_empty() {
            return Err(SealNoteError::InvalidInput(
                "Note title cannot be empty".to_string(),
            ));
        }
        if body.is_empty() {
            return Err(SealNoteError::InvalidInput(
                "Note body cannot be empty".to_string(),
            ));
        }
        Ok(Self::new(title, body))
    }

    /// Migrate a legacy single-field note.
    ///
    /// The title is the first non-blank line, shortened to a listing-friendly
    /// length; the body keeps the full original text.
    pub fn from_legacy(text: String) -> Self {
        let title: String = text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(|line| line.chars().take(LEGACY_TITLE_MAX_CHARS).collect())
            .unwrap_or_else(|| LEGACY_FALLBACK_TITLE.to_string());
        Self { title, body: text }
    }
}

/// Ordered collection of notes; insertion order is display and storage order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteCollection(Vec<Note>);

impl NoteCollection {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn as_slice(&self) -> &[Note] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Note> {
        self.0.get(index)
    }

    pub(crate) fn push(&mut self, note: Note) -> usize {
        self.0.push(note);
        self.0.len() - 1
    }

    /// Swap in `note` at `index`, returning the previous note.
    pub(crate) fn replace(&mut self, index: usize, note: Note) -> Result<Note> {
        let len = self.0.len();
        let slot = self
            .0
            .get_mut(index)
            .ok_or(SealNoteError::IndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, note))
    }

    pub(crate) fn insert(&mut self, index: usize, note: Note) {
        self.0.insert(index, note);
    }

    pub(crate) fn remove(&mut self, index: usize) -> Result<Note> {
        let len = self.0.len();
        if index >= len {
            return Err(SealNoteError::IndexOutOfRange { index, len });
        }
        Ok(self.0.remove(index))
    }

    pub(crate) fn pop(&mut self) -> Option<Note> {
        self.0.pop()
    }
}

impl From<Vec<Note>> for NoteCollection {
    fn from(notes: Vec<Note>) -> Self {
        Self(notes)
    }
}

impl FromIterator<Note> for NoteCollection {
    fn from_iter<I: IntoIterator<Item = Note>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for NoteCollection {
    type Item = Note;
    type IntoIter = std::vec::IntoIter<Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a NoteCollection {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

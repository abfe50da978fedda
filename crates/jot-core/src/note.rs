//! Note — the stored entity, its content variants, and the list projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Surrogate key assigned by the store on first save.
pub type NoteId = i64;

/// Sentinel id carried by a note that has never been persisted.
/// [`crate::store::NoteStore::upsert_note`] inserts on this value and
/// replaces otherwise.
pub const NEW_NOTE_ID: NoteId = 0;

/// Bodies up to this many bytes are stored inline in the note row; anything
/// larger spills to the blob store.
pub const INLINE_BODY_LIMIT: usize = 1024;

/// Maximum length of the derived abstract, in characters.
pub const ABSTRACT_MAX_CHARS: usize = 20;

// ─── Content ─────────────────────────────────────────────────────────────────

/// Where a note body lives.
///
/// Exactly one of the two relational columns (`body`, `content_file_name`)
/// is ever non-null; this enum is that invariant made unrepresentable-wrong.
/// The two-column mapping exists only inside the storage adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteContent {
  /// Body stored directly as a column value.
  Inline(String),
  /// Body stored as a standalone file, referenced weakly by name.
  FileBacked(String),
}

impl NoteContent {
  /// The inline body, if this content is inline.
  pub fn inline(&self) -> Option<&str> {
    match self {
      NoteContent::Inline(body) => Some(body),
      NoteContent::FileBacked(_) => None,
    }
  }

  /// The blob-store file name, if this content is file-backed.
  pub fn file_name(&self) -> Option<&str> {
    match self {
      NoteContent::Inline(_) => None,
      NoteContent::FileBacked(name) => Some(name),
    }
  }
}

// ─── Entities ────────────────────────────────────────────────────────────────

/// A stored note. Ownership is not recorded here; it lives in the
/// user–note join table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
  pub note_id:       NoteId,
  pub title:         String,
  /// Derived first-line preview; see [`derive_abstract`].
  pub note_abstract: String,
  pub content:       NoteContent,
  pub last_edited:   DateTime<Utc>,
}

/// Read-only list projection. Carries everything a note list needs without
/// ever loading bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSummary {
  pub note_id:       NoteId,
  pub title:         String,
  pub note_abstract: String,
  pub last_edited:   DateTime<Utc>,
}

// ─── Abstract derivation ─────────────────────────────────────────────────────

/// Derive the short preview shown in note lists: the text before the first
/// newline, cut to [`ABSTRACT_MAX_CHARS`] characters with a trailing `"..."`
/// when cut.
pub fn derive_abstract(body: &str) -> String {
  let first_line = match body.split_once('\n') {
    Some((first, _)) => first,
    None => body,
  };

  if first_line.chars().count() > ABSTRACT_MAX_CHARS {
    let head: String = first_line.chars().take(ABSTRACT_MAX_CHARS).collect();
    format!("{head}...")
  } else {
    first_line.to_string()
  }
}

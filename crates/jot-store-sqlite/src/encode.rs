//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. The [`NoteContent`] sum type
//! maps to the two mutually-exclusive nullable columns `body` /
//! `content_file_name`; that mapping exists only in this crate.

use chrono::{DateTime, Utc};
use jot_core::{
  note::{Note, NoteContent, NoteId, NoteSummary},
  user::User,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NoteContent ─────────────────────────────────────────────────────────────

/// Split content into the `(body, content_file_name)` column pair.
pub fn encode_content(content: NoteContent) -> (Option<String>, Option<String>) {
  match content {
    NoteContent::Inline(body) => (Some(body), None),
    NoteContent::FileBacked(name) => (None, Some(name)),
  }
}

/// Rebuild content from the column pair. The schema CHECK guarantees exactly
/// one side is set for rows written by this crate.
pub fn decode_content(
  note_id: NoteId,
  body: Option<String>,
  file_name: Option<String>,
) -> Result<NoteContent> {
  match (body, file_name) {
    (Some(body), None) => Ok(NoteContent::Inline(body)),
    (None, Some(name)) => Ok(NoteContent::FileBacked(name)),
    _ => Err(Error::ContentColumns(note_id)),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `user` row.
pub struct RawUser {
  pub user_id:   i64,
  pub user_name: String,
}

impl RawUser {
  pub fn into_user(self) -> User {
    User {
      user_id:   self.user_id,
      user_name: self.user_name,
    }
  }
}

/// Raw values read directly from a `note` row.
pub struct RawNote {
  pub note_id:           i64,
  pub title:             String,
  pub note_abstract:     String,
  pub body:              Option<String>,
  pub content_file_name: Option<String>,
  pub last_edited:       String,
}

impl RawNote {
  pub fn into_note(self) -> Result<Note> {
    let content =
      decode_content(self.note_id, self.body, self.content_file_name)?;
    Ok(Note {
      note_id:       self.note_id,
      title:         self.title,
      note_abstract: self.note_abstract,
      content,
      last_edited:   decode_dt(&self.last_edited)?,
    })
  }
}

/// Raw values for the list projection; body columns are never selected.
pub struct RawSummary {
  pub note_id:       i64,
  pub title:         String,
  pub note_abstract: String,
  pub last_edited:   String,
}

impl RawSummary {
  pub fn into_summary(self) -> Result<NoteSummary> {
    Ok(NoteSummary {
      note_id:       self.note_id,
      title:         self.title,
      note_abstract: self.note_abstract,
      last_edited:   decode_dt(&self.last_edited)?,
    })
  }
}

//! The `NoteStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `jot-store-sqlite`).
//! Higher layers (`jot-service`, `jot-cli`) depend on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::{
  note::{Note, NoteId, NoteSummary},
  user::{User, UserId},
};

/// Abstraction over a jot persistence backend.
///
/// Operations are atomic at the single-row level only; no cross-table
/// transaction guarantee is made for a note upsert followed by a join-row
/// insert.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait NoteStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Create and persist a user row; the id is assigned by the store.
  fn insert_user(
    &self,
    user_name: String,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Look a user up by name. Returns `None` if not found.
  fn get_user_by_name<'a>(
    &'a self,
    user_name: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// Look a user up by id. Returns `None` if not found.
  fn get_user_by_id(
    &self,
    user_id: UserId,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Delete a user row. Join rows are not touched; callers that want a
  /// clean store must unlink first.
  fn delete_user(
    &self,
    user_id: UserId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Notes ─────────────────────────────────────────────────────────────

  /// Insert `note` when its id is [`NEW_NOTE_ID`](crate::note::NEW_NOTE_ID),
  /// otherwise replace the row with that id. Returns the assigned or
  /// existing id.
  fn upsert_note(
    &self,
    note: Note,
  ) -> impl Future<Output = Result<NoteId, Self::Error>> + Send + '_;

  /// Fetch a note by id. Returns `None` if not found.
  fn get_note_by_id(
    &self,
    note_id: NoteId,
  ) -> impl Future<Output = Result<Option<Note>, Self::Error>> + Send + '_;

  /// Delete a note row. The caller must have removed any join rows first;
  /// the schema's foreign keys do not cascade.
  fn delete_note_by_id(
    &self,
    note_id: NoteId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// All notes linked to `user_id`, most recently edited first.
  fn notes_for_user(
    &self,
    user_id: UserId,
  ) -> impl Future<Output = Result<Vec<Note>, Self::Error>> + Send + '_;

  /// List projection of the notes linked to `user_id`, most recently
  /// edited first. Body columns are never read.
  fn summaries_for_user(
    &self,
    user_id: UserId,
  ) -> impl Future<Output = Result<Vec<NoteSummary>, Self::Error>> + Send + '_;

  // ── Ownership join ────────────────────────────────────────────────────

  /// Link a note to its owner. One row per `(user_id, note_id)` pair.
  fn insert_user_note(
    &self,
    user_id: UserId,
    note_id: NoteId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Remove an ownership link.
  fn delete_user_note(
    &self,
    user_id: UserId,
    note_id: NoteId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

//! [`NoteService`] — login, save, load, list, and delete over a single
//! logical "note", hiding the inline-versus-file storage split.

use chrono::Utc;

use jot_blob::BlobStore;
use jot_core::{
  note::{
    INLINE_BODY_LIMIT, NEW_NOTE_ID, Note, NoteContent, NoteId, NoteSummary,
    derive_abstract,
  },
  store::NoteStore,
  user::{User, UserId},
};

use crate::{CredentialStore, Error, Result};

/// Orchestrates the persistence engine, the blob store, and the credential
/// store. Construct one at startup with explicitly opened stores; there is
/// no global instance.
pub struct NoteService<S> {
  store:       S,
  blobs:       BlobStore,
  credentials: CredentialStore,
}

impl<S> NoteService<S>
where
  S: NoteStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  pub fn new(store: S, blobs: BlobStore, credentials: CredentialStore) -> Self {
    Self {
      store,
      blobs,
      credentials,
    }
  }

  // ── Login ─────────────────────────────────────────────────────────────────

  /// Check-or-create credentials and resolve the user identity.
  ///
  /// A never-seen username becomes a new account; a known one must present
  /// the matching password. `None` means denied, with no distinction
  /// between an unknown user and a wrong password.
  pub async fn login(&self, username: &str, password: &str) -> Result<Option<User>> {
    if !self.credentials.check_or_create(username, password).await? {
      return Ok(None);
    }

    // First login creates the user row; later logins find it again.
    let user = match self
      .store
      .get_user_by_name(username)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?
    {
      Some(user) => user,
      None => {
        let user = self
          .store
          .insert_user(username.to_owned())
          .await
          .map_err(|e| Error::Store(Box::new(e)))?;
        tracing::info!(user_id = user.user_id, "created user on first login");
        user
      }
    };

    Ok(Some(user))
  }

  // ── Notes ─────────────────────────────────────────────────────────────────

  /// Save a note, inline or file-backed depending on body size, and link it
  /// to its owner on first save. Pass `None` for a brand-new note.
  pub async fn save_note(
    &self,
    note_id: Option<NoteId>,
    user_id: UserId,
    title: &str,
    body: &str,
  ) -> Result<NoteId> {
    if title.trim().is_empty() {
      return Err(jot_core::Error::EmptyTitle.into());
    }
    if body.trim().is_empty() {
      return Err(jot_core::Error::EmptyBody.into());
    }

    // A re-save supersedes the previous blob, if there was one.
    let previous_file = match note_id {
      Some(id) => self
        .store
        .get_note_by_id(id)
        .await
        .map_err(|e| Error::Store(Box::new(e)))?
        .and_then(|n| n.content.file_name().map(str::to_owned)),
      None => None,
    };

    let content = if body.len() > INLINE_BODY_LIMIT {
      NoteContent::FileBacked(self.blobs.write(body).await?)
    } else {
      NoteContent::Inline(body.to_owned())
    };
    let new_file = content.file_name().map(str::to_owned);

    let note = Note {
      note_id: note_id.unwrap_or(NEW_NOTE_ID),
      title: title.to_owned(),
      note_abstract: derive_abstract(body),
      content,
      last_edited: Utc::now(),
    };
    let is_new = note.note_id == NEW_NOTE_ID;

    let assigned = self
      .store
      .upsert_note(note)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;

    if is_new {
      match self
        .store
        .get_user_by_id(user_id)
        .await
        .map_err(|e| Error::Store(Box::new(e)))?
      {
        Some(_) => {
          self
            .store
            .insert_user_note(user_id, assigned)
            .await
            .map_err(|e| Error::Store(Box::new(e)))?;
        }
        None => {
          tracing::warn!(
            user_id,
            note_id = assigned,
            "owner does not exist; note saved unlinked"
          );
        }
      }
    }

    if let Some(old) = previous_file {
      // A same-millisecond rewrite reuses the blob name; don't delete it.
      if new_file.as_deref() != Some(old.as_str()) {
        self.blobs.remove(&old).await?;
      }
    }

    Ok(assigned)
  }

  /// Load a note's `(title, body)`, reading file-backed content through the
  /// blob store. A missing backing file yields an empty body.
  pub async fn load_note(&self, note_id: NoteId) -> Result<(String, String)> {
    let note = self
      .store
      .get_note_by_id(note_id)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?
      .ok_or(jot_core::Error::NoteNotFound(note_id))?;

    let body = match note.content {
      NoteContent::Inline(body) => body,
      NoteContent::FileBacked(name) => self.blobs.read(&name).await?,
    };

    Ok((note.title, body))
  }

  /// Delete a note: unlink it from its owner, drop the row, then remove the
  /// backing file if one exists.
  pub async fn delete_note(&self, note_id: NoteId, user_id: UserId) -> Result<()> {
    let note = self
      .store
      .get_note_by_id(note_id)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?
      .ok_or(jot_core::Error::NoteNotFound(note_id))?;

    self
      .store
      .delete_user_note(user_id, note_id)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;
    self
      .store
      .delete_note_by_id(note_id)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;

    if let Some(name) = note.content.file_name() {
      self.blobs.remove(name).await?;
    }

    Ok(())
  }

  /// The user's notes as list summaries, most recently edited first.
  pub async fn list_notes(&self, user_id: UserId) -> Result<Vec<NoteSummary>> {
    self
      .store
      .summaries_for_user(user_id)
      .await
      .map_err(|e| Error::Store(Box::new(e)))
  }

  // ── Account ───────────────────────────────────────────────────────────────

  /// Delete an account outright: every owned note (links, rows, and blob
  /// files), the credential entry, then the user row.
  pub async fn delete_account(&self, user_id: UserId, username: &str) -> Result<()> {
    self
      .store
      .get_user_by_id(user_id)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?
      .ok_or(jot_core::Error::UserNotFound(user_id))?;

    let notes = self
      .store
      .notes_for_user(user_id)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;

    for note in notes {
      self
        .store
        .delete_user_note(user_id, note.note_id)
        .await
        .map_err(|e| Error::Store(Box::new(e)))?;
      self
        .store
        .delete_note_by_id(note.note_id)
        .await
        .map_err(|e| Error::Store(Box::new(e)))?;
      if let Some(name) = note.content.file_name() {
        self.blobs.remove(name).await?;
      }
    }

    self.credentials.remove(username).await?;
    self
      .store
      .delete_user(user_id)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;

    tracing::info!(user_id, username, "account deleted");
    Ok(())
  }
}

//! [`SqliteStore`] — the SQLite implementation of [`NoteStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use jot_core::{
  note::{NEW_NOTE_ID, Note, NoteId, NoteSummary},
  store::NoteStore,
  user::{User, UserId},
};

use crate::{
  Error, Result,
  encode::{RawNote, RawSummary, RawUser, encode_content, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A jot note store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. The store
/// is an explicitly constructed value; open it at startup, inject it into
/// the service, and [`close`](SqliteStore::close) it on shutdown.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Flush and close the underlying connection.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await.map_err(Error::Database)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── NoteStore impl ──────────────────────────────────────────────────────────

impl NoteStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn insert_user(&self, user_name: String) -> Result<User> {
    let name = user_name.clone();
    let user_id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO user (user_name) VALUES (?1)",
          rusqlite::params![name],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(User { user_id, user_name })
  }

  async fn get_user_by_name(&self, user_name: &str) -> Result<Option<User>> {
    let name = user_name.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT user_id, user_name FROM user WHERE user_name = ?1 LIMIT 1",
              rusqlite::params![name],
              |row| {
                Ok(RawUser {
                  user_id:   row.get(0)?,
                  user_name: row.get(1)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    Ok(raw.map(RawUser::into_user))
  }

  async fn get_user_by_id(&self, user_id: UserId) -> Result<Option<User>> {
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT user_id, user_name FROM user WHERE user_id = ?1",
              rusqlite::params![user_id],
              |row| {
                Ok(RawUser {
                  user_id:   row.get(0)?,
                  user_name: row.get(1)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    Ok(raw.map(RawUser::into_user))
  }

  async fn delete_user(&self, user_id: UserId) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM user WHERE user_id = ?1",
          rusqlite::params![user_id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Notes ─────────────────────────────────────────────────────────────────

  async fn upsert_note(&self, note: Note) -> Result<NoteId> {
    let (body, file_name) = encode_content(note.content);
    let last_edited = encode_dt(note.last_edited);
    let note_id = note.note_id;
    let title = note.title;
    let note_abstract = note.note_abstract;

    let assigned = self
      .conn
      .call(move |conn| {
        if note_id == NEW_NOTE_ID {
          conn.execute(
            "INSERT INTO note (title, note_abstract, body, content_file_name, last_edited)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![title, note_abstract, body, file_name, last_edited],
          )?;
          Ok(conn.last_insert_rowid())
        } else {
          conn.execute(
            "UPDATE note
             SET title = ?2, note_abstract = ?3, body = ?4,
                 content_file_name = ?5, last_edited = ?6
             WHERE note_id = ?1",
            rusqlite::params![
              note_id,
              title,
              note_abstract,
              body,
              file_name,
              last_edited,
            ],
          )?;
          Ok(note_id)
        }
      })
      .await?;

    Ok(assigned)
  }

  async fn get_note_by_id(&self, note_id: NoteId) -> Result<Option<Note>> {
    let raw: Option<RawNote> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT note_id, title, note_abstract, body, content_file_name,
                      last_edited
               FROM note WHERE note_id = ?1",
              rusqlite::params![note_id],
              |row| {
                Ok(RawNote {
                  note_id:           row.get(0)?,
                  title:             row.get(1)?,
                  note_abstract:     row.get(2)?,
                  body:              row.get(3)?,
                  content_file_name: row.get(4)?,
                  last_edited:       row.get(5)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawNote::into_note).transpose()
  }

  async fn delete_note_by_id(&self, note_id: NoteId) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM note WHERE note_id = ?1",
          rusqlite::params![note_id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn notes_for_user(&self, user_id: UserId) -> Result<Vec<Note>> {
    let raws: Vec<RawNote> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT n.note_id, n.title, n.note_abstract, n.body,
                  n.content_file_name, n.last_edited
           FROM note n
           JOIN user_note un ON un.note_id = n.note_id
           WHERE un.user_id = ?1
           ORDER BY n.last_edited DESC",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![user_id], |row| {
            Ok(RawNote {
              note_id:           row.get(0)?,
              title:             row.get(1)?,
              note_abstract:     row.get(2)?,
              body:              row.get(3)?,
              content_file_name: row.get(4)?,
              last_edited:       row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawNote::into_note).collect()
  }

  async fn summaries_for_user(&self, user_id: UserId) -> Result<Vec<NoteSummary>> {
    let raws: Vec<RawSummary> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT n.note_id, n.title, n.note_abstract, n.last_edited
           FROM note n
           JOIN user_note un ON un.note_id = n.note_id
           WHERE un.user_id = ?1
           ORDER BY n.last_edited DESC",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![user_id], |row| {
            Ok(RawSummary {
              note_id:       row.get(0)?,
              title:         row.get(1)?,
              note_abstract: row.get(2)?,
              last_edited:   row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSummary::into_summary).collect()
  }

  // ── Ownership join ────────────────────────────────────────────────────────

  async fn insert_user_note(&self, user_id: UserId, note_id: NoteId) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO user_note (user_id, note_id) VALUES (?1, ?2)",
          rusqlite::params![user_id, note_id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_user_note(&self, user_id: UserId, note_id: NoteId) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM user_note WHERE user_id = ?1 AND note_id = ?2",
          rusqlite::params![user_id, note_id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

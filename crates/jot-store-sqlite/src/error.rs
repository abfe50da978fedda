//! Error type for `jot-store-sqlite`.

use thiserror::Error;

use jot_core::note::NoteId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A note row violated the body-xor-file invariant. The schema CHECK
  /// makes this unreachable for rows written by this crate.
  #[error("note {0} has neither or both of body and content_file_name")]
  ContentColumns(NoteId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

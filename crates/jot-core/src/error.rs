//! Error types for `jot-core`.

use thiserror::Error;

use crate::{note::NoteId, user::UserId};

#[derive(Debug, Error)]
pub enum Error {
  #[error("note not found: {0}")]
  NoteNotFound(NoteId),

  #[error("user not found: {0}")]
  UserNotFound(UserId),

  #[error("note title is empty")]
  EmptyTitle,

  #[error("note body is empty")]
  EmptyBody,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

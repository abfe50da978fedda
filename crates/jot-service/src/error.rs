//! Error type for `jot-service`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] jot_core::Error),

  /// An error surfaced by the injected [`NoteStore`](jot_core::store::NoteStore)
  /// backend; boxed so the service stays generic over the backend's error
  /// type.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error(transparent)]
  Blob(#[from] jot_blob::Error),

  #[error("credential i/o error: {0}")]
  Io(#[from] std::io::Error),

  #[error("credential file error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

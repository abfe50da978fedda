//! Filesystem-backed overflow storage for large note bodies.
//!
//! Note rows reference blobs weakly, by file name; a blob with no
//! referencing row is unreachable garbage. Reads of a missing blob degrade
//! to an empty string rather than failing — a note whose backing file has
//! vanished still loads, with empty content.

use std::{
  io,
  path::{Path, PathBuf},
};

use chrono::Utc;
use tokio::fs;

pub mod error;

pub use error::{Error, Result};

/// A directory of note-content files.
///
/// File names are `note_content_<millisecond-timestamp>.txt`; two writes
/// within the same clock tick collide, with the later one winning.
#[derive(Debug, Clone)]
pub struct BlobStore {
  dir: PathBuf,
}

impl BlobStore {
  /// Open a blob store rooted at `dir`, creating the directory if needed.
  pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
    let dir = dir.into();
    fs::create_dir_all(&dir).await?;
    Ok(Self { dir })
  }

  /// Persist `content` as a new file and return its name, to be stored on
  /// the note row.
  pub async fn write(&self, content: &str) -> Result<String> {
    let name = format!("note_content_{}.txt", Utc::now().timestamp_millis());
    fs::write(self.dir.join(&name), content).await?;
    Ok(name)
  }

  /// Read a blob back. A missing file yields `""`; any other I/O failure
  /// propagates.
  pub async fn read(&self, name: &str) -> Result<String> {
    match fs::read_to_string(self.dir.join(name)).await {
      Ok(content) => Ok(content),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
      Err(e) => Err(e.into()),
    }
  }

  /// Delete a blob. Removing a file that is already gone is not an error.
  pub async fn remove(&self, name: &str) -> Result<()> {
    match fs::remove_file(self.dir.join(name)).await {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e.into()),
    }
  }

  /// The directory this store writes into.
  pub fn dir(&self) -> &Path { &self.dir }
}

#[cfg(test)]
mod tests {
  use super::*;

  async fn blob_store() -> (tempfile::TempDir, BlobStore) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = BlobStore::open(tmp.path().join("note_files"))
      .await
      .expect("blob store");
    (tmp, store)
  }

  #[tokio::test]
  async fn write_then_read_roundtrip() {
    let (_tmp, store) = blob_store().await;

    let name = store.write("a large note body").await.unwrap();
    assert!(name.starts_with("note_content_"));
    assert!(name.ends_with(".txt"));

    assert_eq!(store.read(&name).await.unwrap(), "a large note body");
  }

  #[tokio::test]
  async fn read_missing_blob_is_empty() {
    let (_tmp, store) = blob_store().await;
    let content = store.read("note_content_0.txt").await.unwrap();
    assert_eq!(content, "");
  }

  #[tokio::test]
  async fn remove_then_read_is_empty() {
    let (_tmp, store) = blob_store().await;

    let name = store.write("doomed").await.unwrap();
    store.remove(&name).await.unwrap();

    assert_eq!(store.read(&name).await.unwrap(), "");
    // Removing again is fine.
    store.remove(&name).await.unwrap();
  }

  #[tokio::test]
  async fn sequential_writes_get_distinct_names() {
    let (_tmp, store) = blob_store().await;

    let first = store.write("first").await.unwrap();
    // Names are millisecond-derived; step past the current tick.
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    let second = store.write("second").await.unwrap();

    assert_ne!(first, second);
    assert_eq!(store.read(&first).await.unwrap(), "first");
    assert_eq!(store.read(&second).await.unwrap(), "second");
  }

  #[tokio::test]
  async fn open_creates_the_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("nested").join("note_files");
    let store = BlobStore::open(&dir).await.unwrap();
    assert!(store.dir().is_dir());
  }
}

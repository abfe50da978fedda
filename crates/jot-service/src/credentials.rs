//! Credential store — username → password digest, persisted as a JSON file.
//!
//! Deliberately separate from the relational `user` table: the table never
//! sees a password, and this file never sees a user id. The digest is an
//! unsalted lowercase-hex SHA-256 of the plaintext.

use std::{collections::HashMap, io, path::PathBuf};

use sha2::{Digest, Sha256};
use tokio::{fs, sync::Mutex};

use crate::Result;

/// One entry per known user, loaded fully at open and rewritten on every
/// mutation. The map is tiny; a full rewrite keeps the file format trivial.
pub struct CredentialStore {
  path:    PathBuf,
  entries: Mutex<HashMap<String, String>>,
}

impl CredentialStore {
  /// Open the store at `path`, loading existing entries if the file exists.
  pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
    let path = path.into();
    let entries = match fs::read_to_string(&path).await {
      Ok(raw) => serde_json::from_str(&raw)?,
      Err(e) if e.kind() == io::ErrorKind::NotFound => HashMap::new(),
      Err(e) => return Err(e.into()),
    };
    Ok(Self {
      path,
      entries: Mutex::new(entries),
    })
  }

  /// Whether `username` has a stored credential.
  pub async fn exists(&self, username: &str) -> bool {
    self.entries.lock().await.contains_key(username)
  }

  /// Check `password` against the stored digest, creating the entry when the
  /// username has never been seen. A single boolean outcome: unknown user
  /// and wrong password are indistinguishable to the caller.
  ///
  /// The lock is held across the read-check-write, so two concurrent first
  /// logins for the same username cannot both observe "no entry".
  pub async fn check_or_create(
    &self,
    username: &str,
    password: &str,
  ) -> Result<bool> {
    let digest = hash_password(password);
    let mut entries = self.entries.lock().await;
    match entries.get(username) {
      Some(stored) => Ok(*stored == digest),
      None => {
        entries.insert(username.to_owned(), digest);
        self.persist(&entries).await?;
        Ok(true)
      }
    }
  }

  /// Delete the credential entry for `username`. Unknown names are a no-op.
  pub async fn remove(&self, username: &str) -> Result<()> {
    let mut entries = self.entries.lock().await;
    if entries.remove(username).is_some() {
      self.persist(&entries).await?;
    }
    Ok(())
  }

  async fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
    let raw = serde_json::to_string_pretty(entries)?;
    fs::write(&self.path, raw).await?;
    Ok(())
  }
}

/// Lowercase hex SHA-256 digest of the plaintext. No per-user salt: the
/// stored value is a pure function of the password.
pub fn hash_password(password: &str) -> String {
  hex::encode(Sha256::digest(password.as_bytes()))
}

#[cfg(test)]
mod tests {
  use super::*;

  async fn open_store(tmp: &tempfile::TempDir) -> CredentialStore {
    CredentialStore::open(tmp.path().join("credentials.json"))
      .await
      .expect("credential store")
  }

  #[test]
  fn digest_is_lowercase_hex_sha256() {
    // SHA-256 of the empty string, the standard test vector.
    assert_eq!(
      hash_password(""),
      "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );

    let d = hash_password("hunter2");
    assert_eq!(d.len(), 64);
    assert!(d.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
  }

  #[test]
  fn digest_is_deterministic_and_password_sensitive() {
    assert_eq!(hash_password("pw1"), hash_password("pw1"));
    assert_ne!(hash_password("pw1"), hash_password("pw2"));
  }

  #[tokio::test]
  async fn first_check_creates_and_later_checks_verify() {
    let tmp = tempfile::tempdir().unwrap();
    let store = open_store(&tmp).await;

    assert!(!store.exists("alice").await);
    assert!(store.check_or_create("alice", "pw1").await.unwrap());
    assert!(store.exists("alice").await);

    assert!(store.check_or_create("alice", "pw1").await.unwrap());
    assert!(!store.check_or_create("alice", "pw2").await.unwrap());
  }

  #[tokio::test]
  async fn wrong_password_does_not_overwrite_the_entry() {
    let tmp = tempfile::tempdir().unwrap();
    let store = open_store(&tmp).await;

    store.check_or_create("alice", "pw1").await.unwrap();
    assert!(!store.check_or_create("alice", "pw2").await.unwrap());
    // The original password still verifies.
    assert!(store.check_or_create("alice", "pw1").await.unwrap());
  }

  #[tokio::test]
  async fn entries_survive_reopen() {
    let tmp = tempfile::tempdir().unwrap();

    {
      let store = open_store(&tmp).await;
      store.check_or_create("alice", "pw1").await.unwrap();
    }

    let reopened = open_store(&tmp).await;
    assert!(reopened.exists("alice").await);
    assert!(reopened.check_or_create("alice", "pw1").await.unwrap());
    assert!(!reopened.check_or_create("alice", "nope").await.unwrap());
  }

  #[tokio::test]
  async fn remove_deletes_the_entry() {
    let tmp = tempfile::tempdir().unwrap();
    let store = open_store(&tmp).await;

    store.check_or_create("alice", "pw1").await.unwrap();
    store.remove("alice").await.unwrap();

    assert!(!store.exists("alice").await);
    // With the entry gone, any password re-creates the account.
    assert!(store.check_or_create("alice", "brand-new").await.unwrap());
  }

  #[tokio::test]
  async fn remove_unknown_user_is_a_noop() {
    let tmp = tempfile::tempdir().unwrap();
    let store = open_store(&tmp).await;
    store.remove("ghost").await.unwrap();
  }
}

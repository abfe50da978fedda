//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{TimeZone, Utc};
use jot_core::{
  note::{NEW_NOTE_ID, Note, NoteContent, derive_abstract},
  store::NoteStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn inline_note(title: &str, body: &str, ts_secs: i64) -> Note {
  Note {
    note_id:       NEW_NOTE_ID,
    title:         title.into(),
    note_abstract: derive_abstract(body),
    content:       NoteContent::Inline(body.into()),
    last_edited:   Utc.timestamp_opt(ts_secs, 0).unwrap(),
  }
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_user_assigns_id_and_get_by_name_finds_it() {
  let s = store().await;

  let alice = s.insert_user("alice".into()).await.unwrap();
  assert_ne!(alice.user_id, 0);
  assert_eq!(alice.user_name, "alice");

  let fetched = s.get_user_by_name("alice").await.unwrap();
  assert_eq!(fetched, Some(alice));
}

#[tokio::test]
async fn get_user_by_name_missing_returns_none() {
  let s = store().await;
  assert!(s.get_user_by_name("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn get_user_by_id_roundtrip() {
  let s = store().await;
  let bob = s.insert_user("bob".into()).await.unwrap();

  let fetched = s.get_user_by_id(bob.user_id).await.unwrap();
  assert_eq!(fetched, Some(bob));

  assert!(s.get_user_by_id(9999).await.unwrap().is_none());
}

#[tokio::test]
async fn users_get_distinct_ids() {
  let s = store().await;
  let a = s.insert_user("a".into()).await.unwrap();
  let b = s.insert_user("b".into()).await.unwrap();
  assert_ne!(a.user_id, b.user_id);
}

#[tokio::test]
async fn delete_user_removes_row() {
  let s = store().await;
  let u = s.insert_user("temp".into()).await.unwrap();

  s.delete_user(u.user_id).await.unwrap();
  assert!(s.get_user_by_id(u.user_id).await.unwrap().is_none());
}

// ─── Note upsert ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_new_note_assigns_id() {
  let s = store().await;

  let id1 = s.upsert_note(inline_note("T1", "B1", 100)).await.unwrap();
  let id2 = s.upsert_note(inline_note("T2", "B2", 200)).await.unwrap();

  assert_ne!(id1, NEW_NOTE_ID);
  assert_ne!(id1, id2);
}

#[tokio::test]
async fn inline_note_roundtrip() {
  let s = store().await;

  let note = inline_note("Title", "First line\nrest", 100);
  let id = s.upsert_note(note.clone()).await.unwrap();

  let fetched = s.get_note_by_id(id).await.unwrap().unwrap();
  assert_eq!(fetched.note_id, id);
  assert_eq!(fetched.title, "Title");
  assert_eq!(fetched.note_abstract, "First line");
  assert_eq!(fetched.content, NoteContent::Inline("First line\nrest".into()));
  assert_eq!(fetched.last_edited, note.last_edited);
}

#[tokio::test]
async fn file_backed_note_roundtrip() {
  let s = store().await;

  let mut note = inline_note("Big", "big body", 100);
  note.content = NoteContent::FileBacked("note_content_1700000000000.txt".into());
  let id = s.upsert_note(note).await.unwrap();

  let fetched = s.get_note_by_id(id).await.unwrap().unwrap();
  assert_eq!(
    fetched.content,
    NoteContent::FileBacked("note_content_1700000000000.txt".into())
  );
}

#[tokio::test]
async fn upsert_existing_replaces_in_place() {
  let s = store().await;

  let id = s.upsert_note(inline_note("Old", "old body", 100)).await.unwrap();

  let mut updated = inline_note("New", "new body", 200);
  updated.note_id = id;
  let id2 = s.upsert_note(updated).await.unwrap();
  assert_eq!(id2, id);

  let fetched = s.get_note_by_id(id).await.unwrap().unwrap();
  assert_eq!(fetched.title, "New");
  assert_eq!(fetched.content, NoteContent::Inline("new body".into()));
  assert_eq!(fetched.last_edited, Utc.timestamp_opt(200, 0).unwrap());
}

#[tokio::test]
async fn upsert_can_switch_storage_location() {
  let s = store().await;

  let id = s.upsert_note(inline_note("N", "small", 100)).await.unwrap();

  let mut grown = inline_note("N", "grown", 200);
  grown.note_id = id;
  grown.content = NoteContent::FileBacked("note_content_42.txt".into());
  s.upsert_note(grown).await.unwrap();

  let fetched = s.get_note_by_id(id).await.unwrap().unwrap();
  assert_eq!(fetched.content.file_name(), Some("note_content_42.txt"));
  assert_eq!(fetched.content.inline(), None);
}

#[tokio::test]
async fn get_note_missing_returns_none() {
  let s = store().await;
  assert!(s.get_note_by_id(12345).await.unwrap().is_none());
}

// ─── Note delete ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_note_removes_row() {
  let s = store().await;
  let id = s.upsert_note(inline_note("T", "B", 100)).await.unwrap();

  s.delete_note_by_id(id).await.unwrap();
  assert!(s.get_note_by_id(id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_linked_note_without_unlinking_errors() {
  let s = store().await;
  let user = s.insert_user("alice".into()).await.unwrap();
  let id = s.upsert_note(inline_note("T", "B", 100)).await.unwrap();
  s.insert_user_note(user.user_id, id).await.unwrap();

  // Foreign keys are declared without cascade; the join row must go first.
  assert!(s.delete_note_by_id(id).await.is_err());

  s.delete_user_note(user.user_id, id).await.unwrap();
  s.delete_note_by_id(id).await.unwrap();
  assert!(s.get_note_by_id(id).await.unwrap().is_none());
}

// ─── Ownership join and listing ──────────────────────────────────────────────

#[tokio::test]
async fn summaries_only_include_linked_notes() {
  let s = store().await;
  let alice = s.insert_user("alice".into()).await.unwrap();
  let bob = s.insert_user("bob".into()).await.unwrap();

  let a_note = s.upsert_note(inline_note("A", "alice's", 100)).await.unwrap();
  let b_note = s.upsert_note(inline_note("B", "bob's", 200)).await.unwrap();
  s.insert_user_note(alice.user_id, a_note).await.unwrap();
  s.insert_user_note(bob.user_id, b_note).await.unwrap();

  let for_alice = s.summaries_for_user(alice.user_id).await.unwrap();
  assert_eq!(for_alice.len(), 1);
  assert_eq!(for_alice[0].note_id, a_note);
  assert_eq!(for_alice[0].title, "A");
  assert_eq!(for_alice[0].note_abstract, "alice's");
}

#[tokio::test]
async fn summaries_ordered_by_last_edited_desc() {
  let s = store().await;
  let user = s.insert_user("alice".into()).await.unwrap();

  let oldest = s.upsert_note(inline_note("oldest", "1", 100)).await.unwrap();
  let middle = s.upsert_note(inline_note("middle", "2", 200)).await.unwrap();
  let newest = s.upsert_note(inline_note("newest", "3", 300)).await.unwrap();
  for id in [oldest, middle, newest] {
    s.insert_user_note(user.user_id, id).await.unwrap();
  }

  let ids: Vec<_> = s
    .summaries_for_user(user.user_id)
    .await
    .unwrap()
    .into_iter()
    .map(|n| n.note_id)
    .collect();
  assert_eq!(ids, vec![newest, middle, oldest]);

  // Editing the oldest note moves it to the front.
  let mut edited = inline_note("oldest", "1 again", 400);
  edited.note_id = oldest;
  s.upsert_note(edited).await.unwrap();

  let ids: Vec<_> = s
    .summaries_for_user(user.user_id)
    .await
    .unwrap()
    .into_iter()
    .map(|n| n.note_id)
    .collect();
  assert_eq!(ids, vec![oldest, newest, middle]);
}

#[tokio::test]
async fn notes_for_user_returns_full_rows_ordered() {
  let s = store().await;
  let user = s.insert_user("alice".into()).await.unwrap();

  let first = s.upsert_note(inline_note("first", "b1", 100)).await.unwrap();
  let second = s.upsert_note(inline_note("second", "b2", 200)).await.unwrap();
  s.insert_user_note(user.user_id, first).await.unwrap();
  s.insert_user_note(user.user_id, second).await.unwrap();

  let notes = s.notes_for_user(user.user_id).await.unwrap();
  assert_eq!(notes.len(), 2);
  assert_eq!(notes[0].note_id, second);
  assert_eq!(notes[1].note_id, first);
  assert_eq!(notes[1].content, NoteContent::Inline("b1".into()));
}

#[tokio::test]
async fn close_succeeds_after_writes() {
  let s = store().await;
  s.upsert_note(inline_note("T", "B", 100)).await.unwrap();
  s.close().await.unwrap();
}

#[tokio::test]
async fn unlink_hides_note_from_list() {
  let s = store().await;
  let user = s.insert_user("alice".into()).await.unwrap();
  let id = s.upsert_note(inline_note("T", "B", 100)).await.unwrap();
  s.insert_user_note(user.user_id, id).await.unwrap();

  s.delete_user_note(user.user_id, id).await.unwrap();

  assert!(s.summaries_for_user(user.user_id).await.unwrap().is_empty());
  // The row itself survives; only the link is gone.
  assert!(s.get_note_by_id(id).await.unwrap().is_some());
}

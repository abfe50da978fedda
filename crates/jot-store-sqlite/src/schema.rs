//! SQL schema for the jot SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS user (
    user_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    user_name  TEXT NOT NULL
);

-- Exactly one of body / content_file_name is non-null: small bodies live
-- inline, large ones are spilled to the blob store and referenced by name.
CREATE TABLE IF NOT EXISTS note (
    note_id            INTEGER PRIMARY KEY AUTOINCREMENT,
    title              TEXT NOT NULL,
    note_abstract      TEXT NOT NULL,
    body               TEXT,
    content_file_name  TEXT,
    last_edited        TEXT NOT NULL,   -- ISO 8601 UTC
    CHECK ((body IS NULL) != (content_file_name IS NULL))
);

-- Ownership join, one row per (owner, note) pair. Foreign keys do not
-- cascade; a note delete must remove its join rows first.
CREATE TABLE IF NOT EXISTS user_note (
    user_id  INTEGER NOT NULL REFERENCES user(user_id),
    note_id  INTEGER NOT NULL REFERENCES note(note_id),
    PRIMARY KEY (user_id, note_id)
);

CREATE INDEX IF NOT EXISTS user_note_note_idx   ON user_note(note_id);
CREATE INDEX IF NOT EXISTS note_last_edited_idx ON note(last_edited);

PRAGMA user_version = 1;
";

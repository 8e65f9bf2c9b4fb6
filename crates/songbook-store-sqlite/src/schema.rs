//! SQL schema for the Songbook SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps ids of deleted songs from being reused.
CREATE TABLE IF NOT EXISTS songs (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    group_name   TEXT NOT NULL,
    song_name    TEXT NOT NULL,
    release_date TEXT NOT NULL,   -- YYYY-MM-DD
    lyrics       TEXT NOT NULL DEFAULT '',
    link         TEXT NOT NULL DEFAULT '',
    created_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

-- updated_at is store-managed; no statement issued by the service sets it.
CREATE TRIGGER IF NOT EXISTS songs_touch_updated_at
AFTER UPDATE ON songs
FOR EACH ROW
BEGIN
    UPDATE songs
       SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
     WHERE id = NEW.id;
END;

CREATE INDEX IF NOT EXISTS songs_group_song_idx ON songs(group_name, song_name);

PRAGMA user_version = 1;
";

//! [`SqliteStore`] — the SQLite implementation of [`SongStore`].

use std::path::Path;

use rusqlite::{Connection, OptionalExtension as _};
use songbook_core::{
  page::Page,
  song::{NewSong, Song, SongPatch},
  store::{SongFilter, SongStore},
};

use crate::{
  Result,
  encode::{RawSong, SONG_COLUMNS, encode_date},
  schema::SCHEMA,
  update::UpdateStatement,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A song catalog backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
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

fn select_song(conn: &Connection, id: i64) -> rusqlite::Result<Option<RawSong>> {
  conn
    .query_row(
      &format!("SELECT {SONG_COLUMNS} FROM songs WHERE id = ?1"),
      rusqlite::params![id],
      RawSong::from_row,
    )
    .optional()
}

// ─── SongStore impl ──────────────────────────────────────────────────────────

impl SongStore for SqliteStore {
  type Error = crate::Error;

  async fn add_song(&self, song: NewSong) -> Result<Song> {
    let NewSong { group, song: name, release_date, lyrics, link } = song;
    let release_date_str = encode_date(release_date);

    let raw: RawSong = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &format!(
            "INSERT INTO songs (group_name, song_name, release_date, lyrics, link)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING {SONG_COLUMNS}"
          ),
          rusqlite::params![group, name, release_date_str, lyrics, link],
          RawSong::from_row,
        )?)
      })
      .await?;

    let created = raw.into_song()?;
    tracing::debug!(id = created.id, "inserted song");
    Ok(created)
  }

  async fn get_song(&self, id: i64) -> Result<Option<Song>> {
    let raw = self
      .conn
      .call(move |conn| Ok(select_song(conn, id)?))
      .await?;

    raw.map(RawSong::into_song).transpose()
  }

  async fn list_songs(&self, filter: SongFilter, page: Page) -> Result<Vec<Song>> {
    let limit_val  = i64::from(page.limit());
    let offset_val = page.offset() as i64;

    let raws: Vec<RawSong> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SONG_COLUMNS}
           FROM songs
           WHERE (?1 IS NULL OR group_name = ?1)
             AND (?2 IS NULL OR song_name = ?2)
           ORDER BY id
           LIMIT ?3 OFFSET ?4"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![filter.group, filter.song_name, limit_val, offset_val],
            RawSong::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSong::into_song).collect()
  }

  async fn lyrics(&self, id: i64) -> Result<Option<String>> {
    let lyrics: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT lyrics FROM songs WHERE id = ?1",
            rusqlite::params![id],
            |row| row.get(0),
          )
          .optional()?)
      })
      .await?;
    Ok(lyrics)
  }

  async fn update_song(&self, id: i64, patch: SongPatch) -> Result<Option<Song>> {
    let Some(stmt) = UpdateStatement::build(id, &patch) else {
      return self.get_song(id).await;
    };
    tracing::debug!(id, columns = ?stmt.columns(), "applying song patch");

    // The read shares the transaction so it observes the trigger-refreshed
    // updated_at, which RETURNING does not report.
    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let updated: Option<i64> = tx
          .query_row(
            stmt.sql(),
            rusqlite::params_from_iter(stmt.params()),
            |row| row.get(0),
          )
          .optional()?;
        let raw = match updated {
          Some(updated_id) => select_song(&tx, updated_id)?,
          None => None,
        };
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawSong::into_song).transpose()
  }

  async fn delete_song(&self, id: i64) -> Result<bool> {
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM songs WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;
    Ok(affected > 0)
  }
}

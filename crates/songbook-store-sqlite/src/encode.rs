//! Decoding helpers between SQLite column text and domain types.
//!
//! Release dates are stored as `YYYY-MM-DD`; timestamps as RFC 3339 UTC
//! strings produced by SQLite's `strftime`.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Row;
use songbook_core::song::{DATE_FORMAT, Song};

use crate::{Error, Result};

/// Column list matching [`RawSong::from_row`], in order.
pub const SONG_COLUMNS: &str =
  "id, group_name, song_name, release_date, lyrics, link, created_at, updated_at";

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::Decode(format!("release_date {s:?}: {e}")))
}

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(format!("timestamp {s:?}: {e}")))
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// A `songs` row as read from SQLite, before text columns are decoded.
pub struct RawSong {
  pub id:           i64,
  pub group_name:   String,
  pub song_name:    String,
  pub release_date: String,
  pub lyrics:       String,
  pub link:         String,
  pub created_at:   String,
  pub updated_at:   String,
}

impl RawSong {
  /// Read a row selected with [`SONG_COLUMNS`].
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      group_name:   row.get(1)?,
      song_name:    row.get(2)?,
      release_date: row.get(3)?,
      lyrics:       row.get(4)?,
      link:         row.get(5)?,
      created_at:   row.get(6)?,
      updated_at:   row.get(7)?,
    })
  }

  pub fn into_song(self) -> Result<Song> {
    Ok(Song {
      id:           self.id,
      group:        self.group_name,
      song:         self.song_name,
      release_date: decode_date(&self.release_date)?,
      lyrics:       self.lyrics,
      link:         self.link,
      created_at:   decode_dt(&self.created_at)?,
      updated_at:   decode_dt(&self.updated_at)?,
    })
  }
}

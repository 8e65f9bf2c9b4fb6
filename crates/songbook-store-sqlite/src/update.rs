//! Typed builder for the partial-update statement.
//!
//! Each supplied [`SongPatch`] field maps to a [`SongColumn`] and a bound
//! positional parameter. Column names are compile-time constants, so no
//! request text is ever spliced into the SQL.

use rusqlite::types::Value;
use songbook_core::song::SongPatch;

use crate::encode::encode_date;

/// A client-writable column of the `songs` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SongColumn {
  GroupName,
  SongName,
  ReleaseDate,
  Lyrics,
  Link,
}

impl SongColumn {
  pub fn name(self) -> &'static str {
    match self {
      Self::GroupName => "group_name",
      Self::SongName => "song_name",
      Self::ReleaseDate => "release_date",
      Self::Lyrics => "lyrics",
      Self::Link => "link",
    }
  }
}

/// An `UPDATE songs ... WHERE id = ?N RETURNING id` statement with its
/// parameters in binding order.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
  columns: Vec<SongColumn>,
  sql:     String,
  params:  Vec<Value>,
}

impl UpdateStatement {
  /// Build the statement for `patch` against song `id`.
  ///
  /// Fields are assigned in the fixed order group, song, release date,
  /// lyrics, link. Returns `None` when the patch supplies nothing.
  pub fn build(id: i64, patch: &SongPatch) -> Option<Self> {
    let assignments: Vec<(SongColumn, Value)> = [
      patch
        .group
        .clone()
        .map(|v| (SongColumn::GroupName, Value::Text(v))),
      patch
        .song
        .clone()
        .map(|v| (SongColumn::SongName, Value::Text(v))),
      patch
        .release_date
        .map(|d| (SongColumn::ReleaseDate, Value::Text(encode_date(d)))),
      patch
        .lyrics
        .clone()
        .map(|v| (SongColumn::Lyrics, Value::Text(v))),
      patch
        .link
        .clone()
        .map(|v| (SongColumn::Link, Value::Text(v))),
    ]
    .into_iter()
    .flatten()
    .collect();

    if assignments.is_empty() {
      return None;
    }

    let set_clause = assignments
      .iter()
      .enumerate()
      .map(|(i, (column, _))| format!("{} = ?{}", column.name(), i + 1))
      .collect::<Vec<_>>()
      .join(", ");
    let id_param = assignments.len() + 1;
    let sql = format!("UPDATE songs SET {set_clause} WHERE id = ?{id_param} RETURNING id");

    let (columns, mut params): (Vec<_>, Vec<_>) = assignments.into_iter().unzip();
    params.push(Value::Integer(id));

    Some(Self { columns, sql, params })
  }

  pub fn sql(&self) -> &str { &self.sql }

  /// Bound values; the final entry is the song id.
  pub fn params(&self) -> &[Value] { &self.params }

  /// Columns written by this statement, in assignment order.
  pub fn columns(&self) -> &[SongColumn] { &self.columns }
}

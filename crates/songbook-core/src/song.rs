//! Song records and the payloads that create and patch them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Calendar format used for release dates on the wire and in storage.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` release date.
pub fn parse_release_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|_| Error::InvalidReleaseDate(s.to_owned()))
}

/// A persisted song row.
///
/// `id`, `created_at` and `updated_at` are assigned by the store and never
/// accepted from clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
  pub id:           i64,
  pub group:        String,
  pub song:         String,
  pub release_date: NaiveDate,
  pub lyrics:       String,
  pub link:         String,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   DateTime<Utc>,
}

/// Enrichment data attached to a song when it is first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongDetails {
  pub release_date: NaiveDate,
  pub lyrics:       String,
  pub link:         String,
}

/// Fully-populated insert payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSong {
  pub group:        String,
  pub song:         String,
  pub release_date: NaiveDate,
  pub lyrics:       String,
  pub link:         String,
}

impl NewSong {
  pub fn new(group: &str, song: &str, details: SongDetails) -> Self {
    Self {
      group:        group.to_owned(),
      song:         song.to_owned(),
      release_date: details.release_date,
      lyrics:       details.lyrics,
      link:         details.link,
    }
  }
}

/// Trim the group and song names of a create request, rejecting blanks.
pub fn normalize_names<'a>(group: &'a str, song: &'a str) -> Result<(&'a str, &'a str)> {
  let group = group.trim();
  let song = song.trim();
  if group.is_empty() {
    return Err(Error::EmptyField("group"));
  }
  if song.is_empty() {
    return Err(Error::EmptyField("song"));
  }
  Ok((group, song))
}

// ─── Partial updates ─────────────────────────────────────────────────────────

/// Body of `PUT /songs/{id}`: every field is optional and an absent field
/// leaves the stored column untouched.
///
/// An explicit JSON `null` deserialises to `None` and is treated as absent;
/// no column can be cleared to NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongUpdateRequest {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub group:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub song:         Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub release_date: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub lyrics:       Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub link:         Option<String>,
}

impl SongUpdateRequest {
  /// Validate the request into a typed [`SongPatch`].
  pub fn into_patch(self) -> Result<SongPatch> {
    let release_date = self
      .release_date
      .as_deref()
      .map(parse_release_date)
      .transpose()?;

    Ok(SongPatch {
      group: self.group,
      song: self.song,
      release_date,
      lyrics: self.lyrics,
      link: self.link,
    })
  }
}

/// A validated sparse update. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongPatch {
  pub group:        Option<String>,
  pub song:         Option<String>,
  pub release_date: Option<NaiveDate>,
  pub lyrics:       Option<String>,
  pub link:         Option<String>,
}

impl SongPatch {
  pub fn is_empty(&self) -> bool {
    self.group.is_none()
      && self.song.is_none()
      && self.release_date.is_none()
      && self.lyrics.is_none()
      && self.link.is_none()
  }
}

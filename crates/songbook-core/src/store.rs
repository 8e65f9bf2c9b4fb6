//! The `SongStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `songbook-store-sqlite`).
//! The API layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  page::Page,
  song::{NewSong, Song, SongPatch},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Exact-match filters for [`SongStore::list_songs`].
///
/// `None` matches every row. Build with [`SongFilter::new`] to have empty
/// strings treated as wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
  pub group:     Option<String>,
  pub song_name: Option<String>,
}

impl SongFilter {
  pub fn new(group: Option<String>, song_name: Option<String>) -> Self {
    Self {
      group:     group.filter(|g| !g.is_empty()),
      song_name: song_name.filter(|s| !s.is_empty()),
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a song catalog backend.
///
/// Absence is reported in-band (`None` / `false`) so callers decide how a
/// missing row surfaces; `Self::Error` is reserved for backend failures.
pub trait SongStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert a song and return it with its store-assigned id and timestamps.
  fn add_song(
    &self,
    song: NewSong,
  ) -> impl Future<Output = Result<Song, Self::Error>> + Send + '_;

  /// Retrieve a song by id. Returns `None` if not found.
  fn get_song(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Song>, Self::Error>> + Send + '_;

  /// List songs matching `filter`, ordered by id, restricted to `page`.
  fn list_songs(
    &self,
    filter: SongFilter,
    page: Page,
  ) -> impl Future<Output = Result<Vec<Song>, Self::Error>> + Send + '_;

  /// Fetch only the lyrics of a song. Returns `None` if not found.
  fn lyrics(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + '_;

  /// Apply a sparse patch and return the updated row.
  ///
  /// An empty patch issues no write and returns the current row. Returns
  /// `None` if the song does not exist.
  fn update_song(
    &self,
    id: i64,
    patch: SongPatch,
  ) -> impl Future<Output = Result<Option<Song>, Self::Error>> + Send + '_;

  /// Delete a song. Returns `false` if no row had that id.
  fn delete_song(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

//! Song enrichment: where a new song's release date, lyrics and link come
//! from.
//!
//! The only shipped provider is [`PlaceholderDetails`]. A real metadata
//! lookup plugs in by implementing [`SongDetailsProvider`].

use std::future::Future;

use chrono::Utc;

use crate::{Result, song::SongDetails};

/// Supplies the metadata stored alongside a newly-added song.
pub trait SongDetailsProvider: Send + Sync {
  /// Look up details for `song` by `group`. Both names are already trimmed
  /// and non-empty.
  fn details(
    &self,
    group: &str,
    song: &str,
  ) -> impl Future<Output = Result<SongDetails>> + Send;
}

/// Generates local stand-in details without any external call.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderDetails;

impl SongDetailsProvider for PlaceholderDetails {
  async fn details(&self, group: &str, song: &str) -> Result<SongDetails> {
    Ok(SongDetails {
      release_date: Utc::now().date_naive(),
      lyrics:       format!("Lyrics placeholder for {song}"),
      link:         format!("https://example.com/{group}/{song}"),
    })
  }
}

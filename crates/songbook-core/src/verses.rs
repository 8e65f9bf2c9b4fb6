//! Verse splitting and pagination over a lyrics blob.
//!
//! A verse is a segment of the lyrics separated from its neighbours by a
//! blank line (two consecutive `\n`).

use crate::page::Page;

pub const VERSE_DELIMITER: &str = "\n\n";

/// Split `lyrics` into verses. Empty lyrics yield a single empty verse.
pub fn split(lyrics: &str) -> Vec<&str> { lyrics.split(VERSE_DELIMITER).collect() }

/// Return the verses on `page`.
///
/// A page starting past the last verse is empty rather than an error; a
/// partially-filled final page is truncated to the remaining verses.
pub fn paginate(lyrics: &str, page: Page) -> Vec<String> {
  let verses = split(lyrics);
  let Ok(start) = usize::try_from(page.offset()) else {
    return Vec::new();
  };
  if start > verses.len() {
    return Vec::new();
  }
  let end = start.saturating_add(page.limit() as usize).min(verses.len());

  verses[start..end].iter().map(|v| (*v).to_owned()).collect()
}

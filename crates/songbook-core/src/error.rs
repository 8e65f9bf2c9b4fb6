//! Error types for `songbook-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid release date {0:?}: expected YYYY-MM-DD")]
  InvalidReleaseDate(String),

  #[error("{0} must not be empty")]
  EmptyField(&'static str),

  #[error("song details unavailable: {0}")]
  Details(String),
}

impl Error {
  /// Whether the error was caused by the caller's input rather than by a
  /// collaborator failing.
  pub fn is_validation(&self) -> bool {
    matches!(self, Self::InvalidReleaseDate(_) | Self::EmptyField(_))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

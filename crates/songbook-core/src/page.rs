//! Page/limit pair shared by song listing and verse pagination.

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// A 1-based page request with an already-clamped limit.
///
/// Construct via [`Page::clamped`] so the invariants `page >= 1` and
/// `1 <= limit <= MAX_LIMIT` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
  page:  u32,
  limit: u32,
}

impl Default for Page {
  fn default() -> Self { Self { page: DEFAULT_PAGE, limit: DEFAULT_LIMIT } }
}

impl Page {
  /// Apply defaults and bounds to raw query values.
  ///
  /// A missing page defaults to 1 and anything below 1 becomes 1. A missing
  /// limit defaults to 10; supplied limits are clamped into `[1, 100]`.
  pub fn clamped(page: Option<i64>, limit: Option<i64>) -> Self {
    let page = page
      .unwrap_or(i64::from(DEFAULT_PAGE))
      .clamp(1, i64::from(u32::MAX)) as u32;
    let limit = limit
      .unwrap_or(i64::from(DEFAULT_LIMIT))
      .clamp(1, i64::from(MAX_LIMIT)) as u32;
    Self { page, limit }
  }

  pub fn page(&self) -> u32 { self.page }

  pub fn limit(&self) -> u32 { self.limit }

  /// Number of items preceding this page: `(page - 1) * limit`.
  pub fn offset(&self) -> u64 { u64::from(self.page - 1) * u64::from(self.limit) }
}

//! SQLite backend for the Songbook catalog.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod encode;
mod schema;
mod store;

pub mod error;
pub mod update;

pub use error::{Error, Result};
pub use store::SqliteStore;

//! Core types and trait definitions for the Songbook catalog.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store and API crates depend on it; it depends on neither.

pub mod details;
pub mod error;
pub mod page;
pub mod song;
pub mod store;
pub mod verses;

pub use error::{Error, Result};

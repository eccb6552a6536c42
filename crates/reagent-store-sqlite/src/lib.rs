//! SQLite backend for the Reagent record store.
//!
//! Mirrors a browser's local key-value storage: a single `kv_store` table
//! whose `chemicals` entry holds the JSON-encoded record list. Wraps
//! [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{DEFAULT_KEY, SqliteStore};

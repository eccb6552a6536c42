//! [`SqliteStore`]: the SQLite implementation of [`RecordStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use reagent_core::{chemical::ChemicalRecord, store::RecordStore};

use crate::{
  Error, Result,
  encode::{decode_records, encode_dt, encode_records},
  schema::SCHEMA,
};

/// Key of the entry holding the record list.
pub const DEFAULT_KEY: &str = "chemicals";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A key-value store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
  key:  String,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn, key: DEFAULT_KEY.to_owned() };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mainly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, key: DEFAULT_KEY.to_owned() };
    store.init_schema().await?;
    Ok(store)
  }

  /// Store records under `key` instead of [`DEFAULT_KEY`]. The connection
  /// is shared with `self`.
  pub fn with_key(&self, key: impl Into<String>) -> Self {
    Self { conn: self.conn.clone(), key: key.into() }
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Read the raw value under `key`.
  pub async fn get_raw(&self, key: &str) -> Result<Option<String>> {
    let key = key.to_owned();
    let value = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT value FROM kv_store WHERE key = ?1",
              rusqlite::params![key],
              |row| row.get::<_, String>(0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(value)
  }

  /// Insert or replace the raw value under `key`.
  pub async fn put_raw(&self, key: &str, value: String) -> Result<()> {
    let key = key.to_owned();
    let at_str = encode_dt(Utc::now());
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
           ON CONFLICT(key) DO UPDATE SET
             value      = excluded.value,
             updated_at = excluded.updated_at",
          rusqlite::params![key, value, at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  async fn load_records(&self) -> Result<Option<Vec<ChemicalRecord>>> {
    match self.get_raw(&self.key).await? {
      Some(raw) => decode_records(&self.key, &raw).map(Some),
      None => Ok(None),
    }
  }

  async fn save_records(&self, records: &[ChemicalRecord]) -> Result<()> {
    let encoded = encode_records(records)?;
    self.put_raw(&self.key, encoded).await
  }
}

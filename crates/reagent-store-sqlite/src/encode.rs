//! Encoding helpers between domain types and the text stored in SQLite.
//!
//! Record lists are stored as a compact JSON array in the camelCase layout of
//! [`ChemicalRecord`]. Timestamps are RFC 3339 strings.

use chrono::{DateTime, Utc};
use reagent_core::chemical::ChemicalRecord;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

// ─── Record lists ────────────────────────────────────────────────────────────

pub fn encode_records(records: &[ChemicalRecord]) -> Result<String> {
  Ok(serde_json::to_string(records)?)
}

pub fn decode_records(key: &str, raw: &str) -> Result<Vec<ChemicalRecord>> {
  serde_json::from_str(raw).map_err(|source| Error::Corrupt {
    key: key.to_owned(),
    source,
  })
}

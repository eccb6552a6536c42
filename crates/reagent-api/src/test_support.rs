//! In-process store and fixtures shared by this crate's tests.
//!
//! `MemoryStore` never leaves the calling task, so tests that pause the tokio
//! clock are not disturbed by a background database thread.

use std::sync::{
  Mutex,
  atomic::{AtomicBool, Ordering},
};

use chrono::NaiveDate;
use reagent_core::{chemical::ChemicalRecord, store::RecordStore};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
#[error("{0}")]
pub struct MemoryError(&'static str);

#[derive(Debug, Default)]
pub struct MemoryStore {
  records:        Mutex<Option<Vec<ChemicalRecord>>>,
  corrupt:        bool,
  pub fail_saves: AtomicBool,
}

impl MemoryStore {
  pub fn with_records(records: Vec<ChemicalRecord>) -> Self {
    Self {
      records: Mutex::new(Some(records)),
      ..Self::default()
    }
  }

  /// A store whose stored value cannot be decoded.
  pub fn corrupt() -> Self {
    Self {
      corrupt: true,
      ..Self::default()
    }
  }

  /// The last successfully saved snapshot.
  pub fn stored(&self) -> Option<Vec<ChemicalRecord>> { self.records.lock().unwrap().clone() }
}

impl RecordStore for MemoryStore {
  type Error = MemoryError;

  async fn load_records(&self) -> Result<Option<Vec<ChemicalRecord>>, MemoryError> {
    if self.corrupt {
      return Err(MemoryError("corrupt snapshot"));
    }
    Ok(self.stored())
  }

  async fn save_records(&self, records: &[ChemicalRecord]) -> Result<(), MemoryError> {
    if self.fail_saves.load(Ordering::SeqCst) {
      return Err(MemoryError("disk full"));
    }
    *self.records.lock().unwrap() = Some(records.to_vec());
    Ok(())
  }
}

/// 1000 mL with a 20% threshold (200 mL), using 50 mL per tick.
pub fn depleting(current: f64) -> ChemicalRecord {
  ChemicalRecord {
    id:                   Uuid::new_v4(),
    name:                 "Distilled water".into(),
    initial_quantity:     1000.0,
    current_quantity:     current,
    unit:                 "mL".into(),
    entry_date:           NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    expiry_date:          NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
    daily_usage:          50.0,
    warning_threshold:    20.0,
    notification_channel: Some("https://hooks.example/lab".into()),
  }
}

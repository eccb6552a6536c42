//! The `RecordStore` trait.
//!
//! Implemented by storage backends (e.g. `reagent-store-sqlite`). The API
//! layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::chemical::ChemicalRecord;

/// Persistence for the record snapshot: one named entry holding the whole
/// list.
///
/// All methods return `Send` futures so the trait can be used from a
/// multi-threaded tokio runtime.
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the stored snapshot.
  ///
  /// Returns `Ok(None)` when nothing has been stored yet, and an error when a
  /// stored value exists but cannot be decoded.
  fn load_records(
    &self,
  ) -> impl Future<Output = Result<Option<Vec<ChemicalRecord>>, Self::Error>> + Send + '_;

  /// Replace the stored snapshot with `records`.
  fn save_records<'a>(
    &'a self,
    records: &'a [ChemicalRecord],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

//! Chemical records: the unit of stock tracked by the inventory.
//!
//! A record carries its own consumption rate and warning threshold. Status is
//! never stored; it is derived from the quantities on every read.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::status::AlertStatus;

// ─── ChemicalRecord ──────────────────────────────────────────────────────────

/// One stocked chemical. Field names serialise in camelCase; this is also the
/// persisted layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChemicalRecord {
  /// Assigned at creation and never reused.
  pub id:                   Uuid,
  pub name:                 String,
  /// Baseline the warning threshold is measured against.
  pub initial_quantity:     f64,
  /// Remaining amount; never negative.
  pub current_quantity:     f64,
  /// Display unit, e.g. `mL` or `g`.
  pub unit:                 String,
  pub entry_date:           NaiveDate,
  pub expiry_date:          NaiveDate,
  /// Amount consumed per simulated tick.
  pub daily_usage:          f64,
  /// Percentage (0 to 100) of `initial_quantity` at or below which the record
  /// is in warning.
  pub warning_threshold:    f64,
  /// Webhook link shown alongside notifications. Stored only; never called.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notification_channel: Option<String>,
}

impl ChemicalRecord {
  /// The absolute quantity at or below which the record is in warning.
  pub fn threshold_quantity(&self) -> f64 {
    self.initial_quantity * self.warning_threshold / 100.0
  }

  pub fn status(&self) -> AlertStatus { AlertStatus::of(self) }
}

// ─── NewChemical ─────────────────────────────────────────────────────────────

/// Input to [`crate::inventory::Inventory::add`].
///
/// There is no `id` or `current_quantity`: the inventory assigns a fresh id
/// and starts the record full.
#[derive(Debug, Clone, PartialEq)]
pub struct NewChemical {
  pub name:                 String,
  pub initial_quantity:     f64,
  pub unit:                 String,
  pub entry_date:           NaiveDate,
  pub expiry_date:          NaiveDate,
  pub daily_usage:          f64,
  pub warning_threshold:    f64,
  pub notification_channel: Option<String>,
}

impl NewChemical {
  /// Materialise the record with the given id, full to its initial quantity.
  pub fn into_record(self, id: Uuid) -> ChemicalRecord {
    ChemicalRecord {
      id,
      name: self.name,
      initial_quantity: self.initial_quantity,
      current_quantity: self.initial_quantity,
      unit: self.unit,
      entry_date: self.entry_date,
      expiry_date: self.expiry_date,
      daily_usage: self.daily_usage,
      warning_threshold: self.warning_threshold,
      notification_channel: self.notification_channel,
    }
  }
}

/// Normalise an optional channel: blank strings mean "no channel".
pub fn normalize_channel(channel: Option<String>) -> Option<String> {
  channel
    .map(|c| c.trim().to_owned())
    .filter(|c| !c.is_empty())
}

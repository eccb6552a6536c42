//! [`Inventory`]: the single owner of all mutable inventory state.
//!
//! Records, warning state and the notification queue live together so that a
//! tick and its warnings are applied as one step. Callers serialise access to
//! an `Inventory` (the API layer holds it behind a mutex) and persist
//! [`Inventory::records`] after each mutation.

use serde::Serialize;
use uuid::Uuid;

use crate::{
  Error, Result,
  chemical::{ChemicalRecord, NewChemical},
  notification::{NotificationEntry, NotificationQueue},
  simulator,
  warning::WarningTracker,
};

/// Outcome of one simulated tick.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickReport {
  /// Records whose quantity went down.
  pub consumed:      usize,
  /// Notifications enqueued by this tick, in order.
  pub notifications: Vec<NotificationEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct Inventory {
  records:       Vec<ChemicalRecord>,
  warnings:      WarningTracker,
  notifications: NotificationQueue,
}

impl Inventory {
  /// Start from a loaded snapshot. Warning state and notifications are
  /// process-local and start empty.
  pub fn new(records: Vec<ChemicalRecord>) -> Self {
    let records = records.into_iter().map(clamped).collect();
    Self {
      records,
      warnings: WarningTracker::new(),
      notifications: NotificationQueue::new(),
    }
  }

  // ── Records ────────────────────────────────────────────────────────────

  pub fn records(&self) -> &[ChemicalRecord] { &self.records }

  pub fn get(&self, id: Uuid) -> Option<&ChemicalRecord> {
    self.records.iter().find(|r| r.id == id)
  }

  /// Add a record with a fresh id, full to its initial quantity. New records
  /// go to the front of the list.
  pub fn add(&mut self, input: NewChemical) -> ChemicalRecord {
    let mut id = Uuid::new_v4();
    while self.get(id).is_some() {
      id = Uuid::new_v4();
    }
    let record = clamped(input.into_record(id));
    self.records.insert(0, record.clone());
    record
  }

  /// Replace the record with the same id. A restock above the threshold
  /// re-arms its warning; an edit never emits one.
  pub fn update(&mut self, record: ChemicalRecord) -> Result<ChemicalRecord> {
    let record = clamped(record);
    let slot = self
      .records
      .iter_mut()
      .find(|r| r.id == record.id)
      .ok_or(Error::ChemicalNotFound(record.id))?;
    *slot = record.clone();
    self.warnings.rearm(&record);
    Ok(record)
  }

  pub fn remove(&mut self, id: Uuid) -> Result<ChemicalRecord> {
    let index = self
      .records
      .iter()
      .position(|r| r.id == id)
      .ok_or(Error::ChemicalNotFound(id))?;
    self.warnings.forget(id);
    Ok(self.records.remove(index))
  }

  // ── Simulation ─────────────────────────────────────────────────────────

  /// Consume one tick of usage, then raise warnings on the updated records.
  pub fn tick(&mut self) -> TickReport {
    let consumed = simulator::tick(&mut self.records);
    let notifications = self
      .warnings
      .evaluate(&self.records)
      .into_iter()
      .map(|draft| self.notifications.enqueue(draft).clone())
      .collect();
    TickReport { consumed, notifications }
  }

  pub fn is_warned(&self, id: Uuid) -> bool { self.warnings.is_warned(id) }

  // ── Notifications ──────────────────────────────────────────────────────

  pub fn notifications(&self) -> &[NotificationEntry] { self.notifications.entries() }

  /// Returns `false` when no entry had that id.
  pub fn dismiss(&mut self, id: u64) -> bool { self.notifications.dismiss(id) }
}

/// Quantities are never negative; `f64::max` also maps NaN to zero.
fn clamped(mut record: ChemicalRecord) -> ChemicalRecord {
  record.current_quantity = record.current_quantity.max(0.0);
  record.initial_quantity = record.initial_quantity.max(0.0);
  record
}

//! Low-stock warnings with one notification per depletion episode.
//!
//! An episode starts when a record first drops to or below its threshold
//! quantity while still holding stock, and ends when the record is restored
//! strictly above the threshold. Reaching zero inside an episode does not
//! notify again.

use std::collections::HashSet;

use uuid::Uuid;

use crate::{chemical::ChemicalRecord, notification::NotificationDraft};

pub const LOW_STOCK_TITLE: &str = "Low stock warning";

/// Ids of records already warned in their current episode.
#[derive(Debug, Clone, Default)]
pub struct WarningTracker {
  warned: HashSet<Uuid>,
}

impl WarningTracker {
  pub fn new() -> Self { Self::default() }

  /// Evaluate `records` after a tick and return the notifications to emit.
  pub fn evaluate(&mut self, records: &[ChemicalRecord]) -> Vec<NotificationDraft> {
    let mut drafts = Vec::new();
    for record in records {
      let threshold = record.threshold_quantity();
      let quantity = record.current_quantity;

      if quantity > 0.0 && quantity <= threshold {
        if self.warned.insert(record.id) {
          drafts.push(low_stock(record));
        }
      } else if quantity > threshold {
        self.warned.remove(&record.id);
      }
    }
    drafts
  }

  /// Re-arm `record` if it is back above its threshold. Never emits.
  pub fn rearm(&mut self, record: &ChemicalRecord) {
    if record.current_quantity > record.threshold_quantity() {
      self.warned.remove(&record.id);
    }
  }

  /// Drop all state for a deleted record.
  pub fn forget(&mut self, id: Uuid) { self.warned.remove(&id); }

  pub fn is_warned(&self, id: Uuid) -> bool { self.warned.contains(&id) }
}

fn low_stock(record: &ChemicalRecord) -> NotificationDraft {
  NotificationDraft {
    title:   LOW_STOCK_TITLE.to_owned(),
    message: format!(
      "'{}' is below its warning threshold ({}%). Remaining quantity: {:.2} {}.",
      record.name, record.warning_threshold, record.current_quantity, record.unit,
    ),
    channel: record.notification_channel.clone(),
  }
}

//! Filtering and sorting of a record snapshot for display and export.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::chemical::ChemicalRecord;

/// Column to sort by. `Status` sorts by severity.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SortKey {
  Id,
  #[default]
  Name,
  InitialQuantity,
  CurrentQuantity,
  Unit,
  EntryDate,
  ExpiryDate,
  DailyUsage,
  WarningThreshold,
  NotificationChannel,
  Status,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
  #[default]
  Asc,
  Desc,
}

impl SortOrder {
  pub fn toggle(self) -> Self {
    match self {
      Self::Asc => Self::Desc,
      Self::Desc => Self::Asc,
    }
  }
}

/// Parameters for [`InventoryQuery::apply`].
#[derive(Debug, Clone, Default)]
pub struct InventoryQuery {
  /// Case-insensitive substring filter on the name.
  pub search:          Option<String>,
  /// Keep records expiring on or before this date.
  pub expiring_before: Option<NaiveDate>,
  pub sort_key:        SortKey,
  pub sort_order:      SortOrder,
}

impl InventoryQuery {
  /// Clicking a column header: the same key flips the order, a new key
  /// starts ascending.
  pub fn sort_by(&mut self, key: SortKey) {
    if self.sort_key == key {
      self.sort_order = self.sort_order.toggle();
    } else {
      self.sort_key = key;
      self.sort_order = SortOrder::Asc;
    }
  }

  pub fn matches(&self, record: &ChemicalRecord) -> bool {
    let name_ok = match self.search.as_deref().map(str::trim) {
      Some(term) if !term.is_empty() => {
        record.name.to_lowercase().contains(&term.to_lowercase())
      }
      _ => true,
    };
    let expiry_ok = self
      .expiring_before
      .is_none_or(|cutoff| record.expiry_date <= cutoff);
    name_ok && expiry_ok
  }

  /// Filter and sort a copy of `records`. The sort is stable.
  pub fn apply(&self, records: &[ChemicalRecord]) -> Vec<ChemicalRecord> {
    let mut out: Vec<ChemicalRecord> =
      records.iter().filter(|r| self.matches(r)).cloned().collect();
    out.sort_by(|a, b| {
      let ordering = compare(self.sort_key, a, b);
      match self.sort_order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
      }
    });
    out
  }
}

fn compare(key: SortKey, a: &ChemicalRecord, b: &ChemicalRecord) -> Ordering {
  match key {
    SortKey::Id => a.id.cmp(&b.id),
    SortKey::Name => compare_text(&a.name, &b.name),
    SortKey::InitialQuantity => a.initial_quantity.total_cmp(&b.initial_quantity),
    SortKey::CurrentQuantity => a.current_quantity.total_cmp(&b.current_quantity),
    SortKey::Unit => compare_text(&a.unit, &b.unit),
    SortKey::EntryDate => a.entry_date.cmp(&b.entry_date),
    SortKey::ExpiryDate => a.expiry_date.cmp(&b.expiry_date),
    SortKey::DailyUsage => a.daily_usage.total_cmp(&b.daily_usage),
    SortKey::WarningThreshold => a.warning_threshold.total_cmp(&b.warning_threshold),
    SortKey::NotificationChannel => compare_text(
      a.notification_channel.as_deref().unwrap_or_default(),
      b.notification_channel.as_deref().unwrap_or_default(),
    ),
    SortKey::Status => a.status().cmp(&b.status()),
  }
}

/// Case-insensitive, falling back to byte order to stay total.
fn compare_text(a: &str, b: &str) -> Ordering {
  a.to_lowercase()
    .cmp(&b.to_lowercase())
    .then_with(|| a.cmp(b))
}

//! Derived stock status.

use serde::{Deserialize, Serialize};

use crate::chemical::ChemicalRecord;

/// Stock status computed from a record's quantities; never stored.
///
/// Variants are declared in severity order, so the derived `Ord` sorts
/// sufficient stock first and empty stock last.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertStatus {
  Sufficient,
  Warning,
  Empty,
}

impl AlertStatus {
  pub fn of(record: &ChemicalRecord) -> Self {
    if record.current_quantity <= 0.0 {
      Self::Empty
    } else if record.current_quantity <= record.threshold_quantity() {
      Self::Warning
    } else {
      Self::Sufficient
    }
  }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr as _;

  use super::*;
  use crate::chemical::fixtures::record;

  #[test]
  fn empty_at_zero() {
    assert_eq!(record("x", 1000.0, 0.0).status(), AlertStatus::Empty);
  }

  #[test]
  fn warning_at_threshold_inclusive() {
    assert_eq!(record("x", 1000.0, 200.0).status(), AlertStatus::Warning);
    assert_eq!(record("x", 1000.0, 150.0).status(), AlertStatus::Warning);
  }

  #[test]
  fn sufficient_above_threshold() {
    assert_eq!(record("x", 1000.0, 200.5).status(), AlertStatus::Sufficient);
  }

  #[test]
  fn zero_threshold_goes_straight_to_empty() {
    let mut r = record("x", 1000.0, 1.0);
    r.warning_threshold = 0.0;
    assert_eq!(r.status(), AlertStatus::Sufficient);
    r.current_quantity = 0.0;
    assert_eq!(r.status(), AlertStatus::Empty);
  }

  #[test]
  fn severity_order() {
    assert!(AlertStatus::Sufficient < AlertStatus::Warning);
    assert!(AlertStatus::Warning < AlertStatus::Empty);
  }

  #[test]
  fn display_and_parse() {
    assert_eq!(AlertStatus::Warning.to_string(), "WARNING");
    assert_eq!(AlertStatus::from_str("EMPTY").unwrap(), AlertStatus::Empty);
  }
}

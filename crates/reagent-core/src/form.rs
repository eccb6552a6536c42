//! Add/edit input with lenient numeric coercion.
//!
//! Operators type quantities by hand. Numeric fields accept JSON numbers or
//! strings; anything that does not parse as a finite, non-negative number
//! becomes `0` instead of failing the request.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::chemical::{ChemicalRecord, NewChemical, normalize_channel};

/// Upper bound for `warning_threshold`, a percentage.
pub const MAX_WARNING_THRESHOLD: f64 = 100.0;

/// Body of an add or edit request.
///
/// Unknown fields (including any `id`) are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChemicalForm {
  #[serde(default)]
  pub name:                 String,
  #[serde(default, deserialize_with = "lenient_quantity")]
  pub initial_quantity:     f64,
  /// Only honoured on edit; add always starts full.
  #[serde(default, deserialize_with = "lenient_optional_quantity")]
  pub current_quantity:     Option<f64>,
  #[serde(default)]
  pub unit:                 String,
  /// Defaults to today when absent.
  #[serde(default)]
  pub entry_date:           Option<NaiveDate>,
  pub expiry_date:          NaiveDate,
  #[serde(default, deserialize_with = "lenient_quantity")]
  pub daily_usage:          f64,
  #[serde(default, deserialize_with = "lenient_quantity")]
  pub warning_threshold:    f64,
  #[serde(default)]
  pub notification_channel: Option<String>,
}

impl ChemicalForm {
  /// Build the input for a new record. `current_quantity` is discarded.
  pub fn into_new(self) -> NewChemical {
    NewChemical {
      name:                 self.name.trim().to_owned(),
      initial_quantity:     self.initial_quantity,
      unit:                 self.unit.trim().to_owned(),
      entry_date:           self.entry_date.unwrap_or_else(today),
      expiry_date:          self.expiry_date,
      daily_usage:          self.daily_usage,
      warning_threshold:    self.warning_threshold.min(MAX_WARNING_THRESHOLD),
      notification_channel: normalize_channel(self.notification_channel),
    }
  }

  /// Build the replacement for `existing`, keeping its id and, when the form
  /// omits it, its current quantity.
  pub fn into_record(self, existing: &ChemicalRecord) -> ChemicalRecord {
    let current_quantity = self.current_quantity.unwrap_or(existing.current_quantity);
    let new = self.into_new();
    ChemicalRecord {
      current_quantity,
      ..new.into_record(existing.id)
    }
  }
}

fn today() -> NaiveDate { Utc::now().date_naive() }

/// Coerce loosely-typed input to a finite, non-negative quantity.
pub fn coerce_quantity(value: &Value) -> f64 {
  let n = match value {
    Value::Number(n) => n.as_f64().unwrap_or(0.0),
    Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
    _ => 0.0,
  };
  if n.is_finite() && n > 0.0 { n } else { 0.0 }
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Value::deserialize(deserializer)?;
  Ok(coerce_quantity(&value))
}

fn lenient_optional_quantity<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Value::deserialize(deserializer)?;
  Ok(match value {
    Value::Null => None,
    other => Some(coerce_quantity(&other)),
  })
}

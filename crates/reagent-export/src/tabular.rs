//! CSV serialiser for record lists.
//!
//! Fields are quoted only when they contain a delimiter, quote or line break.
//! Every line, including the last, ends with `\n`.

use csv::{QuoteStyle, Terminator, WriterBuilder};
use reagent_core::chemical::ChemicalRecord;

use crate::error::Result;

/// Suggested download filename.
pub const CSV_FILENAME: &str = "chemical_inventory.csv";

pub const CSV_HEADERS: [&str; 10] = [
  "ID",
  "Name",
  "Initial quantity",
  "Current quantity",
  "Unit",
  "Entry date",
  "Expiry date",
  "Daily usage",
  "Warning threshold (%)",
  "Notification channel",
];

/// Serialise `records` with a header row.
pub fn to_csv(records: &[ChemicalRecord]) -> Result<String> {
  let mut writer = WriterBuilder::new()
    .quote_style(QuoteStyle::Necessary)
    .terminator(Terminator::Any(b'\n'))
    .from_writer(Vec::new());

  writer.write_record(CSV_HEADERS)?;
  for record in records {
    writer.write_record(row(record))?;
  }

  let bytes = writer.into_inner().map_err(|e| e.into_error())?;
  Ok(String::from_utf8(bytes)?)
}

fn row(r: &ChemicalRecord) -> [String; 10] {
  [
    r.id.to_string(),
    r.name.clone(),
    r.initial_quantity.to_string(),
    r.current_quantity.to_string(),
    r.unit.clone(),
    r.entry_date.to_string(),
    r.expiry_date.to_string(),
    r.daily_usage.to_string(),
    r.warning_threshold.to_string(),
    r.notification_channel.clone().unwrap_or_default(),
  ]
}

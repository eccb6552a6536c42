//! Usage simulation: one tick stands in for one day of consumption.

use crate::chemical::ChemicalRecord;

/// The quantity `record` will hold after one tick.
pub fn consume(record: &ChemicalRecord) -> f64 {
  if record.daily_usage > 0.0 && record.current_quantity > 0.0 {
    (record.current_quantity - record.daily_usage).max(0.0)
  } else {
    record.current_quantity
  }
}

/// Advance every record by one tick. Returns how many records changed.
///
/// Records with no usage, or already at zero, are left untouched.
pub fn tick(records: &mut [ChemicalRecord]) -> usize {
  let mut changed = 0;
  for record in records.iter_mut() {
    let next = consume(record);
    if next != record.current_quantity {
      record.current_quantity = next;
      changed += 1;
    }
  }
  changed
}

//! Operator role. A local flag, not authentication.

use serde::{Deserialize, Serialize};

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
  #[default]
  Admin,
  Staff,
}

impl Role {
  /// Only admins may add, edit or delete records.
  pub fn can_edit(self) -> bool { matches!(self, Self::Admin) }
}

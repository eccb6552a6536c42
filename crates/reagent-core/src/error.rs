//! Error types for `reagent-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("chemical not found: {0}")]
  ChemicalNotFound(Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

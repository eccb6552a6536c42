//! The informational lookup collaborator.
//!
//! Given a free-text prompt, a lookup returns a free-text explanation. It is
//! the only operation that suspends, and it never touches inventory state.

use std::future::Future;

use thiserror::Error;

/// Shown to the operator when a lookup fails, whatever the cause.
pub const LOOKUP_FAILED_MESSAGE: &str =
  "Could not get information from the lookup service. Check the API key and your connection.";

#[derive(Debug, Error)]
pub enum LookupError {
  /// No client is configured (e.g. missing API key).
  #[error("lookup service is not configured")]
  NotConfigured,

  #[error("lookup service unavailable: {0}")]
  Unavailable(String),
}

pub trait Lookup: Send + Sync {
  /// Answer `prompt`. No retries are attempted.
  fn explain(
    &self,
    prompt: String,
  ) -> impl Future<Output = Result<String, LookupError>> + Send + '_;
}

/// The prompt used for the per-chemical safety summary.
pub fn safety_prompt(chemical_name: &str) -> String {
  format!(
    "Provide a brief summary of safety and handling for {chemical_name} in a laboratory environment."
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn prompt_names_the_chemical() {
    let p = safety_prompt("Hydrochloric acid");
    assert!(p.contains("Hydrochloric acid"));
    assert!(p.contains("laboratory"));
  }
}

//! Caller role extraction.
//!
//! The role is a local operating mode sent by the client in the
//! `x-reagent-role` header. It gates mutations; it is not authentication.

use std::str::FromStr as _;

use axum::{extract::FromRequestParts, http::request::Parts};
use reagent_core::role::Role;

use crate::error::ApiError;

pub const ROLE_HEADER: &str = "x-reagent-role";

/// The caller's [`Role`]. Defaults to admin when the header is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerRole(pub Role);

impl CallerRole {
  /// Fail with 403 unless the caller may modify records.
  pub fn require_editor(self) -> Result<(), ApiError> {
    if self.0.can_edit() {
      Ok(())
    } else {
      Err(ApiError::Forbidden(format!("role '{}' cannot modify records", self.0)))
    }
  }
}

impl<S: Send + Sync> FromRequestParts<S> for CallerRole {
  type Rejection = ApiError;

  async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
    let Some(value) = parts.headers.get(ROLE_HEADER) else {
      return Ok(Self(Role::default()));
    };
    let raw = value
      .to_str()
      .map_err(|_| ApiError::BadRequest(format!("invalid {ROLE_HEADER} header")))?;
    Role::from_str(raw.trim())
      .map(Self)
      .map_err(|_| ApiError::BadRequest(format!("unknown role '{raw}'")))
  }
}

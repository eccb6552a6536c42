//! Handlers for `/chemicals` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/chemicals` | Optional `search`, `expiring_before`, `sort`, `order` |
//! | `POST`   | `/chemicals` | Admin only. Body: [`ChemicalForm`]; returns 201 + record |
//! | `GET`    | `/chemicals/{id}` | 404 if not found |
//! | `PUT`    | `/chemicals/{id}` | Admin only. Body: [`ChemicalForm`] |
//! | `DELETE` | `/chemicals/{id}` | Admin only. 204 |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use reagent_core::{
  chemical::ChemicalRecord,
  form::ChemicalForm,
  lookup::Lookup,
  query::{InventoryQuery, SortKey, SortOrder},
  status::AlertStatus,
  store::RecordStore,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::ApiError, role::CallerRole};

// ─── Views ────────────────────────────────────────────────────────────────────

/// A record as returned to clients, with its derived fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChemicalView {
  #[serde(flatten)]
  pub record:             ChemicalRecord,
  pub status:             AlertStatus,
  pub threshold_quantity: f64,
}

impl From<ChemicalRecord> for ChemicalView {
  fn from(record: ChemicalRecord) -> Self {
    Self {
      status: record.status(),
      threshold_quantity: record.threshold_quantity(),
      record,
    }
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// Filter and sort parameters shared by the list and export endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  /// Case-insensitive substring of the name.
  pub search:          Option<String>,
  /// `YYYY-MM-DD`; an empty value means no filter.
  pub expiring_before: Option<String>,
  pub sort:            Option<SortKey>,
  pub order:           Option<SortOrder>,
}

impl ListParams {
  pub fn into_query(self) -> Result<InventoryQuery, ApiError> {
    let expiring_before = match self.expiring_before.as_deref().map(str::trim) {
      None | Some("") => None,
      Some(raw) => Some(
        raw
          .parse::<NaiveDate>()
          .map_err(|_| ApiError::BadRequest(format!("invalid date '{raw}'")))?,
      ),
    };
    Ok(InventoryQuery {
      search: self.search.filter(|s| !s.trim().is_empty()),
      expiring_before,
      sort_key: self.sort.unwrap_or_default(),
      sort_order: self.order.unwrap_or_default(),
    })
  }
}

/// `GET /chemicals[?search=..][&expiring_before=..][&sort=..][&order=..]`
pub async fn list<S, L>(
  State(state): State<AppState<S, L>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<ChemicalView>>, ApiError>
where
  S: RecordStore + 'static,
  L: Lookup + 'static,
{
  let query = params.into_query()?;
  let records = state.inventory.query(&query).await;
  Ok(Json(records.into_iter().map(ChemicalView::from).collect()))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /chemicals`
pub async fn create<S, L>(
  State(state): State<AppState<S, L>>,
  role: CallerRole,
  Json(form): Json<ChemicalForm>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
  L: Lookup + 'static,
{
  role.require_editor()?;
  let record = state.inventory.add(form.into_new()).await;
  Ok((StatusCode::CREATED, Json(ChemicalView::from(record))))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /chemicals/{id}`
pub async fn get_one<S, L>(
  State(state): State<AppState<S, L>>,
  Path(id): Path<Uuid>,
) -> Result<Json<ChemicalView>, ApiError>
where
  S: RecordStore + 'static,
  L: Lookup + 'static,
{
  let record = state
    .inventory
    .get(id)
    .await
    .ok_or(reagent_core::Error::ChemicalNotFound(id))?;
  Ok(Json(record.into()))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /chemicals/{id}`
pub async fn update<S, L>(
  State(state): State<AppState<S, L>>,
  role: CallerRole,
  Path(id): Path<Uuid>,
  Json(form): Json<ChemicalForm>,
) -> Result<Json<ChemicalView>, ApiError>
where
  S: RecordStore + 'static,
  L: Lookup + 'static,
{
  role.require_editor()?;
  let record = state.inventory.edit(id, form).await?;
  Ok(Json(record.into()))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /chemicals/{id}`
pub async fn delete<S, L>(
  State(state): State<AppState<S, L>>,
  role: CallerRole,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: RecordStore + 'static,
  L: Lookup + 'static,
{
  role.require_editor()?;
  state.inventory.remove(id).await?;
  Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_date_means_no_filter() {
    let params = ListParams {
      expiring_before: Some("  ".into()),
      ..ListParams::default()
    };
    assert_eq!(params.into_query().unwrap().expiring_before, None);
  }

  #[test]
  fn malformed_date_is_rejected() {
    let params = ListParams {
      expiring_before: Some("next week".into()),
      ..ListParams::default()
    };
    assert!(matches!(params.into_query(), Err(ApiError::BadRequest(_))));
  }

  #[test]
  fn defaults_to_name_ascending() {
    let query = ListParams::default().into_query().unwrap();
    assert_eq!(query.sort_key, SortKey::Name);
    assert_eq!(query.sort_order, SortOrder::Asc);
  }
}

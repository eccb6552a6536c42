//! Handlers for `/lookups` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/lookups` | Body: `{"chemicalId":..}` or `{"prompt":".."}`; returns 202 + `{"requestId":..}` |
//! | `GET`    | `/lookups/{requestId}` | 404 once superseded or closed |
//! | `DELETE` | `/lookups/{requestId}` | 204 |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use reagent_core::{
  lookup::{Lookup, safety_prompt},
  store::RecordStore,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{AppState, error::ApiError, lookup::LookupSnapshot};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenBody {
  /// Ask for the safety summary of this record.
  pub chemical_id: Option<Uuid>,
  /// Free-text prompt; used when no `chemicalId` is given.
  pub prompt:      Option<String>,
}

/// `POST /lookups`
pub async fn open<S, L>(
  State(state): State<AppState<S, L>>,
  Json(body): Json<OpenBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
  L: Lookup + 'static,
{
  let prompt = match (body.chemical_id, body.prompt) {
    (Some(id), _) => {
      let record = state
        .inventory
        .get(id)
        .await
        .ok_or(reagent_core::Error::ChemicalNotFound(id))?;
      safety_prompt(&record.name)
    }
    (None, Some(prompt)) if !prompt.trim().is_empty() => prompt,
    _ => {
      return Err(ApiError::BadRequest(
        "expected a chemicalId or a non-empty prompt".into(),
      ));
    }
  };

  let request_id = state.lookups.open(prompt);
  Ok((StatusCode::ACCEPTED, Json(json!({ "requestId": request_id }))))
}

/// `GET /lookups/{requestId}`
pub async fn get_one<S, L>(
  State(state): State<AppState<S, L>>,
  Path(request_id): Path<u64>,
) -> Result<Json<LookupSnapshot>, ApiError>
where
  S: RecordStore + 'static,
  L: Lookup + 'static,
{
  state
    .lookups
    .view(request_id)
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("lookup {request_id} is not open")))
}

/// `DELETE /lookups/{requestId}`
pub async fn close<S, L>(
  State(state): State<AppState<S, L>>,
  Path(request_id): Path<u64>,
) -> StatusCode
where
  S: RecordStore + 'static,
  L: Lookup + 'static,
{
  state.lookups.close(request_id);
  StatusCode::NO_CONTENT
}

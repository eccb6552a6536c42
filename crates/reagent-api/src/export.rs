//! Handlers for `/export` endpoints.
//!
//! Both accept the same query parameters as `GET /chemicals` and export the
//! filtered, sorted view.

use axum::{
  extract::{Query, State},
  http::header,
  response::{Html, IntoResponse},
};
use reagent_core::{lookup::Lookup, store::RecordStore};
use reagent_export::{CSV_FILENAME, to_csv, to_report};

use crate::{AppState, chemicals::ListParams, error::ApiError};

/// `GET /export/csv`
pub async fn csv<S, L>(
  State(state): State<AppState<S, L>>,
  Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
  L: Lookup + 'static,
{
  let records = state.inventory.query(&params.into_query()?).await;
  let body = to_csv(&records)?;
  let disposition = format!("attachment; filename=\"{CSV_FILENAME}\"");
  Ok((
    [
      (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
      (header::CONTENT_DISPOSITION, disposition),
    ],
    body,
  ))
}

/// `GET /export/report`
pub async fn report<S, L>(
  State(state): State<AppState<S, L>>,
  Query(params): Query<ListParams>,
) -> Result<Html<String>, ApiError>
where
  S: RecordStore + 'static,
  L: Lookup + 'static,
{
  let records = state.inventory.query(&params.into_query()?).await;
  let today = chrono::Local::now().date_naive();
  Ok(Html(to_report(&records, today)))
}

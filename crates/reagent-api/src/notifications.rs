//! Handlers for `/notifications` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/notifications` | Oldest first |
//! | `DELETE` | `/notifications/{id}` | 204 even when the id is unknown |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
};
use reagent_core::{lookup::Lookup, notification::NotificationEntry, store::RecordStore};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
  #[serde(flatten)]
  pub entry:    NotificationEntry,
  /// Where the notification would have been delivered.
  pub delivery: String,
}

impl From<NotificationEntry> for NotificationView {
  fn from(entry: NotificationEntry) -> Self {
    Self {
      delivery: entry.delivery_note(),
      entry,
    }
  }
}

/// `GET /notifications`
pub async fn list<S, L>(State(state): State<AppState<S, L>>) -> Json<Vec<NotificationView>>
where
  S: RecordStore + 'static,
  L: Lookup + 'static,
{
  let entries = state.inventory.notifications().await;
  Json(entries.into_iter().map(NotificationView::from).collect())
}

/// `DELETE /notifications/{id}`
pub async fn dismiss<S, L>(State(state): State<AppState<S, L>>, Path(id): Path<u64>) -> StatusCode
where
  S: RecordStore + 'static,
  L: Lookup + 'static,
{
  if !state.inventory.dismiss(id).await {
    tracing::debug!(id, "dismissed unknown notification");
  }
  StatusCode::NO_CONTENT
}

//! JSON REST API for Reagent.
//!
//! Exposes an axum [`Router`] backed by an [`InventoryService`] over any
//! [`RecordStore`] and a [`LookupBoard`] over any [`Lookup`]. TLS and
//! transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", reagent_api::api_router(state.clone()))
//! ```

pub mod chemicals;
pub mod error;
pub mod export;
pub mod lookup;
pub mod lookups;
pub mod notifications;
pub mod role;
pub mod service;
pub mod simulation;

#[cfg(test)]
mod test_support;

use axum::{
  Router,
  routing::{get, post},
};
use reagent_core::{lookup::Lookup, store::RecordStore};

pub use error::ApiError;
pub use lookup::LookupBoard;
pub use service::InventoryService;
pub use simulation::Simulation;

/// Shared state handed to every handler.
pub struct AppState<S, L> {
  pub inventory: InventoryService<S>,
  pub lookups:   LookupBoard<L>,
}

impl<S, L> Clone for AppState<S, L> {
  fn clone(&self) -> Self {
    Self {
      inventory: self.inventory.clone(),
      lookups:   self.lookups.clone(),
    }
  }
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, L>(state: AppState<S, L>) -> Router<()>
where
  S: RecordStore + 'static,
  L: Lookup + 'static,
{
  Router::new()
    // Records
    .route(
      "/chemicals",
      get(chemicals::list::<S, L>).post(chemicals::create::<S, L>),
    )
    .route(
      "/chemicals/{id}",
      get(chemicals::get_one::<S, L>)
        .put(chemicals::update::<S, L>)
        .delete(chemicals::delete::<S, L>),
    )
    // Notifications
    .route("/notifications", get(notifications::list::<S, L>))
    .route(
      "/notifications/{id}",
      axum::routing::delete(notifications::dismiss::<S, L>),
    )
    // Simulation
    .route("/simulation/tick", post(simulation::tick::<S, L>))
    // Export
    .route("/export/csv", get(export::csv::<S, L>))
    .route("/export/report", get(export::report::<S, L>))
    // Lookups
    .route("/lookups", post(lookups::open::<S, L>))
    .route(
      "/lookups/{request_id}",
      get(lookups::get_one::<S, L>).delete(lookups::close::<S, L>),
    )
    .with_state(state)
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use reagent_core::lookup::LookupError;
  use reagent_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use uuid::Uuid;

  use super::*;

  /// Answers every prompt immediately by echoing it.
  struct Echo;

  impl Lookup for Echo {
    async fn explain(&self, prompt: String) -> Result<String, LookupError> {
      Ok(format!("echo: {prompt}"))
    }
  }

  async fn make_state() -> AppState<SqliteStore, Echo> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    AppState {
      inventory: InventoryService::open(Arc::new(store)).await,
      lookups:   LookupBoard::new(Arc::new(Echo)),
    }
  }

  async fn oneshot_raw(
    state: AppState<SqliteStore, Echo>,
    method: &str,
    uri: &str,
    caller: Option<&str>,
    body: Option<Value>,
  ) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(caller) = caller {
      builder = builder.header(role::ROLE_HEADER, caller);
    }
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    api_router(state).oneshot(builder.body(body).unwrap()).await.unwrap()
  }

  async fn json_body(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  async fn text_body(resp: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  fn acetone() -> Value {
    json!({
      "name": "Acetone",
      "initialQuantity": "500",
      "unit": "mL",
      "entryDate": "2024-01-01",
      "expiryDate": "2025-06-30",
      "dailyUsage": 10,
      "warningThreshold": 250,
      "notificationChannel": "  "
    })
  }

  // ── Chemicals ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_returns_seed_sorted_by_name() {
    let state = make_state().await;
    let resp = oneshot_raw(state, "GET", "/chemicals", None, None).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await;
    let names: Vec<&str> = body
      .as_array()
      .unwrap()
      .iter()
      .map(|r| r["name"].as_str().unwrap())
      .collect();
    assert_eq!(names, [
      "Agar plates",
      "Distilled water",
      "Ethanol 95%",
      "Hydrochloric acid",
      "Sodium chloride"
    ]);
  }

  #[tokio::test]
  async fn list_includes_derived_fields() {
    let state = make_state().await;
    let resp = oneshot_raw(state, "GET", "/chemicals?search=hydro", None, None).await;
    let body = json_body(resp).await;
    let first = &body[0];
    assert_eq!(first["name"], "Hydrochloric acid");
    assert!(first["thresholdQuantity"].is_number());
    assert!(first["status"].is_string());
  }

  #[tokio::test]
  async fn list_rejects_bad_date() {
    let state = make_state().await;
    let resp = oneshot_raw(state, "GET", "/chemicals?expiring_before=soon", None, None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn create_starts_full_and_coerces_input() {
    let state = make_state().await;
    let resp = oneshot_raw(state.clone(), "POST", "/chemicals", None, Some(acetone())).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = json_body(resp).await;
    assert_eq!(body["currentQuantity"], 500.0);
    assert_eq!(body["warningThreshold"], 100.0);
    assert_eq!(body["status"], "WARNING");
    assert!(body.get("notificationChannel").is_none());

    let id = body["id"].as_str().unwrap();
    let resp = oneshot_raw(state, "GET", &format!("/chemicals/{id}"), None, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn staff_cannot_mutate() {
    let state = make_state().await;
    let resp = oneshot_raw(state.clone(), "POST", "/chemicals", Some("staff"), Some(acetone())).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let seed = Uuid::from_u128(1);
    let resp = oneshot_raw(state.clone(), "DELETE", &format!("/chemicals/{seed}"), Some("staff"), None).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(state.inventory.snapshot().await.len(), 5);
  }

  #[tokio::test]
  async fn create_without_expiry_is_rejected() {
    let state = make_state().await;
    let mut body = acetone();
    body["expiryDate"] = json!("");
    let resp = oneshot_raw(state.clone(), "POST", "/chemicals", None, Some(body)).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(state.inventory.snapshot().await.len(), 5);
  }

  #[tokio::test]
  async fn unknown_role_is_bad_request() {
    let state = make_state().await;
    let resp = oneshot_raw(state, "POST", "/chemicals", Some("root"), Some(acetone())).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn update_keeps_id_and_applies_quantity() {
    let state = make_state().await;
    let id = Uuid::from_u128(1);
    let resp = oneshot_raw(
      state,
      "PUT",
      &format!("/chemicals/{id}"),
      Some("admin"),
      Some(json!({
        "id": Uuid::new_v4(),
        "name": "Hydrochloric acid",
        "initialQuantity": 1000,
        "currentQuantity": 0,
        "unit": "mL",
        "entryDate": "2023-01-10",
        "expiryDate": "2025-01-10",
        "dailyUsage": 5,
        "warningThreshold": 20
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["id"], id.to_string());
    assert_eq!(body["status"], "EMPTY");
  }

  #[tokio::test]
  async fn delete_then_get_is_404() {
    let state = make_state().await;
    let id = Uuid::from_u128(2);
    let resp = oneshot_raw(state.clone(), "DELETE", &format!("/chemicals/{id}"), None, None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = oneshot_raw(state.clone(), "GET", &format!("/chemicals/{id}"), None, None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let resp = oneshot_raw(state, "DELETE", &format!("/chemicals/{id}"), None, None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Simulation & notifications ───────────────────────────────────────────

  #[tokio::test]
  async fn tick_decrements_and_dismiss_is_idempotent() {
    let state = make_state().await;
    let before = state.inventory.snapshot().await;

    let resp = oneshot_raw(state.clone(), "POST", "/simulation/tick", None, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let report = json_body(resp).await;
    assert!(report["consumed"].as_u64().unwrap() > 0);

    let after = state.inventory.snapshot().await;
    for (b, a) in before.iter().zip(&after) {
      assert!(a.current_quantity <= b.current_quantity);
    }

    let resp = oneshot_raw(state.clone(), "GET", "/notifications", None, None).await;
    let list = json_body(resp).await;
    for entry in list.as_array().unwrap() {
      assert!(entry["delivery"].as_str().unwrap().starts_with("Simulated delivery"));
    }

    let resp = oneshot_raw(state, "DELETE", "/notifications/9999", None, None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
  }

  // ── Export ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn csv_export_is_an_attachment() {
    let state = make_state().await;
    let resp = oneshot_raw(state, "GET", "/export/csv?search=ethanol", None, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_owned();
    assert!(disposition.contains("chemical_inventory.csv"));

    let text = text_body(resp).await;
    assert_eq!(text.lines().count(), 2);
    assert!(text.contains(",Ethanol 95%,"));
  }

  #[tokio::test]
  async fn report_export_is_html() {
    let state = make_state().await;
    let resp = oneshot_raw(state, "GET", "/export/report", None, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap().to_owned();
    assert!(content_type.starts_with("text/html"));
    assert!(text_body(resp).await.contains("Agar plates"));
  }

  // ── Lookups ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn lookup_for_chemical_uses_safety_prompt() {
    let state = make_state().await;
    let resp = oneshot_raw(
      state.clone(),
      "POST",
      "/lookups",
      Some("staff"),
      Some(json!({ "chemicalId": Uuid::from_u128(1) })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    let id = json_body(resp).await["requestId"].as_u64().unwrap();

    for _ in 0..10 {
      tokio::task::yield_now().await;
    }
    let resp = oneshot_raw(state.clone(), "GET", &format!("/lookups/{id}"), None, None).await;
    let body = json_body(resp).await;
    assert_eq!(body["state"], "ready");
    assert!(body["text"].as_str().unwrap().contains("Hydrochloric acid"));

    let resp = oneshot_raw(state.clone(), "DELETE", &format!("/lookups/{id}"), None, None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = oneshot_raw(state, "GET", &format!("/lookups/{id}"), None, None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn lookup_needs_a_subject() {
    let state = make_state().await;
    let resp = oneshot_raw(state.clone(), "POST", "/lookups", None, Some(json!({ "prompt": " " }))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let missing = json!({ "chemicalId": Uuid::new_v4() });
    let resp = oneshot_raw(state, "POST", "/lookups", None, Some(missing)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}

//! [`InventoryService`]: the single coordinating component.
//!
//! Owns the [`Inventory`] behind an async mutex and the store it persists to.
//! Every operation, including its persist, completes while holding the lock,
//! so ticks and manual actions never interleave and snapshots are written in
//! order.

use std::sync::Arc;

use reagent_core::{
  chemical::{ChemicalRecord, NewChemical},
  form::ChemicalForm,
  inventory::{Inventory, TickReport},
  notification::NotificationEntry,
  query::InventoryQuery,
  seed::seed_records,
  store::RecordStore,
};
use tokio::sync::Mutex;
use uuid::Uuid;

pub struct InventoryService<S> {
  inventory: Arc<Mutex<Inventory>>,
  store:     Arc<S>,
}

impl<S> Clone for InventoryService<S> {
  fn clone(&self) -> Self {
    Self {
      inventory: Arc::clone(&self.inventory),
      store:     Arc::clone(&self.store),
    }
  }
}

/// Load the stored snapshot, substituting the seed data when nothing is
/// stored or the stored value cannot be read. Never fails.
pub async fn load_or_seed<S: RecordStore>(store: &S) -> Vec<ChemicalRecord> {
  match store.load_records().await {
    Ok(Some(records)) => {
      tracing::info!(count = records.len(), "loaded stored inventory");
      records
    }
    Ok(None) => {
      tracing::info!("no stored inventory; starting from seed data");
      seed_records()
    }
    Err(e) => {
      tracing::warn!(error = %e, "stored inventory unreadable; starting from seed data");
      seed_records()
    }
  }
}

impl<S: RecordStore> InventoryService<S> {
  /// Load (or seed) the inventory from `store` and write the starting
  /// snapshot back.
  pub async fn open(store: Arc<S>) -> Self {
    let records = load_or_seed(store.as_ref()).await;
    let service = Self {
      inventory: Arc::new(Mutex::new(Inventory::new(records))),
      store,
    };
    {
      let inventory = service.inventory.lock().await;
      service.persist(inventory.records()).await;
    }
    service
  }

  /// Best-effort write of the snapshot. Failures are logged, never returned.
  async fn persist(&self, records: &[ChemicalRecord]) {
    if let Err(e) = self.store.save_records(records).await {
      tracing::warn!(error = %e, "failed to persist inventory snapshot");
    }
  }

  // ── Reads ──────────────────────────────────────────────────────────────

  pub async fn snapshot(&self) -> Vec<ChemicalRecord> {
    self.inventory.lock().await.records().to_vec()
  }

  pub async fn get(&self, id: Uuid) -> Option<ChemicalRecord> {
    self.inventory.lock().await.get(id).cloned()
  }

  /// The filtered, sorted view used for display and export.
  pub async fn query(&self, query: &InventoryQuery) -> Vec<ChemicalRecord> {
    query.apply(self.inventory.lock().await.records())
  }

  pub async fn notifications(&self) -> Vec<NotificationEntry> {
    self.inventory.lock().await.notifications().to_vec()
  }

  // ── Mutations ──────────────────────────────────────────────────────────

  pub async fn add(&self, input: NewChemical) -> ChemicalRecord {
    let mut inventory = self.inventory.lock().await;
    let record = inventory.add(input);
    tracing::info!(id = %record.id, name = %record.name, "chemical added");
    self.persist(inventory.records()).await;
    record
  }

  /// Apply an edit form to the record with `id`.
  pub async fn edit(&self, id: Uuid, form: ChemicalForm) -> reagent_core::Result<ChemicalRecord> {
    let mut inventory = self.inventory.lock().await;
    let existing = inventory
      .get(id)
      .cloned()
      .ok_or(reagent_core::Error::ChemicalNotFound(id))?;
    let record = inventory.update(form.into_record(&existing))?;
    tracing::info!(id = %record.id, "chemical updated");
    self.persist(inventory.records()).await;
    Ok(record)
  }

  pub async fn remove(&self, id: Uuid) -> reagent_core::Result<ChemicalRecord> {
    let mut inventory = self.inventory.lock().await;
    let record = inventory.remove(id)?;
    tracing::info!(id = %record.id, name = %record.name, "chemical deleted");
    self.persist(inventory.records()).await;
    Ok(record)
  }

  /// Run one simulated day of usage and persist the result.
  pub async fn tick(&self) -> TickReport {
    let mut inventory = self.inventory.lock().await;
    let report = inventory.tick();
    tracing::debug!(
      consumed = report.consumed,
      notified = report.notifications.len(),
      "usage tick"
    );
    for entry in &report.notifications {
      tracing::info!(
        notification = entry.id,
        channel = entry.channel.as_deref().unwrap_or("general"),
        message = %entry.message,
        "simulated notification delivery"
      );
    }
    self.persist(inventory.records()).await;
    report
  }

  /// Returns `false` when no entry had that id.
  pub async fn dismiss(&self, id: u64) -> bool { self.inventory.lock().await.dismiss(id) }
}

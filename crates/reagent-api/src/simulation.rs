//! Periodic usage simulation.
//!
//! A [`Simulation`] drives [`InventoryService::tick`] on a fixed period from a
//! background task. Ticks share the service lock with manual operations, so
//! they never overlap one another or an edit.

use std::time::Duration;

use axum::{Json, extract::State};
use reagent_core::{inventory::TickReport, lookup::Lookup, store::RecordStore};
use tokio::{
  task::JoinHandle,
  time::{Instant, MissedTickBehavior, interval_at},
};

use crate::{AppState, service::InventoryService};

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Handle to the background tick task. Dropping it stops the simulation.
pub struct Simulation {
  handle: JoinHandle<()>,
}

impl Simulation {
  /// Start ticking `service` every `period`. The first tick happens one
  /// full period after the call.
  pub fn spawn<S>(service: InventoryService<S>, period: Duration) -> Self
  where
    S: RecordStore + 'static,
  {
    let period = period.max(MIN_PERIOD);
    let handle = tokio::spawn(async move {
      let mut interval = interval_at(Instant::now() + period, period);
      interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
      loop {
        interval.tick().await;
        service.tick().await;
      }
    });
    tracing::info!(period_ms = period.as_millis() as u64, "usage simulation started");
    Self { handle }
  }

  pub fn is_running(&self) -> bool { !self.handle.is_finished() }

  pub fn stop(&self) { self.handle.abort(); }
}

impl Drop for Simulation {
  fn drop(&mut self) { self.handle.abort(); }
}

// ─── Manual tick ──────────────────────────────────────────────────────────────

/// `POST /simulation/tick`: run one tick immediately.
pub async fn tick<S, L>(State(state): State<AppState<S, L>>) -> Json<TickReport>
where
  S: RecordStore + 'static,
  L: Lookup + 'static,
{
  Json(state.inventory.tick().await)
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use super::*;
  use crate::test_support::{MemoryStore, depleting};

  async fn service(current: f64) -> InventoryService<MemoryStore> {
    InventoryService::open(Arc::new(MemoryStore::with_records(vec![depleting(current)]))).await
  }

  async fn settle() {
    for _ in 0..10 {
      tokio::task::yield_now().await;
    }
  }

  #[tokio::test(start_paused = true)]
  async fn ticks_once_per_period() {
    let service = service(1000.0).await;
    let _sim = Simulation::spawn(service.clone(), Duration::from_secs(5));

    tokio::time::sleep(Duration::from_millis(4_900)).await;
    settle().await;
    assert_eq!(service.snapshot().await[0].current_quantity, 1000.0);

    tokio::time::sleep(Duration::from_millis(200)).await;
    settle().await;
    assert_eq!(service.snapshot().await[0].current_quantity, 950.0);

    tokio::time::sleep(Duration::from_secs(10)).await;
    settle().await;
    assert_eq!(service.snapshot().await[0].current_quantity, 850.0);
  }

  #[tokio::test(start_paused = true)]
  async fn stop_halts_ticking() {
    let service = service(1000.0).await;
    let sim = Simulation::spawn(service.clone(), Duration::from_secs(1));

    tokio::time::sleep(Duration::from_millis(1_500)).await;
    settle().await;
    sim.stop();
    settle().await;
    assert!(!sim.is_running());

    tokio::time::sleep(Duration::from_secs(5)).await;
    settle().await;
    assert_eq!(service.snapshot().await[0].current_quantity, 950.0);
  }

  #[tokio::test(start_paused = true)]
  async fn warns_once_while_depleting() {
    let service = service(260.0).await;
    let _sim = Simulation::spawn(service.clone(), Duration::from_secs(1));

    tokio::time::sleep(Duration::from_millis(10_500)).await;
    settle().await;
    assert_eq!(service.snapshot().await[0].current_quantity, 0.0);
    assert_eq!(service.notifications().await.len(), 1);
  }
}

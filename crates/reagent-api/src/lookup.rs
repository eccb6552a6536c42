//! The informational lookup panel.
//!
//! At most one lookup is open at a time. Opening a new one supersedes the
//! previous request: its task is aborted and any result it still delivers is
//! discarded. Lookups never read or modify inventory state.

use std::sync::{Arc, Mutex, PoisonError};

use reagent_core::lookup::{LOOKUP_FAILED_MESSAGE, Lookup, LookupError};
use serde::Serialize;
use tokio::task::JoinHandle;

/// What the panel currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum LookupView {
  Loading,
  Ready { text: String },
  Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupSnapshot {
  pub request_id: u64,
  pub prompt:     String,
  #[serde(flatten)]
  pub view:       LookupView,
}

struct Panel {
  snapshot: LookupSnapshot,
  task:     Option<JoinHandle<()>>,
}

#[derive(Default)]
struct BoardState {
  next_id: u64,
  current: Option<Panel>,
}

/// Tracks the single open lookup request.
pub struct LookupBoard<L> {
  lookup: Arc<L>,
  state:  Arc<Mutex<BoardState>>,
}

impl<L> Clone for LookupBoard<L> {
  fn clone(&self) -> Self {
    Self {
      lookup: Arc::clone(&self.lookup),
      state:  Arc::clone(&self.state),
    }
  }
}

impl<L: Lookup + 'static> LookupBoard<L> {
  pub fn new(lookup: Arc<L>) -> Self {
    Self {
      lookup,
      state: Arc::new(Mutex::new(BoardState::default())),
    }
  }

  fn state(&self) -> std::sync::MutexGuard<'_, BoardState> {
    self.state.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Open a lookup for `prompt` and return its request id. The panel shows
  /// [`LookupView::Loading`] until the lookup completes.
  pub fn open(&self, prompt: String) -> u64 {
    let mut state = self.state();
    state.next_id += 1;
    let request_id = state.next_id;

    if let Some(task) = state.current.take().and_then(|p| p.task) {
      task.abort();
    }

    let board = self.clone();
    let task_prompt = prompt.clone();
    let task = tokio::spawn(async move {
      let result = board.lookup.explain(task_prompt).await;
      board.finish(request_id, result);
    });

    state.current = Some(Panel {
      snapshot: LookupSnapshot {
        request_id,
        prompt,
        view: LookupView::Loading,
      },
      task: Some(task),
    });
    tracing::info!(request_id, "lookup opened");
    request_id
  }

  /// Deliver the result of `request_id`. Results for a request that is no
  /// longer open are dropped.
  pub(crate) fn finish(&self, request_id: u64, result: Result<String, LookupError>) {
    let mut state = self.state();
    let Some(panel) = state
      .current
      .as_mut()
      .filter(|p| p.snapshot.request_id == request_id)
    else {
      tracing::debug!(request_id, "discarding stale lookup result");
      return;
    };

    panel.task = None;
    panel.snapshot.view = match result {
      Ok(text) => LookupView::Ready { text },
      Err(e) => {
        tracing::warn!(request_id, error = %e, "lookup failed");
        LookupView::Failed {
          message: LOOKUP_FAILED_MESSAGE.to_owned(),
        }
      }
    };
  }

  /// The open lookup, if `request_id` is still current.
  pub fn view(&self, request_id: u64) -> Option<LookupSnapshot> {
    self
      .state()
      .current
      .as_ref()
      .filter(|p| p.snapshot.request_id == request_id)
      .map(|p| p.snapshot.clone())
  }

  /// Close the panel for `request_id`. Returns `false` if it was not open.
  pub fn close(&self, request_id: u64) -> bool {
    let mut state = self.state();
    if state
      .current
      .as_ref()
      .is_none_or(|p| p.snapshot.request_id != request_id)
    {
      return false;
    }
    if let Some(task) = state.current.take().and_then(|p| p.task) {
      task.abort();
    }
    true
  }
}

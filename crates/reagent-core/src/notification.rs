//! The user-visible notification queue.
//!
//! Entries stay until dismissed. The queue never deduplicates; the warning
//! tracker decides what gets enqueued.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A notification not yet assigned an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
  pub title:   String,
  pub message: String,
  /// Copied from the triggering record; display only.
  pub channel: Option<String>,
}

/// One queued alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEntry {
  /// Monotonic within a process, starting at 1.
  pub id:         u64,
  pub title:      String,
  pub message:    String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub channel:    Option<String>,
  pub created_at: DateTime<Utc>,
}

impl NotificationEntry {
  /// How the (simulated) delivery is described to the operator.
  pub fn delivery_note(&self) -> String {
    match &self.channel {
      Some(channel) => format!("Simulated delivery to webhook: {channel}"),
      None => "Simulated delivery to general channels.".to_owned(),
    }
  }
}

/// Ordered queue of notifications; insertion order is display order.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
  entries: Vec<NotificationEntry>,
  next_id: u64,
}

impl Default for NotificationQueue {
  fn default() -> Self { Self { entries: Vec::new(), next_id: 1 } }
}

impl NotificationQueue {
  pub fn new() -> Self { Self::default() }

  /// Append `draft` and return the entry it became.
  pub fn enqueue(&mut self, draft: NotificationDraft) -> &NotificationEntry {
    let entry = NotificationEntry {
      id:         self.next_id,
      title:      draft.title,
      message:    draft.message,
      channel:    draft.channel,
      created_at: Utc::now(),
    };
    self.next_id += 1;
    self.entries.push(entry);
    &self.entries[self.entries.len() - 1]
  }

  /// Remove the entry with `id`. Returns `false` if there was none.
  pub fn dismiss(&mut self, id: u64) -> bool {
    let before = self.entries.len();
    self.entries.retain(|e| e.id != id);
    self.entries.len() != before
  }

  pub fn entries(&self) -> &[NotificationEntry] { &self.entries }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

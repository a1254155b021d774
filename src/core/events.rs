//! Change notifications for record collections
//!
//! Stores publish one event per applied mutation. Subscriptions listen on
//! the bus and answer every event for their collection with a fresh full
//! snapshot, so the event payload only needs to say what happened where.
//!
//! ```text
//! create/update/delete ──▶ EventBus::publish() ──▶ broadcast ──▶ subscription tasks
//!                                                             ──▶ badge counters
//! ```

use crate::core::record::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// A mutation applied to one collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CollectionEvent {
    /// A record was created
    Created { collection: String, record: Record },
    /// A record was updated; `record` is the state after the update
    Updated { collection: String, record: Record },
    /// A record was deleted
    Deleted { collection: String, record_id: Uuid },
}

impl CollectionEvent {
    /// Collection the event belongs to
    pub fn collection(&self) -> &str {
        match self {
            CollectionEvent::Created { collection, .. }
            | CollectionEvent::Updated { collection, .. }
            | CollectionEvent::Deleted { collection, .. } => collection,
        }
    }

    /// Id of the affected record
    pub fn record_id(&self) -> Uuid {
        match self {
            CollectionEvent::Created { record, .. } | CollectionEvent::Updated { record, .. } => {
                record.id
            }
            CollectionEvent::Deleted { record_id, .. } => *record_id,
        }
    }

    /// Get the action name (created, updated, deleted)
    pub fn action(&self) -> &str {
        match self {
            CollectionEvent::Created { .. } => "created",
            CollectionEvent::Updated { .. } => "updated",
            CollectionEvent::Deleted { .. } => "deleted",
        }
    }
}

/// Envelope wrapping an event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// The actual event
    pub event: CollectionEvent,
}

impl EventEnvelope {
    pub fn new(event: CollectionEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based event bus
///
/// Cheap to clone; all clones share one channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity
    ///
    /// The capacity determines how many events can be buffered before
    /// slow receivers start losing events (lagged).
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Never fails. Returns the number of receivers that will see the event.
    pub fn publish(&self, event: CollectionEvent) -> usize {
        let envelope = EventEnvelope::new(event);
        // send() returns Err only if there are no receivers
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Subscribe to events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

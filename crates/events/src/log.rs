//! In-process append-only audit log backed by a `tokio::sync::broadcast`
//! channel.
//!
//! [`AuditLog`] is the single ordering point for the global transition
//! sequence. It is designed to be shared via `Arc<AuditLog>` between the
//! transition engine (the only appender) and any number of observers.

use futures::stream::{self, Stream};
use tokio::sync::broadcast;
use tokio::sync::RwLock;

use facet_core::AssetId;

use crate::event::{Transition, TransitionEvent};

/// Default buffer capacity for the live broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// Append-only, globally ordered audit trail with live fan-out.
///
/// Appends assign sequence numbers `1, 2, 3, ...` under the log's own
/// write lock; the stored history never shrinks and entries are never
/// edited. Live subscribers receive every event in order; late
/// subscribers use [`subscribe_with_replay`](AuditLog::subscribe_with_replay)
/// to observe the full history with no gap between replay and live.
pub struct AuditLog {
    entries: RwLock<Vec<TransitionEvent>>,
    sender: broadcast::Sender<TransitionEvent>,
}

impl AuditLog {
    /// Create a log whose live channel buffers `capacity` events.
    ///
    /// A subscriber that falls more than `capacity` events behind will
    /// observe `RecvError::Lagged`; the stored history is unaffected and
    /// can always be replayed from the start.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        AuditLog {
            entries: RwLock::new(Vec::new()),
            sender,
        }
    }

    /// Seal and append one transition, returning the sequenced event.
    ///
    /// Called by the transition engine exactly once per successful
    /// mutation, inside the engine's write-side critical section, so the
    /// sequence order matches the order mutations became visible.
    pub async fn append(&self, transition: Transition) -> TransitionEvent {
        let mut entries = self.entries.write().await;
        let event = TransitionEvent::seal(transition, entries.len() as u64 + 1);
        entries.push(event.clone());

        // Ignore the SendError — it only means there are zero receivers;
        // the event is already in the stored history.
        let _ = self.sender.send(event.clone());

        tracing::debug!(
            sequence = event.sequence,
            asset_id = event.asset_id,
            to_stage = %event.to_stage,
            "appended transition event"
        );
        event
    }

    /// Subscribe to events appended from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<TransitionEvent> {
        self.sender.subscribe()
    }

    /// Atomically snapshot the full history and subscribe.
    ///
    /// The read lock held across the subscription blocks concurrent
    /// appends, so every event is seen exactly once: first in the
    /// returned snapshot, then live on the receiver.
    pub async fn subscribe_with_replay(
        &self,
    ) -> (Vec<TransitionEvent>, broadcast::Receiver<TransitionEvent>) {
        let entries = self.entries.read().await;
        let receiver = self.sender.subscribe();
        (entries.clone(), receiver)
    }

    /// The ordered subsequence of events for one asset, from the start.
    pub async fn events_for_asset(&self, asset_id: AssetId) -> Vec<TransitionEvent> {
        let entries = self.entries.read().await;
        entries
            .iter()
            .filter(|e| e.asset_id == asset_id)
            .cloned()
            .collect()
    }

    /// [`events_for_asset`](AuditLog::events_for_asset) as a finite,
    /// restartable stream.
    pub async fn stream_for_asset(
        &self,
        asset_id: AssetId,
    ) -> impl Stream<Item = TransitionEvent> {
        stream::iter(self.events_for_asset(asset_id).await)
    }

    /// Number of events appended so far.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether nothing has been appended yet.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        AuditLog::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

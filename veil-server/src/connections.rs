//! Registry of live transport connections
//!
//! Every accepted connection, registered or not, owns an outbound queue
//! here. Handlers never touch sockets directly: they push `ServerEvent`s
//! into queues and each connection task drains its own queue onto the wire.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{RwLock, mpsc};
use tracing::trace;

use veil_common::protocol::ServerEvent;

/// Opaque identifier for one live transport connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Wrap a raw id. Ids handed out by `ConnectionRegistry` start at 1.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Sending half of a connection's outbound queue
pub type EventSender = mpsc::UnboundedSender<ServerEvent>;

/// Receiving half of a connection's outbound queue
pub type EventReceiver = mpsc::UnboundedReceiver<ServerEvent>;

/// Tracks all live connections and their outbound queues
#[derive(Debug, Clone)]
pub struct ConnectionRegistry {
    senders: Arc<RwLock<HashMap<ConnectionId, EventSender>>>,
    next_id: Arc<AtomicU64>,
}

impl ConnectionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            senders: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Allocate an id and outbound queue for a newly accepted connection
    pub async fn connect(&self) -> (ConnectionId, EventReceiver) {
        let id = ConnectionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = mpsc::unbounded_channel();
        self.senders.write().await.insert(id, tx);
        (id, rx)
    }

    /// Drop a connection's queue. Unknown ids are ignored.
    pub async fn disconnect(&self, id: ConnectionId) {
        self.senders.write().await.remove(&id);
    }

    /// Queue an event for one connection
    ///
    /// Fire-and-forget: returns whether the event was queued, but a missing
    /// or closed connection is not an error and nothing is retried.
    pub async fn send_to(&self, id: ConnectionId, event: ServerEvent) -> bool {
        let senders = self.senders.read().await;
        match senders.get(&id) {
            Some(tx) => tx.send(event).is_ok(),
            None => {
                trace!(connection = %id, "dropping event for unknown connection");
                false
            }
        }
    }

    /// Queue an event for every live connection
    pub async fn broadcast(&self, event: ServerEvent) {
        let senders = self.senders.read().await;
        for tx in senders.values() {
            // Closed queues belong to connections that are tearing down
            let _ = tx.send(event.clone());
        }
    }

    /// Number of live connections
    pub async fn len(&self) -> usize {
        self.senders.read().await.len()
    }

    /// Whether there are no live connections
    pub async fn is_empty(&self) -> bool {
        self.senders.read().await.is_empty()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

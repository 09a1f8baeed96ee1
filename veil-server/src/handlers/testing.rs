//! Shared test utilities for handler tests

use veil_common::protocol::ServerEvent;

use super::{HandlerContext, handle_register};
use crate::connections::{ConnectionId, EventReceiver};
use crate::state::RelayState;

/// Relay state with helpers for opening fake connections
pub struct TestRelay {
    pub state: RelayState,
}

/// A fake connection: its id plus the outbound queue a socket would drain
pub struct TestClient {
    pub id: ConnectionId,
    pub rx: EventReceiver,
}

impl TestRelay {
    pub fn new() -> Self {
        Self {
            state: RelayState::new(),
        }
    }

    /// Open a connection without registering it
    pub async fn connect(&self) -> TestClient {
        let (id, rx) = self.state.connections.connect().await;
        TestClient { id, rx }
    }

    /// Open a connection and register it, discarding the registration events
    pub async fn register(&self, username: &str, public_key: &str) -> TestClient {
        let mut client = self.connect().await;
        handle_register(
            Some(username.to_string()),
            Some(public_key.to_string()),
            &client.ctx(self),
        )
        .await;
        client.drain();
        client
    }
}

impl TestClient {
    /// Handler context for this connection
    pub fn ctx<'a>(&self, relay: &'a TestRelay) -> HandlerContext<'a> {
        HandlerContext::new(self.id, &relay.state)
    }

    /// Take every event queued so far
    pub fn drain(&mut self) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}

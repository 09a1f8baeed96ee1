//! Handlers for client events

mod disconnect;
mod private_message;
mod register;

#[cfg(test)]
pub mod testing;

pub use disconnect::handle_disconnect;
pub use private_message::handle_private_message;
pub use register::handle_register;

use veil_common::protocol::ServerEvent;

use crate::connections::ConnectionId;
use crate::error::RelayError;
use crate::state::RelayState;

/// Context passed to all handlers
pub struct HandlerContext<'a> {
    /// Connection the event arrived on
    pub connection: ConnectionId,
    pub state: &'a RelayState,
}

impl<'a> HandlerContext<'a> {
    pub fn new(connection: ConnectionId, state: &'a RelayState) -> Self {
        Self { connection, state }
    }

    /// Queue an event for this connection only
    pub async fn send(&self, event: ServerEvent) {
        self.state.connections.send_to(self.connection, event).await;
    }

    /// Report a failed operation to this connection. The connection stays open.
    pub async fn send_error(&self, error: &RelayError) {
        self.send(ServerEvent::error(error.to_string())).await;
    }
}

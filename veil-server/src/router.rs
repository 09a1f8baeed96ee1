//! Private message routing
//!
//! Authenticates the sender by connection, records the message, and queues
//! delivery to the recipient (when online) and back to the sender.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

use veil_common::protocol::ServerEvent;
use veil_common::validators::validate_required;

use crate::connections::{ConnectionId, ConnectionRegistry};
use crate::directory::SessionDirectory;
use crate::error::{RelayError, ValidationError};
use crate::history::{ConversationHistoryStore, Message};

/// Outcome of a routed message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Routed {
    /// Whether the recipient had a live connection at routing time
    pub recipient_online: bool,
}

/// Routes private messages between registered users
#[derive(Debug, Clone)]
pub struct MessageRouter {
    directory: SessionDirectory,
    history: ConversationHistoryStore,
    connections: ConnectionRegistry,
    /// Serializes append-then-deliver against history replay
    sequencer: Arc<Mutex<()>>,
}

impl MessageRouter {
    pub fn new(
        directory: SessionDirectory,
        history: ConversationHistoryStore,
        connections: ConnectionRegistry,
    ) -> Self {
        Self {
            directory,
            history,
            connections,
            sequencer: Arc::new(Mutex::new(())),
        }
    }

    /// Hold off routing while the caller works with a consistent history
    ///
    /// Registration takes this guard around claiming the name and replaying
    /// history, so every message is either in the replay or delivered live.
    pub async fn lock_routing(&self) -> MutexGuard<'_, ()> {
        self.sequencer.lock().await
    }

    /// Route `ciphertext` from the user on `connection` to `to`
    ///
    /// The message is stored whether or not the recipient is online; an
    /// unknown recipient simply finds it in their history when they
    /// register. The sender always receives an echo of the delivery event.
    ///
    /// # Errors
    ///
    /// - `RelayError::Unauthenticated` if `connection` has not registered
    /// - `RelayError::Validation` if `to` or `ciphertext` is missing or empty
    ///
    /// Nothing is stored or delivered on error.
    pub async fn send(
        &self,
        connection: ConnectionId,
        to: Option<&str>,
        ciphertext: Option<&str>,
    ) -> Result<Routed, RelayError> {
        let sender = self
            .directory
            .resolve_by_session(connection)
            .await
            .ok_or(RelayError::Unauthenticated)?;

        let (Ok(to), Ok(ciphertext)) = (validate_required(to), validate_required(ciphertext))
        else {
            return Err(ValidationError::PrivateMessageFields.into());
        };

        let _sequence = self.lock_routing().await;

        self.history
            .append(Message::new(&sender, to, ciphertext))
            .await;

        let delivery = ServerEvent::NewPrivateMessage {
            from: sender.clone(),
            message: ciphertext.to_string(),
        };

        let recipient = self.directory.resolve_connection(to).await;
        if let Some(recipient) = recipient {
            self.connections.send_to(recipient, delivery.clone()).await;
        }
        self.connections.send_to(connection, delivery).await;

        debug!(
            from = %sender,
            to = %to,
            recipient_online = recipient.is_some(),
            "routed private message"
        );

        Ok(Routed {
            recipient_online: recipient.is_some(),
        })
    }
}

//! Protocol definitions for the Veil relay
//!
//! Every event travels as one JSON document per WebSocket frame:
//!
//! ```json
//! {"event": "private_message", "data": {"to": "bob", "message": "..."}}
//! ```
//!
//! ## Encryption
//!
//! Public keys and message bodies are opaque strings to the relay. Clients
//! encrypt with the recipient's published key before sending; the server
//! only stores and forwards the resulting ciphertext.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Directory snapshot mapping each registered username to its public key
pub type Directory = BTreeMap<String, String>;

/// Client request events
///
/// Payload fields are optional on the wire so that a missing field reaches
/// the handler and is reported as a validation error instead of a parse
/// failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Claim a username and publish a public key
    Register {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        username: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        public_key: Option<String>,
    },
    /// Send ciphertext to another user
    PrivateMessage {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        to: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl ClientEvent {
    /// Build a register event with both fields present
    pub fn register(username: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self::Register {
            username: Some(username.into()),
            public_key: Some(public_key.into()),
        }
    }

    /// Build a private message event with both fields present
    pub fn private_message(to: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PrivateMessage {
            to: Some(to.into()),
            message: Some(message.into()),
        }
    }

    /// Event name as it appears on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Self::Register { .. } => "register",
            Self::PrivateMessage { .. } => "private_message",
        }
    }
}

/// One stored message as replayed in `chat_history`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub from: String,
    pub to: String,
    pub message: String,
}

/// Server events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Directory snapshot, broadcast to every connection on any registry change
    UserListUpdate(Directory),
    /// Every stored message involving the newly registered user
    ChatHistory(Vec<HistoryEntry>),
    /// Delivery of a message to its recipient, and echo to its sender
    NewPrivateMessage { from: String, message: String },
    /// Operation failure reported to the requesting connection only
    Error { message: String },
}

impl ServerEvent {
    /// Build an error event
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Event name as it appears on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Self::UserListUpdate(_) => "user_list_update",
            Self::ChatHistory(_) => "chat_history",
            Self::NewPrivateMessage { .. } => "new_private_message",
            Self::Error { .. } => "error",
        }
    }
}

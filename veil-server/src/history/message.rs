//! Stored message

use veil_common::protocol::HistoryEntry;

use super::ConversationKey;

/// One routed message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub from: String,
    pub to: String,
    /// Opaque ciphertext
    pub ciphertext: String,
}

impl Message {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        ciphertext: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            ciphertext: ciphertext.into(),
        }
    }

    /// Canonical key of the conversation this message belongs to
    pub fn conversation_key(&self) -> ConversationKey {
        ConversationKey::new(&self.from, &self.to)
    }
}

impl From<Message> for HistoryEntry {
    fn from(message: Message) -> Self {
        HistoryEntry {
            from: message.from,
            to: message.to,
            message: message.ciphertext,
        }
    }
}

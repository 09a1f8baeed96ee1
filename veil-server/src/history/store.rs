//! In-memory conversation history store

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::{ConversationKey, Message};

/// Buckets in creation order, plus an index from key to bucket position
#[derive(Debug, Default)]
struct HistoryState {
    buckets: Vec<(ConversationKey, Vec<Message>)>,
    index: HashMap<ConversationKey, usize>,
    total: usize,
}

/// Append-only message store keyed by conversation
#[derive(Debug, Clone, Default)]
pub struct ConversationHistoryStore {
    state: Arc<RwLock<HistoryState>>,
}

impl ConversationHistoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to its conversation's bucket
    ///
    /// The first message between two users creates their bucket at the end
    /// of the bucket list; later messages keep arrival order inside it.
    pub async fn append(&self, message: Message) {
        let key = message.conversation_key();
        let mut state = self.state.write().await;

        let existing = state.index.get(&key).copied();
        let position = match existing {
            Some(position) => position,
            None => {
                let position = state.buckets.len();
                state.buckets.push((key.clone(), Vec::new()));
                state.index.insert(key, position);
                position
            }
        };

        state.buckets[position].1.push(message);
        state.total += 1;
    }

    /// Every message in every conversation `username` takes part in
    ///
    /// Buckets are concatenated in creation order, each one chronological.
    /// The result is not chronological across conversations: a newer
    /// message in an older conversation precedes an older message in a
    /// newer one.
    pub async fn query_for_user(&self, username: &str) -> Vec<Message> {
        let state = self.state.read().await;
        state
            .buckets
            .iter()
            .filter(|(key, _)| key.involves(username))
            .flat_map(|(_, messages)| messages.iter().cloned())
            .collect()
    }

    /// Messages exchanged between `a` and `b`, in arrival order
    pub async fn conversation(&self, a: &str, b: &str) -> Vec<Message> {
        let key = ConversationKey::new(a, b);
        let state = self.state.read().await;
        state
            .index
            .get(&key)
            .map(|&position| state.buckets[position].1.clone())
            .unwrap_or_default()
    }

    /// Total number of stored messages
    pub async fn len(&self) -> usize {
        self.state.read().await.total
    }

    /// Whether nothing has been stored yet
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.total == 0
    }

    /// Number of distinct conversations
    pub async fn conversation_count(&self) -> usize {
        self.state.read().await.buckets.len()
    }
}

//! Shared relay state

use crate::connections::ConnectionRegistry;
use crate::directory::SessionDirectory;
use crate::history::ConversationHistoryStore;
use crate::router::MessageRouter;

/// Everything connection tasks share, created once per server
///
/// Cloning is cheap: every field is a handle onto the same underlying state.
#[derive(Debug, Clone)]
pub struct RelayState {
    pub connections: ConnectionRegistry,
    pub directory: SessionDirectory,
    pub history: ConversationHistoryStore,
    pub router: MessageRouter,
}

impl RelayState {
    /// Create empty relay state
    pub fn new() -> Self {
        let connections = ConnectionRegistry::new();
        let directory = SessionDirectory::new();
        let history = ConversationHistoryStore::new();
        let router = MessageRouter::new(directory.clone(), history.clone(), connections.clone());
        Self {
            connections,
            directory,
            history,
            router,
        }
    }
}

impl Default for RelayState {
    fn default() -> Self {
        Self::new()
    }
}

//! Query methods for SessionDirectory

use veil_common::protocol::Directory;

use super::SessionDirectory;
use super::mutations::snapshot_of;
use crate::connections::ConnectionId;

impl SessionDirectory {
    /// Point-in-time copy of every registered username and its public key
    pub async fn snapshot(&self) -> Directory {
        let state = self.state.read().await;
        snapshot_of(&state)
    }

    /// Username registered by `connection`, if any
    pub async fn resolve_by_session(&self, connection: ConnectionId) -> Option<String> {
        let state = self.state.read().await;
        state.by_connection.get(&connection).cloned()
    }

    /// Connection currently holding `username`, if any
    pub async fn resolve_connection(&self, username: &str) -> Option<ConnectionId> {
        let state = self.state.read().await;
        state.by_username.get(username).map(|entry| entry.connection)
    }

    /// Public key published by `username`, if registered
    pub async fn public_key(&self, username: &str) -> Option<String> {
        let state = self.state.read().await;
        state
            .by_username
            .get(username)
            .map(|entry| entry.public_key.clone())
    }

    /// Number of registered users
    pub async fn len(&self) -> usize {
        self.state.read().await.by_username.len()
    }

    /// Whether nobody is registered
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.by_username.is_empty()
    }
}

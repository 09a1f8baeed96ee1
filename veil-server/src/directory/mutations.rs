//! Mutation methods for SessionDirectory

use veil_common::protocol::Directory;

use super::{DirectoryEntry, DirectoryState, SessionDirectory};
use crate::connections::ConnectionId;
use crate::error::RelayError;

impl SessionDirectory {
    /// Claim `username` for `connection` and return the resulting snapshot
    ///
    /// The uniqueness check and both index inserts happen under one write
    /// lock, so of two connections racing for the same name exactly one wins.
    ///
    /// # Errors
    ///
    /// - `RelayError::DuplicateUsername` if any active connection holds the name
    /// - `RelayError::AlreadyRegistered` if this connection holds another name
    ///
    /// Nothing is modified on failure.
    pub async fn register(
        &self,
        connection: ConnectionId,
        username: &str,
        public_key: &str,
    ) -> Result<Directory, RelayError> {
        let mut state = self.state.write().await;

        if state.by_username.contains_key(username) {
            return Err(RelayError::DuplicateUsername);
        }
        if state.by_connection.contains_key(&connection) {
            return Err(RelayError::AlreadyRegistered);
        }

        state
            .by_connection
            .insert(connection, username.to_string());
        state.by_username.insert(
            username.to_string(),
            DirectoryEntry {
                connection,
                public_key: public_key.to_string(),
            },
        );

        Ok(snapshot_of(&state))
    }

    /// Release whatever username `connection` holds
    ///
    /// Returns the freed username, or `None` if the connection never
    /// registered. The name is immediately available to others.
    pub async fn deregister(&self, connection: ConnectionId) -> Option<String> {
        let mut state = self.state.write().await;
        let username = state.by_connection.remove(&connection)?;
        state.by_username.remove(&username);
        Some(username)
    }
}

/// Copy the username -> public key view out of locked state
pub(super) fn snapshot_of(state: &DirectoryState) -> Directory {
    state
        .by_username
        .iter()
        .map(|(username, entry)| (username.clone(), entry.public_key.clone()))
        .collect()
}

//! Directory entry for a registered user

use crate::connections::ConnectionId;

/// A registered user: exists only while connected and registered
///
/// Keyed by username in the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Connection that claimed the name
    pub connection: ConnectionId,
    /// Public key published at registration
    pub public_key: String,
}

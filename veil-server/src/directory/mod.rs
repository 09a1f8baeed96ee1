//! Session directory for registered users
//!
//! Bidirectional index between connections and claimed usernames, holding
//! each user's published public key. Both directions are kept in one
//! `DirectoryState` behind a single lock so they can never disagree.

mod entry;
mod mutations;
mod queries;

pub use entry::DirectoryEntry;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::connections::ConnectionId;

/// Both halves of the index
#[derive(Debug, Default)]
pub(super) struct DirectoryState {
    /// username -> entry
    pub(super) by_username: HashMap<String, DirectoryEntry>,
    /// connection -> username
    pub(super) by_connection: HashMap<ConnectionId, String>,
}

/// Directory of currently registered users
#[derive(Debug, Clone, Default)]
pub struct SessionDirectory {
    pub(super) state: Arc<RwLock<DirectoryState>>,
}

impl SessionDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }
}

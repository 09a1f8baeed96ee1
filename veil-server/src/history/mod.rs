//! Conversation history
//!
//! Volatile, append-only store of every routed message, bucketed per
//! unordered pair of usernames. Lives for the process lifetime only.

mod key;
mod message;
mod store;

pub use key::ConversationKey;
pub use message::Message;
pub use store::ConversationHistoryStore;

//! Canonical conversation keys

/// Order-independent pair of usernames identifying one conversation
///
/// The two names are stored in lexicographic order, so
/// `ConversationKey::new(a, b) == ConversationKey::new(b, a)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConversationKey {
    low: String,
    high: String,
}

impl ConversationKey {
    /// Build the canonical key for a conversation between `a` and `b`
    pub fn new(a: &str, b: &str) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self {
            low: low.to_string(),
            high: high.to_string(),
        }
    }

    /// Whether `username` is one of the two participants
    pub fn involves(&self, username: &str) -> bool {
        self.low == username || self.high == username
    }
}

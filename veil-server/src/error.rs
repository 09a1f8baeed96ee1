//! Relay error types
//!
//! The `Display` text of each variant is the message clients receive in an
//! `error` event. None of these are fatal: they abort one operation and leave
//! the connection in its previous state.

/// A required request field was missing or empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// `username` or `public_key` missing at registration
    #[error("Username and public key are required.")]
    RegistrationFields,
    /// `to` or `message` missing on a private message
    #[error("Recipient and message are required.")]
    PrivateMessageFields,
}

/// Errors reported back to the requesting connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Username is claimed by an active connection
    #[error("Username is already taken.")]
    DuplicateUsername,
    /// Message sent from a connection with no completed registration
    #[error("You must be registered to send messages.")]
    Unauthenticated,
    /// Connection already holds a username
    #[error("This connection is already registered.")]
    AlreadyRegistered,
}

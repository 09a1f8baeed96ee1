//! Server-side message and log strings

/// Sent when an inbound frame is not a valid client event
pub const ERR_INVALID_EVENT: &str = "Invalid event format.";

// Startup and shutdown
pub const MSG_LISTENING: &str = "Relay listening";
pub const MSG_SHUTDOWN_RECEIVED: &str = "Shutdown signal received";
pub const ERR_SIGNAL_SIGTERM: &str = "Failed to install SIGTERM handler";
pub const ERR_SIGNAL_SIGINT: &str = "Failed to install SIGINT handler";
pub const ERR_SIGNAL_CTRLC: &str = "Failed to listen for Ctrl+C";

// Connection lifecycle
pub const ERR_ACCEPT: &str = "Failed to accept connection";
pub const ERR_CONNECTION: &str = "Connection error";
pub const ERR_HANDSHAKE: &str = "WebSocket handshake failed";
pub const WARN_REJECTED_FRAME: &str = "Rejected malformed frame";

//! Veil Common Library
//!
//! Shared protocol types, the WebSocket event codec, and input validators
//! for the Veil relay and its clients.

pub mod io;
pub mod protocol;
pub mod validators;

/// Default port for relay connections
pub const DEFAULT_PORT: u16 = 5000;

/// Largest inbound event frame accepted, in bytes
///
/// Ciphertext produced by clients is a few kilobytes at most; anything
/// larger is rejected before JSON parsing.
pub const MAX_EVENT_SIZE: usize = 1024 * 1024;

/// Largest WebSocket frame or message the transport will read, in bytes
///
/// Frames between `MAX_EVENT_SIZE` and this limit are answered with an
/// error event. Anything larger fails the WebSocket itself and closes the
/// connection.
pub const MAX_TRANSPORT_SIZE: usize = 4 * 1024 * 1024;

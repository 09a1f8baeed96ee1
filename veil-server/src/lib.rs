//! Veil relay server library
//!
//! This library exposes the server's modules for the `veild` binary and for
//! integration testing.

pub mod args;
pub mod connection;
pub mod connections;
pub mod constants;
pub mod directory;
pub mod error;
pub mod handlers;
pub mod history;
pub mod router;
pub mod server;
pub mod state;

pub use server::Server;
pub use state::RelayState;

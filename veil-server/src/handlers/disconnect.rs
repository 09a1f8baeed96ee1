//! Cleanup when a connection ends

use tracing::{debug, info};

use veil_common::protocol::ServerEvent;

use super::HandlerContext;

/// Handle the end of a connection
///
/// Drops the outbound queue and frees the username, if any. Remaining
/// connections only hear about it when a username was actually freed.
pub async fn handle_disconnect(ctx: &HandlerContext<'_>) {
    let state = ctx.state;
    state.connections.disconnect(ctx.connection).await;

    // Held so this snapshot cannot overtake one from a concurrent registration
    let _sequence = state.router.lock_routing().await;

    let Some(username) = state.directory.deregister(ctx.connection).await else {
        debug!(connection = %ctx.connection, "unregistered connection closed");
        return;
    };

    let snapshot = state.directory.snapshot().await;
    let online = snapshot.len();
    state
        .connections
        .broadcast(ServerEvent::UserListUpdate(snapshot))
        .await;

    info!(connection = %ctx.connection, %username, online, "user left");
}

//! Handler for the register event

use tracing::{debug, info};

use veil_common::protocol::{HistoryEntry, ServerEvent};
use veil_common::validators::validate_required;

use super::HandlerContext;
use crate::error::ValidationError;

/// Handle a register event
///
/// On success every connection receives the new directory snapshot, then
/// the caller alone receives its history. On failure only the caller hears
/// about it and may try again.
pub async fn handle_register(
    username: Option<String>,
    public_key: Option<String>,
    ctx: &HandlerContext<'_>,
) {
    let (Ok(username), Ok(public_key)) = (
        validate_required(username.as_deref()),
        validate_required(public_key.as_deref()),
    ) else {
        return ctx
            .send_error(&ValidationError::RegistrationFields.into())
            .await;
    };

    let state = ctx.state;

    // Messages routed while this guard is held wait for the replay below,
    // so each one lands either in the history or in the live queue.
    let sequence = state.router.lock_routing().await;

    let snapshot = match state
        .directory
        .register(ctx.connection, username, public_key)
        .await
    {
        Ok(snapshot) => snapshot,
        Err(e) => {
            drop(sequence);
            debug!(connection = %ctx.connection, username, error = %e, "registration refused");
            return ctx.send_error(&e).await;
        }
    };

    let online = snapshot.len();
    state
        .connections
        .broadcast(ServerEvent::UserListUpdate(snapshot))
        .await;

    let history: Vec<HistoryEntry> = state
        .history
        .query_for_user(username)
        .await
        .into_iter()
        .map(HistoryEntry::from)
        .collect();
    let replayed = history.len();
    ctx.send(ServerEvent::ChatHistory(history)).await;

    drop(sequence);

    info!(connection = %ctx.connection, username, online, replayed, "user registered");
}

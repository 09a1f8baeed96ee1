//! Handler for the private_message event

use tracing::debug;

use super::HandlerContext;

/// Handle a private_message event
///
/// Routing failures go back to the sender only; nothing is stored.
pub async fn handle_private_message(
    to: Option<String>,
    message: Option<String>,
    ctx: &HandlerContext<'_>,
) {
    if let Err(e) = ctx
        .state
        .router
        .send(ctx.connection, to.as_deref(), message.as_deref())
        .await
    {
        debug!(connection = %ctx.connection, error = %e, "private message refused");
        ctx.send_error(&e).await;
    }
}

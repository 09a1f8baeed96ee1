//! Client connection handling

use std::io;
use std::net::SocketAddr;

use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::protocol::WebSocketConfig;
use tokio_tungstenite::tungstenite::{self, Message};
use tracing::{debug, trace, warn};

use veil_common::MAX_TRANSPORT_SIZE;
use veil_common::io::{read_event, send_event};
use veil_common::protocol::{ClientEvent, ServerEvent};

use crate::constants::*;
use crate::handlers::{self, HandlerContext};
use crate::state::RelayState;

/// Handle a client connection on a freshly accepted socket
pub async fn handle_connection(
    socket: TcpStream,
    peer_addr: SocketAddr,
    state: RelayState,
) -> io::Result<()> {
    let ws_stream = tokio_tungstenite::accept_async_with_config(socket, Some(transport_config()))
        .await
        .map_err(|e| io::Error::other(format!("{ERR_HANDSHAKE}: {e}")))?;

    handle_connection_inner(ws_stream, peer_addr, state).await
}

/// WebSocket limits for client connections
pub fn transport_config() -> WebSocketConfig {
    WebSocketConfig::default()
        .max_message_size(Some(MAX_TRANSPORT_SIZE))
        .max_frame_size(Some(MAX_TRANSPORT_SIZE))
}

/// Inner connection handler that works with any WebSocket stream
///
/// Runs until the peer closes, the transport fails, or an outbound write
/// fails. Disconnect cleanup runs in every case.
pub async fn handle_connection_inner<S>(
    ws_stream: S,
    peer_addr: SocketAddr,
    state: RelayState,
) -> io::Result<()>
where
    S: Stream<Item = Result<Message, tungstenite::Error>>
        + Sink<Message, Error = tungstenite::Error>
        + Unpin,
{
    let (mut sink, mut stream) = ws_stream.split();
    let (connection, mut rx) = state.connections.connect().await;
    let ctx = HandlerContext::new(connection, &state);

    debug!(%connection, %peer_addr, "connected");

    let result = loop {
        tokio::select! {
            // Incoming client events
            received = read_event::<_, ClientEvent>(&mut stream) => {
                match received {
                    Ok(Some(event)) => handle_client_event(event, &ctx).await,
                    Ok(None) => break Ok(()),
                    Err(e) if e.is_transport() => break Err(io::Error::other(e)),
                    Err(e) => {
                        warn!(%connection, %peer_addr, error = %e, "{WARN_REJECTED_FRAME}");
                        ctx.send(ServerEvent::error(ERR_INVALID_EVENT)).await;
                    }
                }
            }

            // Outgoing events queued by any handler
            outbound = rx.recv() => {
                match outbound {
                    Some(event) => {
                        trace!(%connection, event = event.name(), "sending");
                        if let Err(e) = send_event(&mut sink, &event).await {
                            break Err(io::Error::other(e));
                        }
                    }
                    None => break Ok(()),
                }
            }
        }
    };

    handlers::handle_disconnect(&ctx).await;
    let _ = sink.close().await;

    debug!(%connection, %peer_addr, "disconnected");
    result
}

/// Dispatch one client event to its handler
async fn handle_client_event(event: ClientEvent, ctx: &HandlerContext<'_>) {
    trace!(connection = %ctx.connection, event = event.name(), "received");
    match event {
        ClientEvent::Register {
            username,
            public_key,
        } => handlers::handle_register(username, public_key, ctx).await,
        ClientEvent::PrivateMessage { to, message } => {
            handlers::handle_private_message(to, message, ctx).await
        }
    }
}

//! Listener and accept loop

use std::future::Future;
use std::io;
use std::net::SocketAddr;

use tokio::net::{TcpListener, ToSocketAddrs};
use tracing::{debug, info, warn};

use crate::connection::handle_connection;
use crate::constants::*;
use crate::state::RelayState;

/// A bound relay server
pub struct Server {
    listener: TcpListener,
    state: RelayState,
}

impl Server {
    /// Bind a listener with fresh relay state
    pub async fn bind(addr: impl ToSocketAddrs) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self::new(listener, RelayState::new()))
    }

    pub fn new(listener: TcpListener, state: RelayState) -> Self {
        Self { listener, state }
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Handle onto the shared state, for inspection
    pub fn state(&self) -> &RelayState {
        &self.state
    }

    /// Accept connections until `shutdown` resolves
    ///
    /// Each connection runs on its own task. Tasks already running are not
    /// waited for; they end with the runtime.
    pub async fn run_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let Server { listener, state } = self;
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    let online = state.directory.len().await;
                    info!(online, "{MSG_SHUTDOWN_RECEIVED}");
                    break;
                }
                accepted = listener.accept() => {
                    match accepted {
                        Ok((socket, peer_addr)) => {
                            let state = state.clone();
                            tokio::spawn(async move {
                                if let Err(e) = handle_connection(socket, peer_addr, state).await {
                                    log_connection_error(&e, peer_addr);
                                }
                            });
                        }
                        Err(e) => warn!(error = %e, "{ERR_ACCEPT}"),
                    }
                }
            }
        }
    }
}

/// Log a connection error, keeping routine disconnects and probes out of warn
fn log_connection_error(error: &io::Error, peer_addr: SocketAddr) {
    let message = error.to_string();

    // Scanners and plain HTTP requests fail the upgrade
    if message.starts_with(ERR_HANDSHAKE) {
        debug!(%peer_addr, error = %error, "{ERR_CONNECTION}");
        return;
    }

    // Peers that vanish without a close frame
    if message.contains("Connection reset") || message.contains("without closing handshake") {
        debug!(%peer_addr, error = %error, "{ERR_CONNECTION}");
        return;
    }

    warn!(%peer_addr, error = %error, "{ERR_CONNECTION}");
}

//! Shared helpers for relay integration tests

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::time::timeout;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use veil_common::io::{read_event, send_event};
use veil_common::protocol::{ClientEvent, ServerEvent};
use veil_server::{RelayState, Server};

pub type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// How long to wait for an event that should arrive
const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// How long to wait before concluding that nothing will arrive
const QUIET_PERIOD: Duration = Duration::from_millis(200);

/// A relay running on an ephemeral localhost port
pub struct TestServer {
    pub addr: SocketAddr,
    pub state: RelayState,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        let server = Server::bind("127.0.0.1:0").await.unwrap();
        let addr = server.local_addr().unwrap();
        let state = server.state().clone();

        let (shutdown, stop) = oneshot::channel::<()>();
        tokio::spawn(server.run_until(async {
            let _ = stop.await;
        }));

        Self {
            addr,
            state,
            shutdown: Some(shutdown),
        }
    }

    /// Open a WebSocket connection without registering
    ///
    /// Returns once the relay has started tracking the connection, so it is
    /// guaranteed to see later broadcasts.
    pub async fn connect(&self) -> Client {
        let before = self.state.connections.len().await;
        let url = format!("ws://{}/", self.addr);
        let (client, _response) = connect_async(url).await.unwrap();

        timeout(RECV_TIMEOUT, async {
            while self.state.connections.len().await <= before {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("relay never picked up the connection");
        client
    }

    /// Open a connection and register, consuming the two registration events
    ///
    /// Returns the replayed history.
    pub async fn register(&self, username: &str, public_key: &str) -> (Client, ServerEvent) {
        let mut client = self.connect().await;
        send(&mut client, ClientEvent::register(username, public_key)).await;
        match recv(&mut client).await {
            ServerEvent::UserListUpdate(_) => {}
            other => panic!("Expected user_list_update, got {other:?}"),
        }
        let history = recv(&mut client).await;
        assert!(matches!(history, ServerEvent::ChatHistory(_)));
        (client, history)
    }

    /// Wait until the directory holds exactly `count` users
    pub async fn wait_for_users(&self, count: usize) {
        timeout(RECV_TIMEOUT, async {
            while self.state.directory.len().await != count {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("directory never reached expected size");
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

pub async fn send(client: &mut Client, event: ClientEvent) {
    send_event(client, &event).await.unwrap();
}

/// Next server event, failing the test if none arrives in time
pub async fn recv(client: &mut Client) -> ServerEvent {
    timeout(RECV_TIMEOUT, read_event(client))
        .await
        .expect("timed out waiting for server event")
        .unwrap()
        .expect("connection closed unexpectedly")
}

/// Assert that no event arrives within the quiet period
pub async fn assert_silent(client: &mut Client) {
    let result = timeout(QUIET_PERIOD, read_event::<_, ServerEvent>(client)).await;
    assert!(result.is_err(), "Expected no event, got {result:?}");
}

pub fn delivery(from: &str, message: &str) -> ServerEvent {
    ServerEvent::NewPrivateMessage {
        from: from.to_string(),
        message: message.to_string(),
    }
}

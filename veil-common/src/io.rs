//! Event codec for WebSocket transports
//!
//! This module sits between the protocol event types (`ClientEvent`,
//! `ServerEvent`) and WebSocket frames. One frame carries one JSON event.
//! Both the relay and Rust clients use these helpers.

use futures_util::{Sink, SinkExt, Stream, StreamExt};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_tungstenite::tungstenite::{self, Message};

use crate::MAX_EVENT_SIZE;

/// Errors produced while encoding, decoding, or moving events
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// Payload was not a valid event document
    #[error("invalid event: {0}")]
    Json(#[from] serde_json::Error),
    /// Payload exceeded `MAX_EVENT_SIZE`
    #[error("event too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },
    /// The underlying WebSocket failed
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),
}

impl EventError {
    /// Whether the error came from the connection rather than the payload
    ///
    /// Payload errors leave the connection usable; transport errors do not.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::WebSocket(_))
    }
}

/// Encode an event as a text frame
pub fn encode_event<T: Serialize>(event: &T) -> Result<Message, EventError> {
    let json = serde_json::to_string(event)?;
    Ok(Message::Text(json.into()))
}

/// Decode an event from a frame payload, enforcing the size limit
pub fn decode_event<T: DeserializeOwned>(payload: &[u8]) -> Result<T, EventError> {
    if payload.len() > MAX_EVENT_SIZE {
        return Err(EventError::TooLarge {
            size: payload.len(),
            max: MAX_EVENT_SIZE,
        });
    }
    Ok(serde_json::from_slice(payload)?)
}

/// Send one event over a WebSocket sink
pub async fn send_event<S, T>(sink: &mut S, event: &T) -> Result<(), EventError>
where
    S: Sink<Message, Error = tungstenite::Error> + Unpin,
    T: Serialize,
{
    let frame = encode_event(event)?;
    sink.send(frame).await?;
    Ok(())
}

/// Read the next event from a WebSocket stream
///
/// Control frames are skipped. Returns `Ok(None)` when the peer closes the
/// connection or the stream ends. Text and binary frames are both accepted;
/// binary payloads must hold UTF-8 JSON.
pub async fn read_event<S, T>(stream: &mut S) -> Result<Option<T>, EventError>
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
    T: DeserializeOwned,
{
    while let Some(frame) = stream.next().await {
        match frame? {
            Message::Text(text) => return decode_event(text.as_bytes()).map(Some),
            Message::Binary(data) => return decode_event(&data).map(Some),
            Message::Close(_) => return Ok(None),
            Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => continue,
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{ClientEvent, ServerEvent};
    use std::collections::VecDeque;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    /// In-memory WebSocket stand-in
    struct MockWebSocket {
        incoming: VecDeque<Result<Message, tungstenite::Error>>,
        outgoing: Vec<Message>,
    }

    impl MockWebSocket {
        fn new(messages: Vec<Message>) -> Self {
            Self {
                incoming: messages.into_iter().map(Ok).collect(),
                outgoing: Vec::new(),
            }
        }
    }

    impl Stream for MockWebSocket {
        type Item = Result<Message, tungstenite::Error>;

        fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
            Poll::Ready(self.incoming.pop_front())
        }
    }

    impl Sink<Message> for MockWebSocket {
        type Error = tungstenite::Error;

        fn poll_ready(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
        ) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn start_send(mut self: Pin<&mut Self>, item: Message) -> Result<(), Self::Error> {
            self.outgoing.push(item);
            Ok(())
        }

        fn poll_flush(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
        ) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn poll_close(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
        ) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
    }

    fn text(json: &str) -> Message {
        Message::Text(json.to_string().into())
    }

    #[tokio::test]
    async fn test_read_text_event() {
        let mut ws = MockWebSocket::new(vec![text(
            r#"{"event":"register","data":{"username":"alice","public_key":"kA"}}"#,
        )]);

        let event: Option<ClientEvent> = read_event(&mut ws).await.unwrap();
        assert_eq!(event, Some(ClientEvent::register("alice", "kA")));
    }

    #[tokio::test]
    async fn test_read_binary_event() {
        let payload = br#"{"event":"private_message","data":{"to":"bob","message":"x"}}"#;
        let mut ws = MockWebSocket::new(vec![Message::Binary(payload.to_vec().into())]);

        let event: Option<ClientEvent> = read_event(&mut ws).await.unwrap();
        assert_eq!(event, Some(ClientEvent::private_message("bob", "x")));
    }

    #[tokio::test]
    async fn test_read_skips_control_frames() {
        let mut ws = MockWebSocket::new(vec![
            Message::Ping(vec![1u8, 2, 3].into()),
            Message::Pong(Vec::<u8>::new().into()),
            text(r#"{"event":"error","data":{"message":"nope"}}"#),
        ]);

        let event: Option<ServerEvent> = read_event(&mut ws).await.unwrap();
        assert_eq!(event, Some(ServerEvent::error("nope")));
    }

    #[tokio::test]
    async fn test_read_returns_none_on_close() {
        let mut ws = MockWebSocket::new(vec![Message::Close(None)]);
        let event: Option<ClientEvent> = read_event(&mut ws).await.unwrap();
        assert!(event.is_none());

        let mut empty = MockWebSocket::new(vec![]);
        let event: Option<ClientEvent> = read_event(&mut empty).await.unwrap();
        assert!(event.is_none());
    }

    #[tokio::test]
    async fn test_malformed_event_is_payload_error() {
        let mut ws = MockWebSocket::new(vec![
            text("not json"),
            text(r#"{"event":"register","data":{"username":"a","public_key":"k"}}"#),
        ]);

        let err = read_event::<_, ClientEvent>(&mut ws).await.unwrap_err();
        assert!(matches!(err, EventError::Json(_)));
        assert!(!err.is_transport());

        // The stream stays usable after a bad payload
        let event: Option<ClientEvent> = read_event(&mut ws).await.unwrap();
        assert_eq!(event, Some(ClientEvent::register("a", "k")));
    }

    #[test]
    fn test_oversized_payload_rejected() {
        let payload = vec![b' '; MAX_EVENT_SIZE + 1];
        let err = decode_event::<ClientEvent>(&payload).unwrap_err();
        assert!(matches!(err, EventError::TooLarge { .. }));
        assert!(err.to_string().contains("too large"));
    }

    #[tokio::test]
    async fn test_send_event_writes_text_frame() {
        let mut ws = MockWebSocket::new(vec![]);
        send_event(&mut ws, &ServerEvent::error("boom")).await.unwrap();

        assert_eq!(ws.outgoing.len(), 1);
        match &ws.outgoing[0] {
            Message::Text(body) => {
                let value: serde_json::Value = serde_json::from_str(body.as_str()).unwrap();
                assert_eq!(value["event"], "error");
                assert_eq!(value["data"]["message"], "boom");
            }
            other => panic!("Expected text frame, got {other:?}"),
        }
    }
}

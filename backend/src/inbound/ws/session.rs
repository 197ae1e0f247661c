//! Per-connection WebSocket handler.
//!
//! Keeps WebSocket framing and heartbeats at the edge while deferring fan-out
//! to the shared [`ChatHub`]. The public contract pings every 5s and considers
//! a connection idle after 10s without client traffic. Tests shorten these
//! intervals to speed up feedback; adjust the constants below if SLAs change
//! so clients and intermediaries stay aligned.

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_ws::{CloseCode, CloseReason, Closed, Message, MessageStream, ProtocolError, Session};
use async_trait::async_trait;
use tokio::time;
use tracing::warn;
use uuid::Uuid;

use super::hub::{ChatHub, ChatSink, SinkClosed};

/// Time between heartbeats to the client (5s in production, shorter in tests).
#[cfg(not(test))]
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
#[cfg(test)]
const HEARTBEAT_INTERVAL: Duration = Duration::from_millis(50);

/// Max idle time before disconnecting the client (10s in production, shorter in tests).
#[cfg(not(test))]
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);
#[cfg(test)]
const CLIENT_TIMEOUT: Duration = Duration::from_millis(100);

/// Hub-facing handle wrapping an `actix_ws` session.
///
/// `Session` is a cheap clone over the connection's command channel, so the
/// hub can hold one copy while the select loop drives another.
struct SessionSink {
    session: tokio::sync::Mutex<Session>,
}

#[async_trait]
impl ChatSink for SessionSink {
    async fn send(&self, text: &str) -> Result<(), SinkClosed> {
        self.session
            .lock()
            .await
            .text(text.to_owned())
            .await
            .map_err(|Closed| SinkClosed)
    }
}

pub(super) async fn handle_ws_session(hub: Arc<ChatHub>, session: Session, stream: MessageStream) {
    let sink = Arc::new(SessionSink {
        session: tokio::sync::Mutex::new(session.clone()),
    });
    let connection_id = hub.connect(sink).await;

    WsSession::new(hub.clone(), connection_id)
        .run(session, stream)
        .await;

    // Every exit path lands here, so a dropped connection can never leak a
    // registry entry.
    hub.disconnect(connection_id).await;
}

enum SessionError {
    ClientClosed(Option<CloseReason>),
    StreamClosed,
    HeartbeatTimeout,
    Protocol(ProtocolError),
    Network(Closed),
}

enum CloseAction {
    None,
    Close(Option<CloseReason>),
}

struct WsSession {
    hub: Arc<ChatHub>,
    connection_id: Uuid,
}

impl WsSession {
    fn new(hub: Arc<ChatHub>, connection_id: Uuid) -> Self {
        Self { hub, connection_id }
    }

    async fn run(&self, mut session: Session, mut stream: MessageStream) {
        let mut last_heartbeat = Instant::now();
        let mut heartbeat = time::interval(HEARTBEAT_INTERVAL);

        loop {
            let result = tokio::select! {
                _ = heartbeat.tick() => {
                    self.handle_heartbeat_tick(&mut session, &last_heartbeat).await
                }
                message = stream.recv() => {
                    self.handle_stream_message(&mut session, &mut last_heartbeat, message)
                        .await
                }
            };

            if let Err(error) = result {
                self.log_shutdown_reason(&error);
                let close_action = close_action_for(&error);
                close_session_if_needed(session, close_action).await;
                return;
            }
        }
    }

    async fn handle_heartbeat_tick(
        &self,
        session: &mut Session,
        last_heartbeat: &Instant,
    ) -> Result<(), SessionError> {
        if Instant::now().duration_since(*last_heartbeat) > CLIENT_TIMEOUT {
            return Err(SessionError::HeartbeatTimeout);
        }

        session.ping(b"").await.map_err(SessionError::Network)
    }

    async fn handle_stream_message(
        &self,
        session: &mut Session,
        last_heartbeat: &mut Instant,
        message: Option<Result<Message, ProtocolError>>,
    ) -> Result<(), SessionError> {
        let Some(message) = message else {
            return Err(SessionError::StreamClosed);
        };

        match message {
            Ok(message) => self.handle_message(session, last_heartbeat, message).await,
            Err(error) => Err(SessionError::Protocol(error)),
        }
    }

    async fn handle_message(
        &self,
        session: &mut Session,
        last_heartbeat: &mut Instant,
        message: Message,
    ) -> Result<(), SessionError> {
        match message {
            Message::Ping(payload) => {
                *last_heartbeat = Instant::now();
                session
                    .pong(&payload)
                    .await
                    .map_err(SessionError::Network)?;
                Ok(())
            }
            Message::Text(text) => {
                *last_heartbeat = Instant::now();
                // Fan out to every registered client, this one included.
                self.hub.broadcast(text.as_ref()).await;
                Ok(())
            }
            Message::Pong(_) | Message::Binary(_) | Message::Continuation(_) | Message::Nop => {
                *last_heartbeat = Instant::now();
                Ok(())
            }
            Message::Close(reason) => Err(SessionError::ClientClosed(reason)),
        }
    }

    fn log_shutdown_reason(&self, error: &SessionError) {
        match error {
            SessionError::HeartbeatTimeout => {
                warn!(
                    connection_id = %self.connection_id,
                    "WebSocket heartbeat timeout; closing connection"
                );
            }
            SessionError::Protocol(error) => {
                warn!(
                    connection_id = %self.connection_id,
                    error = %error,
                    "WebSocket protocol error"
                );
            }
            SessionError::Network(error) => {
                warn!(
                    connection_id = %self.connection_id,
                    error = %error,
                    "WebSocket send failed; closing connection"
                );
            }
            SessionError::ClientClosed(_) | SessionError::StreamClosed => {}
        }
    }
}

fn close_action_for(error: &SessionError) -> CloseAction {
    match error {
        SessionError::HeartbeatTimeout => CloseAction::Close(Some(CloseReason {
            code: CloseCode::Normal,
            description: Some("heartbeat timeout".to_owned()),
        })),
        SessionError::Protocol(_) => CloseAction::Close(Some(CloseReason {
            code: CloseCode::Protocol,
            description: Some("protocol error".to_owned()),
        })),
        SessionError::ClientClosed(reason) => CloseAction::Close(reason.clone()),
        SessionError::StreamClosed | SessionError::Network(_) => CloseAction::None,
    }
}

async fn close_session_if_needed(session: Session, close_action: CloseAction) {
    if let CloseAction::Close(reason) = close_action {
        if let Err(error) = session.close(reason).await {
            warn!(error = %error, "Failed to close WebSocket session");
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;

//! Broadcast hub: the process-local registry of connected chat clients.
//!
//! Messages are transient text; nothing is persisted and there are no rooms.
//! A broadcast runs under the registry lock, so delivery order equals
//! arrival order within the process.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

/// Subscriber send failure: the connection is gone.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("chat sink closed")]
pub struct SinkClosed;

/// Handle to one connected client.
///
/// The production implementation wraps an `actix_ws` session; tests use
/// recording stubs.
#[async_trait]
pub trait ChatSink: Send + Sync {
    /// Deliver one text frame to the client.
    async fn send(&self, text: &str) -> Result<(), SinkClosed>;
}

/// Registry of connected sinks keyed by connection id.
#[derive(Default)]
pub struct ChatHub {
    sinks: Mutex<HashMap<Uuid, Arc<dyn ChatSink>>>,
}

impl ChatHub {
    /// Create an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sink and return its connection id.
    pub async fn connect(&self, sink: Arc<dyn ChatSink>) -> Uuid {
        let id = Uuid::new_v4();
        self.sinks.lock().await.insert(id, sink);
        debug!(connection_id = %id, "chat client connected");
        id
    }

    /// Remove a sink. Safe to call twice; the second call is a no-op.
    pub async fn disconnect(&self, id: Uuid) {
        if self.sinks.lock().await.remove(&id).is_some() {
            debug!(connection_id = %id, "chat client disconnected");
        }
    }

    /// Number of currently registered sinks.
    pub async fn connected(&self) -> usize {
        self.sinks.lock().await.len()
    }

    /// Deliver a text frame to every registered sink, the sender included.
    ///
    /// Per-sink failures are logged and skipped; one dead connection never
    /// blocks delivery to the rest.
    pub async fn broadcast(&self, text: &str) {
        let sinks = self.sinks.lock().await;
        for (id, sink) in sinks.iter() {
            if let Err(error) = sink.send(text).await {
                warn!(connection_id = %id, %error, "chat delivery skipped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for broadcast fan-out and lifecycle.
    use std::sync::Mutex as StdMutex;

    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        received: StdMutex<Vec<String>>,
        closed: std::sync::atomic::AtomicBool,
    }

    impl RecordingSink {
        fn received(&self) -> Vec<String> {
            self.received.lock().expect("received lock").clone()
        }

        fn close(&self) {
            self.closed.store(true, std::sync::atomic::Ordering::Relaxed);
        }
    }

    #[async_trait]
    impl ChatSink for RecordingSink {
        async fn send(&self, text: &str) -> Result<(), SinkClosed> {
            if self.closed.load(std::sync::atomic::Ordering::Relaxed) {
                return Err(SinkClosed);
            }
            self.received
                .lock()
                .expect("received lock")
                .push(text.to_owned());
            Ok(())
        }
    }

    #[tokio::test]
    async fn broadcast_reaches_everyone_including_the_sender() {
        let hub = ChatHub::new();
        let alice = Arc::new(RecordingSink::default());
        let bob = Arc::new(RecordingSink::default());
        hub.connect(alice.clone()).await;
        hub.connect(bob.clone()).await;

        // Alice sends; the hub echoes to her as well as to Bob.
        hub.broadcast("hello").await;

        assert_eq!(bob.received(), vec!["hello".to_owned()]);
        assert_eq!(alice.received(), vec!["hello".to_owned()]);
    }

    #[tokio::test]
    async fn disconnected_sinks_receive_nothing() {
        let hub = ChatHub::new();
        let staying = Arc::new(RecordingSink::default());
        let leaving = Arc::new(RecordingSink::default());
        hub.connect(staying.clone()).await;
        let leaving_id = hub.connect(leaving.clone()).await;

        hub.disconnect(leaving_id).await;
        hub.broadcast("after departure").await;

        assert_eq!(staying.received(), vec!["after departure".to_owned()]);
        assert!(leaving.received().is_empty());
        assert_eq!(hub.connected().await, 1);
    }

    #[tokio::test]
    async fn dead_sink_does_not_block_the_rest() {
        let hub = ChatHub::new();
        let dead = Arc::new(RecordingSink::default());
        let alive = Arc::new(RecordingSink::default());
        hub.connect(dead.clone()).await;
        hub.connect(alive.clone()).await;
        dead.close();

        hub.broadcast("still flowing").await;

        assert_eq!(alive.received(), vec!["still flowing".to_owned()]);
        assert!(dead.received().is_empty());
    }

    #[tokio::test]
    async fn double_disconnect_is_a_no_op() {
        let hub = ChatHub::new();
        let sink = Arc::new(RecordingSink::default());
        let id = hub.connect(sink).await;
        hub.disconnect(id).await;
        hub.disconnect(id).await;
        assert_eq!(hub.connected().await, 0);
    }
}

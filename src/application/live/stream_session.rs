//! StreamSession - one subscriber's lifecycle: Connecting → Streaming → Closed.
//!
//! The session yields the current snapshot first, then waits on whichever
//! comes first: a payload in its mailbox or the shutdown signal. Dropping
//! the session (the client went away and the response stream was dropped)
//! unregisters it, so cleanup runs on every exit path.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use super::subscriber_registry::{Payload, SubscriberId, SubscriberRegistry};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Streaming,
    Closed,
}

enum Wake {
    Message(Option<Payload>),
    Cancelled,
}

/// A registered stream subscriber.
#[derive(Debug)]
pub struct StreamSession {
    id: SubscriberId,
    registry: Arc<SubscriberRegistry>,
    mailbox: mpsc::Receiver<Payload>,
    shutdown: watch::Receiver<bool>,
    initial: Option<Payload>,
    state: SessionState,
}

impl StreamSession {
    pub(crate) fn new(
        id: SubscriberId,
        registry: Arc<SubscriberRegistry>,
        mailbox: mpsc::Receiver<Payload>,
        shutdown: watch::Receiver<bool>,
        initial: Option<Payload>,
    ) -> Self {
        Self {
            id,
            registry,
            mailbox,
            shutdown,
            initial,
            state: SessionState::Connecting,
        }
    }

    pub fn id(&self) -> &SubscriberId {
        &self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Next frame to send to the client, or `None` once the session is closed.
    pub async fn next_frame(&mut self) -> Option<Payload> {
        if self.state == SessionState::Connecting {
            self.state = SessionState::Streaming;
            if let Some(initial) = self.initial.take() {
                return Some(initial);
            }
        }

        if self.state == SessionState::Closed {
            return None;
        }

        let wake = tokio::select! {
            biased;
            () = cancelled(&mut self.shutdown) => Wake::Cancelled,
            message = self.mailbox.recv() => Wake::Message(message),
        };

        match wake {
            Wake::Message(Some(payload)) => Some(payload),
            Wake::Message(None) => {
                tracing::debug!(subscriber_id = %self.id, "Mailbox closed, ending stream");
                self.close();
                None
            }
            Wake::Cancelled => {
                tracing::debug!(subscriber_id = %self.id, "Shutdown signalled, ending stream");
                self.close();
                None
            }
        }
    }

    fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        self.state = SessionState::Closed;
        self.mailbox.close();
        if self.registry.unregister(&self.id) {
            tracing::info!(
                subscriber_id = %self.id,
                remaining = self.registry.count(),
                "Stream subscriber disconnected"
            );
        }
    }
}

impl Drop for StreamSession {
    fn drop(&mut self) {
        self.close();
    }
}

/// Resolves once shutdown has been signalled or the signal source is gone.
async fn cancelled(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            return;
        }
    }
}

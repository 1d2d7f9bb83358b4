//! Subscriber registry for live draw streaming.
//!
//! Every open stream owns one bounded mailbox. The registry keeps the only
//! sending half of each mailbox, so removing a subscriber closes its
//! mailbox as soon as the receiver has drained what is already queued.
//!
//! # Overflow Policy
//!
//! Delivery never waits. When a mailbox is full the new payload is dropped
//! for that subscriber only, and the older unread payloads stay queued.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::mpsc::{self, error::TrySendError};
use uuid::Uuid;

/// A serialized snapshot, shared by every mailbox it is delivered to.
pub type Payload = Arc<str>;

/// Default number of pending payloads per subscriber.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 10;

/// Unique identifier for a stream subscriber.
///
/// Generated server-side when a client connects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriberId(Uuid);

impl SubscriberId {
    /// Create a new random subscriber ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriberId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-publish delivery tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanOutReport {
    /// Payload enqueued.
    pub delivered: usize,
    /// Mailbox was full; payload dropped for that subscriber.
    pub dropped: usize,
    /// Receiver already gone; subscriber is on its way out.
    pub closed: usize,
}

/// Tracks the live set of stream subscribers and their mailboxes.
///
/// # Thread Safety
///
/// A single `RwLock` guards the subscriber map. It is a std lock because
/// stream teardown happens in `Drop`, where nothing can be awaited; it is
/// only ever held for map operations and non-blocking sends.
#[derive(Debug)]
pub struct SubscriberRegistry {
    mailboxes: RwLock<HashMap<SubscriberId, mpsc::Sender<Payload>>>,
    capacity: usize,
}

impl SubscriberRegistry {
    /// Create a registry whose mailboxes hold up to `capacity` payloads.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            mailboxes: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Create with default capacity (10 payloads).
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_MAILBOX_CAPACITY)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Register a new subscriber.
    ///
    /// Returns the handle used for removal and the receiving end of its
    /// mailbox.
    pub fn register(&self) -> (SubscriberId, mpsc::Receiver<Payload>) {
        let (tx, rx) = mpsc::channel(self.capacity);
        let id = SubscriberId::new();
        self.write().insert(id.clone(), tx);
        (id, rx)
    }

    /// Remove a subscriber and close its mailbox.
    ///
    /// Returns `false` if the subscriber was already gone.
    pub fn unregister(&self, id: &SubscriberId) -> bool {
        self.write().remove(id).is_some()
    }

    /// Number of live subscribers. Best-effort under concurrent churn.
    pub fn count(&self) -> usize {
        self.read().len()
    }

    /// Offer `payload` to every registered mailbox without waiting.
    pub fn deliver(&self, payload: &Payload) -> FanOutReport {
        let mailboxes = self.read();
        let mut report = FanOutReport::default();

        for (id, tx) in mailboxes.iter() {
            match tx.try_send(payload.clone()) {
                Ok(()) => report.delivered += 1,
                Err(TrySendError::Full(_)) => {
                    report.dropped += 1;
                    tracing::warn!(subscriber_id = %id, "Subscriber mailbox full, dropping update");
                }
                Err(TrySendError::Closed(_)) => {
                    report.closed += 1;
                    tracing::debug!(subscriber_id = %id, "Subscriber mailbox closed, skipping");
                }
            }
        }

        report
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<SubscriberId, mpsc::Sender<Payload>>> {
        self.mailboxes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<SubscriberId, mpsc::Sender<Payload>>> {
        self.mailboxes.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SubscriberRegistry {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

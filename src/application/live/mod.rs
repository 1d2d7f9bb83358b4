//! Live draw core.
//!
//! One [`LiveDrawService`] owns the current snapshot, the set of stream
//! subscribers, and the archival trigger. HTTP handlers only talk to it.

mod archival_gate;
mod broadcaster;
mod live_service;
mod snapshot_store;
mod stream_session;
mod subscriber_registry;

pub use archival_gate::{ArchivalGate, GateDecision, DEFAULT_COOLDOWN_SECS};
pub use broadcaster::Broadcaster;
pub use live_service::{LiveDrawService, LiveServiceConfig, SubmitOutcome};
pub use snapshot_store::SnapshotStore;
pub use stream_session::{SessionState, StreamSession};
pub use subscriber_registry::{
    FanOutReport, Payload, SubscriberId, SubscriberRegistry, DEFAULT_MAILBOX_CAPACITY,
};

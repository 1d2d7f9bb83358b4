//! Broadcaster - serialize once, fan out to every subscriber.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::lottery::Snapshot;

use super::subscriber_registry::{FanOutReport, Payload, SubscriberRegistry};

/// Pushes snapshots to all registered subscribers.
///
/// Delivery is lossy: a slow subscriber loses the update rather than
/// delaying ingestion or the other subscribers.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    registry: Arc<SubscriberRegistry>,
}

impl Broadcaster {
    pub fn new(registry: Arc<SubscriberRegistry>) -> Self {
        Self { registry }
    }

    /// Stamps the current viewer count and serializes the snapshot.
    pub fn render(&self, snapshot: Snapshot) -> Result<Payload, DomainError> {
        let stamped = snapshot.with_view_count(self.registry.count());
        serde_json::to_string(&stamped)
            .map(Payload::from)
            .map_err(|e| {
                DomainError::new(ErrorCode::SerializationFailed, e.to_string())
                    .with_detail("date", stamped.date.as_str())
            })
    }

    /// Publish a snapshot to every current subscriber.
    ///
    /// Returns `None` when the snapshot could not be serialized; the
    /// broadcast is skipped in that case.
    pub fn publish(&self, snapshot: Snapshot) -> Option<FanOutReport> {
        let payload = match self.render(snapshot) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    code = %e.code,
                    "Failed to serialize snapshot, skipping broadcast"
                );
                return None;
            }
        };

        let report = self.registry.deliver(&payload);
        tracing::debug!(
            delivered = report.delivered,
            dropped = report.dropped,
            closed = report.closed,
            "Broadcast snapshot"
        );
        Some(report)
    }
}

//! LiveDrawService - the one object that owns the live draw state.
//!
//! Constructed once at startup and shared by `Arc` with every handler.
//! Ingest flows store → archival gate → broadcaster; streams register with
//! the subscriber registry and receive the current snapshot first.

use std::sync::Arc;

use chrono::Duration;
use tokio::sync::watch;

use crate::domain::lottery::{ArchivalWindow, Snapshot};
use crate::ports::{Clock, HistorySink};

use super::archival_gate::{ArchivalGate, GateDecision, DEFAULT_COOLDOWN_SECS};
use super::broadcaster::Broadcaster;
use super::snapshot_store::SnapshotStore;
use super::stream_session::StreamSession;
use super::subscriber_registry::{FanOutReport, SubscriberRegistry, DEFAULT_MAILBOX_CAPACITY};

/// Tunables for the live service.
#[derive(Debug, Clone)]
pub struct LiveServiceConfig {
    /// Pending payloads per subscriber before updates are dropped.
    pub mailbox_capacity: usize,
    /// Local-time window in which settled draws are archived.
    pub archival_window: ArchivalWindow,
    /// Minimum interval between successful archival evaluations.
    pub archival_cooldown: Duration,
}

impl Default for LiveServiceConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            archival_window: ArchivalWindow::default(),
            archival_cooldown: Duration::seconds(DEFAULT_COOLDOWN_SECS),
        }
    }
}

/// What happened to a submitted snapshot beyond being stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub archival: GateDecision,
    /// `None` when the broadcast was skipped.
    pub fan_out: Option<FanOutReport>,
}

/// Live draw state, subscribers, and archival trigger.
pub struct LiveDrawService {
    store: SnapshotStore,
    registry: Arc<SubscriberRegistry>,
    broadcaster: Broadcaster,
    gate: ArchivalGate,
    clock: Arc<dyn Clock>,
    shutdown: watch::Sender<bool>,
}

impl LiveDrawService {
    pub fn new(config: LiveServiceConfig, sink: Arc<dyn HistorySink>, clock: Arc<dyn Clock>) -> Self {
        let initial = match config.archival_window.local_time(clock.now()) {
            Ok(local) => Snapshot::placeholder(local),
            Err(_) => Snapshot::placeholder(clock.now()),
        };
        let registry = Arc::new(SubscriberRegistry::new(config.mailbox_capacity));
        let (shutdown, _) = watch::channel(false);

        tracing::info!(
            mailbox_capacity = registry.capacity(),
            "Live draw service initialized with placeholder snapshot"
        );

        Self {
            store: SnapshotStore::new(initial),
            broadcaster: Broadcaster::new(registry.clone()),
            registry,
            gate: ArchivalGate::new(config.archival_window, config.archival_cooldown, sink),
            clock,
            shutdown,
        }
    }

    /// Replace the current snapshot, maybe archive it, and broadcast.
    ///
    /// Archival and broadcast are best-effort; the snapshot is stored
    /// regardless of how they turn out.
    pub async fn submit(&self, snapshot: Snapshot) -> SubmitOutcome {
        tracing::info!(
            live = %snapshot.live,
            status = %snapshot.status,
            "Lottery data updated"
        );

        self.store.set(snapshot.clone()).await;
        let archival = self.gate.evaluate(&snapshot, self.clock.now()).await;
        let fan_out = self.broadcaster.publish(self.store.get().await);

        SubmitOutcome { archival, fan_out }
    }

    /// The current snapshot with an up-to-date viewer count.
    pub async fn current(&self) -> Snapshot {
        self.store.get().await.with_view_count(self.registry.count())
    }

    /// Register a new stream subscriber.
    ///
    /// The returned session's first frame is the current snapshot, counted
    /// including this subscriber.
    pub async fn subscribe(&self) -> StreamSession {
        let (id, mailbox) = self.registry.register();
        tracing::info!(
            subscriber_id = %id,
            total = self.registry.count(),
            "Stream subscriber connected"
        );

        let initial = match self.broadcaster.render(self.store.get().await) {
            Ok(payload) => Some(payload),
            Err(e) => {
                tracing::error!(error = %e, code = %e.code, "Failed to serialize initial snapshot");
                None
            }
        };

        StreamSession::new(
            id,
            self.registry.clone(),
            mailbox,
            self.shutdown.subscribe(),
            initial,
        )
    }

    pub fn viewer_count(&self) -> usize {
        self.registry.count()
    }

    /// Signal every stream session to close.
    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
        tracing::info!(subscribers = self.registry.count(), "Closing live streams");
    }
}

impl std::fmt::Debug for LiveDrawService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveDrawService")
            .field("store", &self.store)
            .field("registry", &self.registry)
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FixedClock;
    use crate::domain::lottery::HistoryRecord;
    use crate::ports::{HistoryError, InsertOutcome};
    use async_trait::async_trait;
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockSink {
        records: Mutex<Vec<HistoryRecord>>,
        fail: bool,
    }

    #[async_trait]
    impl HistorySink for MockSink {
        async fn insert_if_absent(
            &self,
            record: &HistoryRecord,
        ) -> Result<InsertOutcome, HistoryError> {
            if self.fail {
                return Err(HistoryError::Database("disk full".to_string()));
            }
            self.records.lock().unwrap().push(record.clone());
            Ok(InsertOutcome::Inserted)
        }
    }

    fn yangon(hour: u32, minute: u32) -> DateTime<Utc> {
        FixedOffset::east_opt(6 * 3600 + 30 * 60)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 15, hour, minute, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn service_at(now: DateTime<Utc>, sink: Arc<MockSink>) -> LiveDrawService {
        LiveDrawService::new(LiveServiceConfig::default(), sink, Arc::new(FixedClock(now)))
    }

    fn draw(result_430: &str) -> Snapshot {
        Snapshot {
            date: "2024-01-15".to_string(),
            live: "Y".to_string(),
            status: "On".to_string(),
            result_430: result_430.to_string(),
            ..Snapshot::default()
        }
    }

    fn decode(payload: &str) -> Snapshot {
        serde_json::from_str(payload).unwrap()
    }

    #[tokio::test]
    async fn starts_with_placeholder_snapshot() {
        let service = service_at(yangon(9, 0), Arc::new(MockSink::default()));
        let current = service.current().await;
        assert_eq!(current.status, "Off");
        assert_eq!(current.live, "--");
        assert!(current.update_time.starts_with("09:00:00"));
    }

    #[tokio::test]
    async fn current_reflects_latest_submit() {
        let service = service_at(yangon(9, 0), Arc::new(MockSink::default()));
        service.submit(draw("--")).await;

        let current = service.current().await;
        assert_eq!(current.date, "2024-01-15");
        assert_eq!(current.live, "Y");
    }

    #[tokio::test]
    async fn current_counts_live_subscribers() {
        let service = service_at(yangon(9, 0), Arc::new(MockSink::default()));
        let _a = service.subscribe().await;
        let _b = service.subscribe().await;

        assert_eq!(service.current().await.view_count, 2);
    }

    #[tokio::test]
    async fn subscriber_first_frame_includes_itself_in_count() {
        let service = service_at(yangon(9, 0), Arc::new(MockSink::default()));
        let mut session = service.subscribe().await;

        let first = decode(&session.next_frame().await.unwrap());

        assert_eq!(first.view_count, 1);
        assert_eq!(first.status, "Off");
    }

    #[tokio::test]
    async fn submit_reaches_every_subscriber() {
        let service = service_at(yangon(9, 0), Arc::new(MockSink::default()));
        let mut sessions = vec![
            service.subscribe().await,
            service.subscribe().await,
            service.subscribe().await,
        ];
        for session in sessions.iter_mut() {
            session.next_frame().await;
        }

        let outcome = service.submit(draw("--")).await;

        assert_eq!(outcome.fan_out.unwrap().delivered, 3);
        for session in sessions.iter_mut() {
            let frame = decode(&session.next_frame().await.unwrap());
            assert_eq!(frame.live, "Y");
            assert_eq!(frame.view_count, 3);
        }
    }

    #[tokio::test]
    async fn settled_submit_in_window_archives() {
        let sink = Arc::new(MockSink::default());
        let service = service_at(yangon(16, 31), sink.clone());

        let outcome = service.submit(draw("123")).await;

        assert_eq!(outcome.archival, GateDecision::Archived(InsertOutcome::Inserted));
        let records = sink.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].result_430, "123");
    }

    #[tokio::test]
    async fn sink_failure_does_not_roll_back_or_block_broadcast() {
        let sink = Arc::new(MockSink {
            fail: true,
            ..MockSink::default()
        });
        let service = service_at(yangon(16, 31), sink);
        let mut session = service.subscribe().await;
        session.next_frame().await;

        let outcome = service.submit(draw("123")).await;

        assert_eq!(outcome.archival, GateDecision::SinkFailed);
        assert_eq!(service.current().await.result_430, "123");
        assert_eq!(decode(&session.next_frame().await.unwrap()).result_430, "123");
    }

    #[tokio::test]
    async fn dropped_session_leaves_registry() {
        let service = service_at(yangon(9, 0), Arc::new(MockSink::default()));
        let session = service.subscribe().await;
        assert_eq!(service.viewer_count(), 1);

        drop(session);

        assert_eq!(service.viewer_count(), 0);
    }

    #[tokio::test]
    async fn shutdown_ends_sessions() {
        let service = service_at(yangon(9, 0), Arc::new(MockSink::default()));
        let mut session = service.subscribe().await;
        session.next_frame().await;

        service.shutdown();

        assert!(session.next_frame().await.is_none());
        assert_eq!(service.viewer_count(), 0);
    }

    #[tokio::test]
    async fn sessions_opened_after_shutdown_close_immediately() {
        let service = service_at(yangon(9, 0), Arc::new(MockSink::default()));
        service.shutdown();

        let mut session = service.subscribe().await;

        assert!(session.next_frame().await.is_some());
        assert!(session.next_frame().await.is_none());
    }
}

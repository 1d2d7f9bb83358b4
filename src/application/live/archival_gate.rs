//! ArchivalGate - decides when an incoming snapshot is archived.
//!
//! Draw results only become final a few minutes after the 16:30 tick, so
//! every update is checked against the local-time window and the settled
//! 16:30 result. The check runs on the ingest path, reacting to real data
//! changes instead of a separate timer.
//!
//! The cooldown only avoids redundant sink calls; duplicate protection is
//! the sink's date key.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};

use crate::domain::lottery::{ArchivalWindow, HistoryRecord, Snapshot};
use crate::ports::{HistorySink, InsertOutcome};

/// Default interval between successful evaluations, in seconds.
pub const DEFAULT_COOLDOWN_SECS: i64 = 60;

/// Why a snapshot was or was not archived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Local time could not be resolved; archival skipped.
    TimezoneUnavailable,
    /// Local time is outside the archival window.
    OutsideWindow,
    /// The 16:30 result is still a placeholder.
    Unsettled,
    /// A successful evaluation happened within the cooldown.
    CoolingDown,
    /// The sink was called and answered.
    Archived(InsertOutcome),
    /// The sink was called and failed; the failure was logged.
    SinkFailed,
}

/// Wall-clock and completeness gate in front of the [`HistorySink`].
pub struct ArchivalGate {
    window: ArchivalWindow,
    cooldown: Duration,
    sink: Arc<dyn HistorySink>,
    last_check: Mutex<Option<DateTime<Utc>>>,
}

impl ArchivalGate {
    pub fn new(window: ArchivalWindow, cooldown: Duration, sink: Arc<dyn HistorySink>) -> Self {
        Self {
            window,
            cooldown,
            sink,
            last_check: Mutex::new(None),
        }
    }

    /// Evaluate a snapshot at `now`, archiving it when every condition holds.
    ///
    /// Never fails: every problem is logged and reported as a decision.
    pub async fn evaluate(&self, snapshot: &Snapshot, now: DateTime<Utc>) -> GateDecision {
        let local = match self.window.local_time(now) {
            Ok(local) => local,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    offset_minutes = self.window.offset_minutes(),
                    "Cannot resolve draw-local time, skipping archival"
                );
                return GateDecision::TimezoneUnavailable;
            }
        };

        if !self.window.contains_local(&local) {
            return GateDecision::OutsideWindow;
        }

        if !snapshot.is_settled() {
            tracing::info!(
                result = snapshot.evening_result(),
                "Skipping archival, 16:30 result is not ready yet"
            );
            return GateDecision::Unsettled;
        }

        if !self.claim(now) {
            return GateDecision::CoolingDown;
        }

        tracing::info!(
            date = %snapshot.date,
            result = snapshot.evening_result(),
            local_time = %local.format("%H:%M"),
            "Within archival window, archiving draw"
        );

        match self.sink.insert_if_absent(&HistoryRecord::from(snapshot)).await {
            Ok(outcome) => {
                tracing::info!(date = %snapshot.date, ?outcome, "History checked/inserted");
                GateDecision::Archived(outcome)
            }
            Err(e) => {
                tracing::error!(date = %snapshot.date, error = %e, "Failed to archive draw");
                GateDecision::SinkFailed
            }
        }
    }

    /// Records `now` as the last check unless one happened within the cooldown.
    fn claim(&self, now: DateTime<Utc>) -> bool {
        let mut last_check = self.last_check.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(last) = *last_check {
            if now.signed_duration_since(last) < self.cooldown {
                return false;
            }
        }
        *last_check = Some(now);
        true
    }
}

impl std::fmt::Debug for ArchivalGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchivalGate")
            .field("window", &self.window)
            .field("cooldown", &self.cooldown)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::HistoryError;
    use async_trait::async_trait;
    use chrono::{FixedOffset, NaiveTime, TimeZone};
    use std::collections::HashSet;

    struct RecordingSink {
        calls: Mutex<Vec<HistoryRecord>>,
        dates: Mutex<HashSet<String>>,
        fail: bool,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                dates: Mutex::new(HashSet::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        fn calls(&self) -> Vec<HistoryRecord> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HistorySink for RecordingSink {
        async fn insert_if_absent(
            &self,
            record: &HistoryRecord,
        ) -> Result<InsertOutcome, HistoryError> {
            self.calls.lock().unwrap().push(record.clone());
            if self.fail {
                return Err(HistoryError::Database("connection refused".to_string()));
            }
            if self.dates.lock().unwrap().insert(record.date.clone()) {
                Ok(InsertOutcome::Inserted)
            } else {
                Ok(InsertOutcome::AlreadyExists)
            }
        }
    }

    fn yangon(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
        FixedOffset::east_opt(6 * 3600 + 30 * 60)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 15, hour, minute, second)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn draw(result_430: &str) -> Snapshot {
        Snapshot {
            date: "2024-01-15".to_string(),
            live: "Y".to_string(),
            result_430: result_430.to_string(),
            ..Snapshot::default()
        }
    }

    fn gate(sink: Arc<RecordingSink>) -> ArchivalGate {
        ArchivalGate::new(
            ArchivalWindow::default(),
            Duration::seconds(DEFAULT_COOLDOWN_SECS),
            sink,
        )
    }

    #[tokio::test]
    async fn settled_result_inside_window_is_archived() {
        let sink = Arc::new(RecordingSink::new());
        let gate = gate(sink.clone());

        let decision = gate.evaluate(&draw("123"), yangon(16, 31, 0)).await;

        assert_eq!(decision, GateDecision::Archived(InsertOutcome::Inserted));
        let calls = sink.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].date, "2024-01-15");
        assert_eq!(calls[0].result_430, "123");
    }

    #[tokio::test]
    async fn placeholder_result_is_never_archived() {
        let sink = Arc::new(RecordingSink::new());
        let gate = gate(sink.clone());

        let decision = gate.evaluate(&draw("--"), yangon(16, 32, 0)).await;

        assert_eq!(decision, GateDecision::Unsettled);
        assert!(sink.calls().is_empty());
    }

    #[tokio::test]
    async fn outside_window_is_not_archived() {
        let sink = Arc::new(RecordingSink::new());
        let gate = gate(sink.clone());

        let decision = gate.evaluate(&draw("123"), yangon(10, 0, 0)).await;

        assert_eq!(decision, GateDecision::OutsideWindow);
        assert!(sink.calls().is_empty());
    }

    #[tokio::test]
    async fn repeated_updates_within_cooldown_archive_once() {
        let sink = Arc::new(RecordingSink::new());
        let gate = gate(sink.clone());

        let first = gate.evaluate(&draw("123"), yangon(16, 31, 0)).await;
        let second = gate.evaluate(&draw("123"), yangon(16, 31, 20)).await;
        let third = gate.evaluate(&draw("123"), yangon(16, 31, 59)).await;

        assert_eq!(first, GateDecision::Archived(InsertOutcome::Inserted));
        assert_eq!(second, GateDecision::CoolingDown);
        assert_eq!(third, GateDecision::CoolingDown);
        assert_eq!(sink.calls().len(), 1);
    }

    #[tokio::test]
    async fn after_cooldown_sink_sees_duplicate_date() {
        let sink = Arc::new(RecordingSink::new());
        let gate = gate(sink.clone());

        gate.evaluate(&draw("123"), yangon(16, 31, 0)).await;
        let later = gate.evaluate(&draw("123"), yangon(16, 32, 30)).await;

        assert_eq!(later, GateDecision::Archived(InsertOutcome::AlreadyExists));
        assert_eq!(sink.calls().len(), 2);
    }

    #[tokio::test]
    async fn unsettled_updates_do_not_start_cooldown() {
        let sink = Arc::new(RecordingSink::new());
        let gate = gate(sink.clone());

        gate.evaluate(&draw("--"), yangon(16, 30, 10)).await;
        let settled = gate.evaluate(&draw("123"), yangon(16, 30, 40)).await;

        assert_eq!(settled, GateDecision::Archived(InsertOutcome::Inserted));
    }

    #[tokio::test]
    async fn sink_failure_is_reported_not_raised() {
        let sink = Arc::new(RecordingSink::failing());
        let gate = gate(sink.clone());

        let decision = gate.evaluate(&draw("123"), yangon(16, 33, 0)).await;

        assert_eq!(decision, GateDecision::SinkFailed);
        assert_eq!(sink.calls().len(), 1);
    }

    #[tokio::test]
    async fn unresolvable_offset_skips_archival() {
        let sink = Arc::new(RecordingSink::new());
        let start = NaiveTime::from_hms_opt(16, 30, 0).unwrap();
        let window = ArchivalWindow::new(i32::MAX, start, 5).unwrap();
        let gate = ArchivalGate::new(window, Duration::seconds(DEFAULT_COOLDOWN_SECS), sink.clone());

        let decision = gate.evaluate(&draw("123"), yangon(16, 31, 0)).await;

        assert_eq!(decision, GateDecision::TimezoneUnavailable);
        assert!(sink.calls().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_updates_in_window_archive_once() {
        let sink = Arc::new(RecordingSink::new());
        let gate = Arc::new(gate(sink.clone()));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let gate = gate.clone();
                tokio::spawn(async move { gate.evaluate(&draw("123"), yangon(16, 31, i)).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(sink.calls().len(), 1);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn placeholder_never_reaches_sink(
                secs in 0i64..(7 * 24 * 3600),
                dashes in 0usize..4,
            ) {
                let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
                let sink = Arc::new(RecordingSink::new());
                let gate = gate(sink.clone());
                let now = yangon(0, 0, 0) + Duration::seconds(secs);

                let decision = runtime.block_on(gate.evaluate(&draw(&"-".repeat(dashes)), now));

                prop_assert!(sink.calls().is_empty());
                prop_assert!(matches!(decision, GateDecision::Unsettled | GateDecision::OutsideWindow));
            }
        }
    }
}

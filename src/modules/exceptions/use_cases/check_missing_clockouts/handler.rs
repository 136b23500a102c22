// Scan for entries left open too long and warn their users.
//
// Responsibilities
// - Find open entries of the tenant that started before now - threshold.
// - Send one notification per entry to its user. Sink failures are logged and skipped.
// - Never close entries.

use serde_json::json;
use std::sync::Arc;

use crate::modules::exceptions::core::views::{
    MissingClockout, MissingClockoutScan, missing_clockout_cutoff,
};
use crate::modules::notifications::core::notification::{
    NewNotification, NotificationKind, Severity,
};
use crate::modules::notifications::core::ports::NotificationSink;
use crate::modules::time_entries::core::ports::TimeEntryRepository;
use crate::shared::core::clock::Clock;
use crate::shared::core::errors::ApplicationError;

pub struct CheckMissingClockoutsHandler {
    entries: Arc<dyn TimeEntryRepository>,
    sink: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
    default_threshold_hours: f64,
}

impl CheckMissingClockoutsHandler {
    pub fn new(
        entries: Arc<dyn TimeEntryRepository>,
        sink: Arc<dyn NotificationSink>,
        clock: Arc<dyn Clock>,
        default_threshold_hours: f64,
    ) -> Self {
        Self {
            entries,
            sink,
            clock,
            default_threshold_hours,
        }
    }

    pub async fn handle(
        &self,
        tenant_id: &str,
        threshold_hours: Option<f64>,
    ) -> Result<MissingClockoutScan, ApplicationError> {
        let threshold_hours = threshold_hours.unwrap_or(self.default_threshold_hours);
        let cutoff = missing_clockout_cutoff(self.clock.now(), threshold_hours)?;
        let stale = self
            .entries
            .list_open_started_before(tenant_id, cutoff)
            .await?;

        let mut notified = 0;
        for entry in &stale {
            let notification = NewNotification::to_user(
                entry.tenant_id.clone(),
                entry.user_id,
                NotificationKind::MissingClockout,
                format!(
                    "Missing clock-out detected: Open since {}",
                    entry.start_time.to_rfc3339()
                ),
            )
            .with_severity(Severity::Warning)
            .with_payload(json!({
                "time_entry_id": entry.id,
                "start_time": entry.start_time,
            }));
            match self.sink.notify(notification).await {
                Ok(()) => notified += 1,
                Err(err) => tracing::warn!(
                    %tenant_id,
                    time_entry_id = %entry.id,
                    error = %err,
                    "missing clock-out notification dropped"
                ),
            }
        }

        tracing::info!(%tenant_id, threshold_hours, flagged = stale.len(), notified, "missing clock-out scan");
        Ok(MissingClockoutScan {
            threshold_hours,
            flagged: stale.iter().map(MissingClockout::from).collect(),
            notified,
        })
    }
}

#[cfg(test)]
mod check_missing_clockouts_handler_tests {
    use super::*;
    use crate::modules::notifications::adapters::outbound::recording_sink::RecordingNotificationSink;
    use crate::modules::reporting::core::errors::ReportError;
    use crate::shared::core::clock::FixedClock;
    use crate::shared::infrastructure::in_memory::store::InMemoryStore;
    use crate::test_support::fixtures::time_entries::{
        TENANT_A, TENANT_B, TimeEntryBuilder, on,
    };
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    type BeforeEachReturn = (Arc<InMemoryStore>, Arc<FixedClock>);

    #[fixture]
    async fn before_each() -> BeforeEachReturn {
        let store = InMemoryStore::new();
        for row in [
            TimeEntryBuilder::new().start_time(on(1, 16, 0)).build(),
            TimeEntryBuilder::new()
                .user_id(Uuid::now_v7())
                .start_time(on(2, 8, 0))
                .build(),
            TimeEntryBuilder::new()
                .user_id(Uuid::now_v7())
                .start_time(on(1, 6, 0))
                .closed_at(on(1, 14, 0))
                .build(),
            TimeEntryBuilder::new()
                .tenant_id(TENANT_B)
                .start_time(on(1, 6, 0))
                .build(),
        ] {
            store.insert(&row).await.expect("seed failed");
        }
        (Arc::new(store), Arc::new(FixedClock::at(on(2, 12, 0))))
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_notify_once_per_stale_entry_and_leave_it_open(
        #[future] before_each: BeforeEachReturn,
    ) {
        let (store, clock) = before_each.await;
        let sink = Arc::new(RecordingNotificationSink::new());
        let handler = CheckMissingClockoutsHandler::new(store.clone(), sink.clone(), clock, 12.0);

        let scan = handler.handle(TENANT_A, Some(12.0)).await.unwrap();

        assert_eq!(scan.flagged.len(), 1);
        assert_eq!(scan.flagged[0].start_time, on(1, 16, 0));
        assert_eq!(scan.notified, 1);
        let sent = sink.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind, NotificationKind::MissingClockout);
        assert_eq!(
            sent[0].message,
            "Missing clock-out detected: Open since 2025-01-01T16:00:00+00:00"
        );
        let still_open = store
            .find_open(TENANT_A, scan.flagged[0].user_id)
            .await
            .unwrap();
        assert!(still_open.is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_use_the_default_threshold(#[future] before_each: BeforeEachReturn) {
        let (store, clock) = before_each.await;
        let sink = Arc::new(RecordingNotificationSink::new());
        let handler = CheckMissingClockoutsHandler::new(store, sink, clock, 3.0);

        let scan = handler.handle(TENANT_A, None).await.unwrap();

        assert_eq!(scan.threshold_hours, 3.0);
        assert_eq!(scan.flagged.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_report_even_when_the_sink_is_offline(
        #[future] before_each: BeforeEachReturn,
    ) {
        let (store, clock) = before_each.await;
        let mut sink = RecordingNotificationSink::new();
        sink.toggle_offline();
        let handler = CheckMissingClockoutsHandler::new(store, Arc::new(sink), clock, 12.0);

        let scan = handler.handle(TENANT_A, None).await.unwrap();

        assert_eq!(scan.flagged.len(), 1);
        assert_eq!(scan.notified, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_a_non_positive_threshold(#[future] before_each: BeforeEachReturn) {
        let (store, clock) = before_each.await;
        let handler = CheckMissingClockoutsHandler::new(
            store,
            Arc::new(RecordingNotificationSink::new()),
            clock,
            12.0,
        );

        let result = handler.handle(TENANT_A, Some(0.0)).await;

        assert_eq!(
            result,
            Err(ApplicationError::Report(ReportError::InvalidThreshold(0.0)))
        );
    }
}

// Tenant-wide summary report.
//
// Responsibilities
// - Sum hours per (kind, is_approved) over the entries starting inside the window.
// - Count unapproved entries in the same window.
//
// Notes
// - Open entries contribute 0 hours but still create their group and count as unapproved.
// - Closed rows without a stored duration contribute their interval.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::modules::reporting::core::report_window::resolve_window;
use crate::modules::time_entries::core::ports::TimeEntryRepository;
use crate::modules::time_entries::core::time_entry::{TimeEntry, TimeEntryKind};
use crate::shared::core::clock::Clock;
use crate::shared::core::errors::ApplicationError;

#[derive(Debug, Clone, PartialEq)]
pub struct GetSummaryReport {
    pub tenant_id: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryLine {
    pub kind: TimeEntryKind,
    pub is_approved: bool,
    pub total_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub start: DateTime<Utc>,
    /// Exclusive.
    pub end: DateTime<Utc>,
    pub summary: Vec<SummaryLine>,
    pub total_hours: f64,
    pub unapproved_count: usize,
}

pub fn summarize(entries: &[TimeEntry]) -> (Vec<SummaryLine>, usize) {
    let mut groups: BTreeMap<(TimeEntryKind, bool), f64> = BTreeMap::new();
    let mut unapproved_count = 0;
    for entry in entries {
        *groups.entry((entry.kind, entry.is_approved)).or_default() +=
            entry.measured_hours().unwrap_or(0.0);
        if !entry.is_approved {
            unapproved_count += 1;
        }
    }
    let lines = groups
        .into_iter()
        .map(|((kind, is_approved), total_hours)| SummaryLine {
            kind,
            is_approved,
            total_hours,
        })
        .collect();
    (lines, unapproved_count)
}

pub struct GetSummaryReportHandler {
    entries: Arc<dyn TimeEntryRepository>,
    clock: Arc<dyn Clock>,
}

impl GetSummaryReportHandler {
    pub fn new(entries: Arc<dyn TimeEntryRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { entries, clock }
    }

    pub async fn handle(&self, query: GetSummaryReport) -> Result<SummaryReport, ApplicationError> {
        let window = resolve_window(query.start, query.end, self.clock.now())?;
        tracing::debug!(tenant_id = %query.tenant_id, ?window, "summary report");
        let entries = self
            .entries
            .list_for_tenant(&query.tenant_id, &window)
            .await?;
        let (summary, unapproved_count) = summarize(&entries);
        let total_hours = summary.iter().map(|line| line.total_hours).sum();

        Ok(SummaryReport {
            start: window.start,
            end: window.end,
            summary,
            total_hours,
            unapproved_count,
        })
    }
}

#[cfg(test)]
mod get_summary_report_handler_tests {
    use super::*;
    use crate::shared::core::clock::FixedClock;
    use crate::shared::infrastructure::in_memory::store::InMemoryStore;
    use crate::test_support::fixtures::time_entries::{
        TENANT_A, TENANT_B, TimeEntryBuilder, on,
    };
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    fn it_should_group_by_kind_and_approval() {
        let entries = vec![
            TimeEntryBuilder::new()
                .start_time(on(2, 9, 0))
                .closed_at(on(2, 17, 0))
                .approved(true)
                .build(),
            TimeEntryBuilder::new()
                .user_id(Uuid::now_v7())
                .start_time(on(2, 9, 0))
                .closed_at(on(2, 13, 0))
                .build(),
            TimeEntryBuilder::new()
                .start_time(on(3, 8, 0))
                .closed_at(on(3, 18, 0))
                .kind(TimeEntryKind::Overtime)
                .build(),
            TimeEntryBuilder::new()
                .start_time(on(4, 9, 0))
                .closed_at(on(4, 11, 0))
                .build(),
            TimeEntryBuilder::new().start_time(on(5, 9, 0)).build(),
        ];

        let (lines, unapproved_count) = summarize(&entries);

        assert_eq!(
            lines,
            vec![
                SummaryLine {
                    kind: TimeEntryKind::Regular,
                    is_approved: false,
                    total_hours: 6.0,
                },
                SummaryLine {
                    kind: TimeEntryKind::Regular,
                    is_approved: true,
                    total_hours: 8.0,
                },
                SummaryLine {
                    kind: TimeEntryKind::Overtime,
                    is_approved: false,
                    total_hours: 10.0,
                },
            ]
        );
        assert_eq!(unapproved_count, 4);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_only_report_the_tenant_and_window() {
        let store = InMemoryStore::new();
        for row in [
            TimeEntryBuilder::new()
                .start_time(on(2, 9, 0))
                .closed_at(on(2, 17, 0))
                .build(),
            TimeEntryBuilder::new()
                .start_time(on(10, 9, 0))
                .closed_at(on(10, 17, 0))
                .build(),
            TimeEntryBuilder::new()
                .tenant_id(TENANT_B)
                .start_time(on(2, 9, 0))
                .closed_at(on(2, 17, 0))
                .build(),
        ] {
            store.insert(&row).await.unwrap();
        }
        let handler =
            GetSummaryReportHandler::new(Arc::new(store), Arc::new(FixedClock::at(on(20, 0, 0))));

        let report = handler
            .handle(GetSummaryReport {
                tenant_id: TENANT_A.into(),
                start: Some(on(1, 0, 0)),
                end: Some(on(7, 0, 0)),
            })
            .await
            .unwrap();

        assert_eq!(report.total_hours, 8.0);
        assert_eq!(report.unapproved_count, 1);
        assert_eq!(report.summary.len(), 1);
    }
}

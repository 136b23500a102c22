// Timesheet, summary report and exception detection over seeded entries.

mod fixtures;

use fixtures::{TENANT_A, TENANT_B, THRESHOLD_HOURS, at, closed_entry, in_memory, on, open_entry, user};
use rstest::rstest;
use workforce_time::modules::notifications::core::notification::NotificationKind;
use workforce_time::modules::reporting::use_cases::get_summary_report::handler::GetSummaryReport;
use workforce_time::modules::reporting::use_cases::get_timesheet::handler::GetTimesheet;
use workforce_time::modules::time_entries::core::ports::TimeEntryRepository;
use workforce_time::modules::time_entries::core::time_entry::TimeEntryKind;

fn timesheet(user_id: uuid::Uuid, start_day: u32, end_day: u32) -> GetTimesheet {
    GetTimesheet {
        tenant_id: TENANT_A.to_string(),
        user_id,
        start: Some(on(start_day, 0, 0)),
        end: Some(on(end_day, 0, 0)),
    }
}

#[rstest]
#[tokio::test]
async fn it_should_list_the_week_and_total_its_hours() {
    let h = in_memory();
    let u = user(1);
    for (day, hours) in [(1, 8.0), (3, 7.5), (7, 9.0)] {
        h.store.insert(&closed_entry(TENANT_A, u, on(day, 9, 0), hours)).await.unwrap();
    }
    h.store.insert(&closed_entry(TENANT_A, u, on(8, 9, 0), 4.0)).await.unwrap();
    h.store.insert(&closed_entry(TENANT_A, user(2), on(2, 9, 0), 6.0)).await.unwrap();
    h.store.insert(&closed_entry(TENANT_B, u, on(2, 9, 0), 6.0)).await.unwrap();

    let sheet = h.state.timesheet.handle(timesheet(u, 1, 7)).await.unwrap();

    assert_eq!(sheet.entries.len(), 3);
    assert_eq!(sheet.total_hours, 24.5);
    assert!(sheet.entries.iter().all(|row| row.task_title == "N/A"));
}

#[rstest]
#[tokio::test]
async fn it_should_reject_an_inverted_range() {
    let h = in_memory();

    let err = h.state.timesheet.handle(timesheet(user(1), 7, 1)).await.unwrap_err();

    assert_eq!(err.code(), "invalid_range");
}

#[rstest]
#[tokio::test]
async fn it_should_sum_the_summary_to_the_individual_durations() {
    let h = in_memory();
    let mut seeded = Vec::new();
    for (n, (kind, approved, hours)) in [
        (TimeEntryKind::Regular, true, 8.0),
        (TimeEntryKind::Regular, false, 7.25),
        (TimeEntryKind::Overtime, false, 9.5),
        (TimeEntryKind::Pto, true, 8.0),
        (TimeEntryKind::Regular, true, 6.0),
    ]
    .into_iter()
    .enumerate()
    {
        let mut entry = closed_entry(TENANT_A, user(n as u128), on(2, 8, 0), hours);
        entry.kind = kind;
        entry.is_approved = approved;
        h.store.insert(&entry).await.unwrap();
        seeded.push(entry);
    }

    let report = h
        .state
        .summary_report
        .handle(GetSummaryReport {
            tenant_id: TENANT_A.to_string(),
            start: Some(on(1, 0, 0)),
            end: Some(on(7, 0, 0)),
        })
        .await
        .unwrap();

    let expected: f64 = seeded.iter().filter_map(|e| e.duration).sum();
    assert!((report.total_hours - expected).abs() < 1e-9);
    assert_eq!(report.unapproved_count, 2);
    let regular_approved = report
        .summary
        .iter()
        .find(|line| line.kind == TimeEntryKind::Regular && line.is_approved)
        .unwrap();
    assert_eq!(regular_approved.total_hours, 14.0);
    assert_eq!(report.summary.len(), 4);
}

#[rstest]
#[tokio::test]
async fn it_should_flag_one_stale_entry_and_leave_it_open() {
    let h = in_memory();
    let stale_user = user(1);
    h.store.insert(&open_entry(TENANT_A, stale_user, at(9, 0))).await.unwrap();
    h.store.insert(&open_entry(TENANT_A, user(2), on(2, 3, 0))).await.unwrap();
    h.clock.set(on(2, 5, 0));

    let scan = h
        .state
        .check_missing_clockouts
        .handle(TENANT_A, Some(THRESHOLD_HOURS))
        .await
        .unwrap();

    assert_eq!(scan.flagged.len(), 1);
    assert_eq!(scan.flagged[0].user_id, stale_user);
    let sent = h.sink.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].user_id, Some(stale_user));
    assert_eq!(sent[0].kind, NotificationKind::MissingClockout);
    assert!(h.store.find_open(TENANT_A, stale_user).await.unwrap().is_some());
}

#[rstest]
#[tokio::test]
async fn it_should_report_overtime_and_missing_clockouts_together() {
    let h = in_memory();
    h.store.insert(&open_entry(TENANT_A, user(1), at(9, 0))).await.unwrap();
    h.store.insert(&closed_entry(TENANT_A, user(2), at(6, 0), 10.0)).await.unwrap();
    h.store.insert(&closed_entry(TENANT_A, user(3), at(6, 0), 7.0)).await.unwrap();
    h.clock.set(on(2, 5, 0));

    let report = h.state.exceptions.handle(TENANT_A, None).await.unwrap();

    assert_eq!(report.threshold_hours, THRESHOLD_HOURS);
    assert_eq!(report.missing_clockouts.len(), 1);
    assert_eq!(report.overtime.len(), 1);
    assert_eq!(report.overtime[0].user_id, user(2));
    assert!(h.sink.sent().await.is_empty());
}

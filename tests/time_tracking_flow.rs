// Clock-in / clock-out flows against the in-memory store.

mod fixtures;

use fixtures::{TENANT_A, TENANT_B, at, in_memory, user};
use rstest::rstest;
use workforce_time::modules::notifications::core::notification::{NotificationKind, Severity};
use workforce_time::modules::time_entries::core::ports::TimeEntryRepository;
use workforce_time::modules::time_entries::core::time_entry::{TimeEntryKind, hours_between};
use workforce_time::modules::time_entries::use_cases::clock_in::command::ClockIn;
use workforce_time::modules::time_entries::use_cases::clock_out::command::ClockOut;
use workforce_time::shared::core::errors::{ApplicationError, ErrorKind};
use workforce_time::shared::core::time_window::TimeWindow;

#[rstest]
#[tokio::test]
async fn it_should_report_a_fresh_clock_in_and_refuse_a_second_one() {
    let h = in_memory();
    let u = user(1);

    h.state.clock_in.handle(ClockIn::new(TENANT_A, u)).await.unwrap();
    let status = h.state.current_status.handle(TENANT_A, u).await.unwrap();
    let second = h.state.clock_in.handle(ClockIn::new(TENANT_A, u)).await;

    assert!(status.is_clocked_in);
    assert_eq!(status.current_entry.unwrap().elapsed_hours, 0.0);
    let err = second.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.code(), "already_clocked_in");
}

#[rstest]
#[tokio::test]
async fn it_should_reclassify_a_nine_hour_shift_and_notify_the_user() {
    let h = in_memory();
    let u = user(1);
    h.state.clock_in.handle(ClockIn::new(TENANT_A, u)).await.unwrap();

    h.clock.set(at(18, 0));
    let closed = h.state.clock_out.handle(ClockOut::new(TENANT_A, u)).await.unwrap();

    assert_eq!(closed.duration, Some(9.0));
    assert_eq!(closed.kind, TimeEntryKind::Overtime);
    let sent = h.sink.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].user_id, Some(u));
    assert_eq!(sent[0].kind, NotificationKind::OvertimeDetected);
    assert_eq!(sent[0].severity, Severity::Warning);
}

#[rstest]
#[tokio::test]
async fn it_should_leave_no_open_entry_after_a_clock_in_out_pair() {
    let h = in_memory();
    let u = user(1);
    h.state.clock_in.handle(ClockIn::new(TENANT_A, u)).await.unwrap();
    h.clock.set(at(12, 20));
    h.state.clock_out.handle(ClockOut::new(TENANT_A, u)).await.unwrap();

    assert!(h.store.find_open(TENANT_A, u).await.unwrap().is_none());
    let entries = h
        .store
        .list_for_user(TENANT_A, u, &TimeWindow::new(at(0, 0), at(23, 59)))
        .await
        .unwrap();
    for entry in entries {
        let end = entry.end_time.unwrap();
        let expected = hours_between(entry.start_time, end);
        assert!((entry.duration.unwrap() - expected).abs() < 1e-9);
    }
}

#[rstest]
#[tokio::test]
async fn it_should_keep_tenants_apart_on_clock_out() {
    let h = in_memory();
    let u = user(1);
    h.state.clock_in.handle(ClockIn::new(TENANT_A, u)).await.unwrap();

    let foreign = h.state.clock_out.handle(ClockOut::new(TENANT_B, u)).await;

    assert_eq!(foreign.unwrap_err().code(), "no_open_entry");
    assert!(h.store.find_open(TENANT_A, u).await.unwrap().is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn it_should_admit_exactly_one_of_many_concurrent_clock_ins() {
    let h = in_memory();
    let u = user(7);

    let attempts = (0..16).map(|_| {
        let handler = h.state.clock_in.clone();
        tokio::spawn(async move { handler.handle(ClockIn::new(TENANT_A, u)).await })
    });
    let mut succeeded = 0;
    let mut conflicts = 0;
    for attempt in attempts.collect::<Vec<_>>() {
        match attempt.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(ApplicationError::TimeEntry(_)) => conflicts += 1,
            Err(other) => panic!("unexpected error {other}"),
        }
    }

    assert_eq!(succeeded, 1);
    assert_eq!(conflicts, 15);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn it_should_close_an_entry_once_under_concurrent_clock_outs() {
    let h = in_memory();
    let u = user(8);
    h.state.clock_in.handle(ClockIn::new(TENANT_A, u)).await.unwrap();
    h.clock.set(at(17, 0));

    let first = h.state.clock_out.clone();
    let second = h.state.clock_out.clone();
    let (a, b) = tokio::join!(
        tokio::spawn(async move { first.handle(ClockOut::new(TENANT_A, u)).await }),
        tokio::spawn(async move { second.handle(ClockOut::new(TENANT_A, u)).await }),
    );
    let outcomes = [a.unwrap(), b.unwrap()];

    assert_eq!(outcomes.iter().filter(|o| o.is_ok()).count(), 1);
    let failed = outcomes.iter().find_map(|o| o.as_ref().err()).unwrap();
    assert_eq!(failed.code(), "no_open_entry");
}

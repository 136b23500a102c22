// Wiring of ports into use case handlers.
//
// Notes
// - One store instance serves every port, whichever backend was selected.
// - AppState is cloned per request by axum; handlers sit behind Arc.

use std::sync::Arc;

use crate::modules::directory::core::ports::{TaskDirectory, UserDirectory};
use crate::modules::exceptions::use_cases::check_missing_clockouts::handler::CheckMissingClockoutsHandler;
use crate::modules::exceptions::use_cases::get_exceptions::handler::GetExceptionsHandler;
use crate::modules::notifications::core::ports::{NotificationRepository, NotificationSink};
use crate::modules::notifications::use_cases::inbox::handler::InboxHandler;
use crate::modules::reporting::use_cases::get_summary_report::handler::GetSummaryReportHandler;
use crate::modules::reporting::use_cases::get_timesheet::handler::GetTimesheetHandler;
use crate::modules::shifts::core::ports::ShiftRepository;
use crate::modules::shifts::use_cases::assign_users::handler::AssignUsersHandler;
use crate::modules::shifts::use_cases::create_shift::handler::CreateShiftHandler;
use crate::modules::shifts::use_cases::delete_shift::handler::DeleteShiftHandler;
use crate::modules::shifts::use_cases::list_shifts::handler::ListShiftsHandler;
use crate::modules::time_entries::core::ports::TimeEntryRepository;
use crate::modules::time_entries::use_cases::backfill_durations::handler::BackfillDurationsHandler;
use crate::modules::time_entries::use_cases::clock_in::handler::ClockInHandler;
use crate::modules::time_entries::use_cases::clock_out::handler::ClockOutHandler;
use crate::modules::time_entries::use_cases::current_status::handler::CurrentStatusHandler;
use crate::shared::core::clock::Clock;

#[derive(Clone)]
pub struct Ports {
    pub entries: Arc<dyn TimeEntryRepository>,
    pub shifts: Arc<dyn ShiftRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub users: Arc<dyn UserDirectory>,
    pub tasks: Arc<dyn TaskDirectory>,
    pub sink: Arc<dyn NotificationSink>,
    pub clock: Arc<dyn Clock>,
}

impl Ports {
    pub fn from_store<S>(store: Arc<S>, sink: Arc<dyn NotificationSink>, clock: Arc<dyn Clock>) -> Self
    where
        S: TimeEntryRepository
            + ShiftRepository
            + NotificationRepository
            + UserDirectory
            + TaskDirectory
            + 'static,
    {
        Self {
            entries: store.clone(),
            shifts: store.clone(),
            notifications: store.clone(),
            users: store.clone(),
            tasks: store,
            sink,
            clock,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub clock_in: Arc<ClockInHandler>,
    pub clock_out: Arc<ClockOutHandler>,
    pub current_status: Arc<CurrentStatusHandler>,
    pub backfill_durations: Arc<BackfillDurationsHandler>,
    pub timesheet: Arc<GetTimesheetHandler>,
    pub summary_report: Arc<GetSummaryReportHandler>,
    pub check_missing_clockouts: Arc<CheckMissingClockoutsHandler>,
    pub exceptions: Arc<GetExceptionsHandler>,
    pub create_shift: Arc<CreateShiftHandler>,
    pub assign_users: Arc<AssignUsersHandler>,
    pub delete_shift: Arc<DeleteShiftHandler>,
    pub list_shifts: Arc<ListShiftsHandler>,
    pub inbox: Arc<InboxHandler>,
}

impl AppState {
    pub fn new(ports: &Ports, missing_clockout_threshold_hours: f64) -> Self {
        let Ports {
            entries,
            shifts,
            notifications,
            users,
            tasks,
            sink,
            clock,
        } = ports.clone();

        Self {
            clock_in: Arc::new(ClockInHandler::new(entries.clone(), tasks.clone(), clock.clone())),
            clock_out: Arc::new(ClockOutHandler::new(entries.clone(), sink.clone(), clock.clone())),
            current_status: Arc::new(CurrentStatusHandler::new(entries.clone(), clock.clone())),
            backfill_durations: Arc::new(BackfillDurationsHandler::new(entries.clone())),
            timesheet: Arc::new(GetTimesheetHandler::new(entries.clone(), tasks, clock.clone())),
            summary_report: Arc::new(GetSummaryReportHandler::new(entries.clone(), clock.clone())),
            check_missing_clockouts: Arc::new(CheckMissingClockoutsHandler::new(
                entries.clone(),
                sink.clone(),
                clock.clone(),
                missing_clockout_threshold_hours,
            )),
            exceptions: Arc::new(GetExceptionsHandler::new(
                entries,
                clock.clone(),
                missing_clockout_threshold_hours,
            )),
            create_shift: Arc::new(CreateShiftHandler::new(shifts.clone())),
            assign_users: Arc::new(AssignUsersHandler::new(
                shifts.clone(),
                users,
                sink,
                clock.clone(),
            )),
            delete_shift: Arc::new(DeleteShiftHandler::new(shifts.clone())),
            list_shifts: Arc::new(ListShiftsHandler::new(shifts)),
            inbox: Arc::new(InboxHandler::new(notifications, clock)),
        }
    }
}

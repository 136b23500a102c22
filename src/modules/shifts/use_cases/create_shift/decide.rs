// Pure decision function for shift creation.
//
// Responsibilities
// - Reject empty or inverted intervals.
// - Reject intervals intersecting an existing shift of the tenant. `existing` is ordered by
//   start_time, so the scan stops at the first shift starting at or after the new end.
// - Never perform input or output.

use uuid::Uuid;

use crate::modules::shifts::core::errors::ShiftError;
use crate::modules::shifts::core::shift::Shift;
use crate::modules::shifts::use_cases::create_shift::command::CreateShift;

pub fn decide_create_shift(
    existing: &[Shift],
    command: CreateShift,
    id: Uuid,
) -> Result<Shift, ShiftError> {
    if command.start_time >= command.end_time {
        return Err(ShiftError::InvalidInterval {
            start: command.start_time,
            end: command.end_time,
        });
    }

    for shift in existing {
        if shift.start_time >= command.end_time {
            break;
        }
        if shift.overlaps(command.start_time, command.end_time) {
            return Err(ShiftError::OverlapConflict);
        }
    }

    Ok(Shift {
        id,
        tenant_id: command.tenant_id,
        start_time: command.start_time,
        end_time: command.end_time,
        role: command.role,
        team: command.team,
        description: command.description,
        is_recurring: command.is_recurring,
        assignees: Vec::new(),
    })
}

#[cfg(test)]
mod create_shift_decide_tests {
    use super::*;
    use crate::test_support::fixtures::time_entries::{TENANT_A, at};
    use chrono::{DateTime, Utc};
    use rstest::{fixture, rstest};

    #[fixture]
    fn morning() -> Shift {
        decide_create_shift(&[], CreateShift::new(TENANT_A, at(8, 0), at(12, 0)), Uuid::now_v7())
            .unwrap()
    }

    #[rstest]
    fn it_should_create_a_shift_without_assignees(morning: Shift) {
        assert_eq!(morning.start_time, at(8, 0));
        assert_eq!(morning.end_time, at(12, 0));
        assert!(morning.assignees.is_empty());
        assert!(!morning.is_recurring);
    }

    #[rstest]
    #[case(at(12, 0), at(12, 0))]
    #[case(at(12, 0), at(8, 0))]
    fn it_should_reject_an_invalid_interval(
        #[case] start: DateTime<Utc>,
        #[case] end: DateTime<Utc>,
    ) {
        let decision =
            decide_create_shift(&[], CreateShift::new(TENANT_A, start, end), Uuid::now_v7());
        assert_eq!(decision, Err(ShiftError::InvalidInterval { start, end }));
    }

    #[rstest]
    #[case(at(10, 0), at(14, 0))]
    #[case(at(6, 0), at(9, 0))]
    #[case(at(9, 0), at(10, 0))]
    #[case(at(7, 0), at(13, 0))]
    fn it_should_reject_an_overlapping_interval(
        morning: Shift,
        #[case] start: DateTime<Utc>,
        #[case] end: DateTime<Utc>,
    ) {
        let decision =
            decide_create_shift(&[morning], CreateShift::new(TENANT_A, start, end), Uuid::now_v7());
        assert_eq!(decision, Err(ShiftError::OverlapConflict));
    }

    #[rstest]
    #[case(at(12, 0), at(16, 0))]
    #[case(at(4, 0), at(8, 0))]
    fn it_should_accept_adjacent_intervals(
        morning: Shift,
        #[case] start: DateTime<Utc>,
        #[case] end: DateTime<Utc>,
    ) {
        let decision =
            decide_create_shift(&[morning], CreateShift::new(TENANT_A, start, end), Uuid::now_v7());
        assert!(decision.is_ok());
    }
}

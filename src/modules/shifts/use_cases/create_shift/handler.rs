// Shift creation command handler.
//
// Responsibilities
// - Load the tenant's shifts ordered by start and call the decider.
// - Insert through insert_exclusive, which repeats the overlap check atomically so two
//   concurrent creations cannot both land.

use std::sync::Arc;
use uuid::Uuid;

use crate::modules::shifts::core::errors::ShiftError;
use crate::modules::shifts::core::ports::{SHIFT_OVERLAP_CONSTRAINT, ShiftRepository};
use crate::modules::shifts::core::shift::Shift;
use crate::modules::shifts::use_cases::create_shift::command::CreateShift;
use crate::modules::shifts::use_cases::create_shift::decide::decide_create_shift;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::ports::StoreError;

pub struct CreateShiftHandler {
    shifts: Arc<dyn ShiftRepository>,
}

impl CreateShiftHandler {
    pub fn new(shifts: Arc<dyn ShiftRepository>) -> Self {
        Self { shifts }
    }

    pub async fn handle(&self, command: CreateShift) -> Result<Shift, ApplicationError> {
        let existing = self.shifts.list(&command.tenant_id, None).await?;
        let shift = decide_create_shift(&existing, command, Uuid::now_v7())?;

        match self.shifts.insert_exclusive(&shift).await {
            Ok(()) => {}
            Err(StoreError::Conflict {
                constraint: SHIFT_OVERLAP_CONSTRAINT,
            }) => return Err(ShiftError::OverlapConflict.into()),
            Err(err) => return Err(err.into()),
        }

        tracing::info!(
            tenant_id = %shift.tenant_id,
            shift_id = %shift.id,
            start_time = %shift.start_time,
            end_time = %shift.end_time,
            "shift created"
        );
        Ok(shift)
    }
}

#[cfg(test)]
mod create_shift_handler_tests {
    use super::*;
    use crate::shared::infrastructure::in_memory::store::InMemoryStore;
    use crate::test_support::fixtures::time_entries::{TENANT_A, TENANT_B, at};
    use rstest::{fixture, rstest};
    use tokio::join;

    #[fixture]
    fn before_each() -> InMemoryStore {
        InMemoryStore::new()
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_persist_the_shift(before_each: InMemoryStore) {
        let store = Arc::new(before_each);
        let handler = CreateShiftHandler::new(store.clone());
        let mut command = CreateShift::new(TENANT_A, at(8, 0), at(12, 0));
        command.role = Some("technician".into());

        let shift = handler.handle(command).await.expect("create failed");

        assert_eq!(store.find(TENANT_A, shift.id).await.unwrap(), Some(shift));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_an_overlap_and_accept_an_adjacent_shift(before_each: InMemoryStore) {
        let handler = CreateShiftHandler::new(Arc::new(before_each));
        handler
            .handle(CreateShift::new(TENANT_A, at(8, 0), at(12, 0)))
            .await
            .expect("first create failed");

        let overlapping = handler
            .handle(CreateShift::new(TENANT_A, at(10, 0), at(14, 0)))
            .await;
        let adjacent = handler
            .handle(CreateShift::new(TENANT_A, at(12, 0), at(16, 0)))
            .await;

        assert_eq!(
            overlapping,
            Err(ApplicationError::Shift(ShiftError::OverlapConflict))
        );
        assert!(adjacent.is_ok());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_only_compare_shifts_of_the_same_tenant(before_each: InMemoryStore) {
        let handler = CreateShiftHandler::new(Arc::new(before_each));
        handler
            .handle(CreateShift::new(TENANT_A, at(8, 0), at(12, 0)))
            .await
            .unwrap();

        let other_tenant = handler
            .handle(CreateShift::new(TENANT_B, at(8, 0), at(12, 0)))
            .await;

        assert!(other_tenant.is_ok());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_let_one_of_two_concurrent_overlapping_creations_win(
        before_each: InMemoryStore,
    ) {
        let store = Arc::new(before_each);
        let first = CreateShiftHandler::new(store.clone());
        let second = CreateShiftHandler::new(store.clone());

        let (a, b) = join!(
            first.handle(CreateShift::new(TENANT_A, at(8, 0), at(12, 0))),
            second.handle(CreateShift::new(TENANT_A, at(10, 0), at(14, 0)))
        );

        assert!(a.is_ok() ^ b.is_ok(), "exactly one creation should succeed");
        assert_eq!(store.list(TENANT_A, None).await.unwrap().len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_if_the_store_is_offline(mut before_each: InMemoryStore) {
        before_each.toggle_offline();
        let handler = CreateShiftHandler::new(Arc::new(before_each));

        let result = handler
            .handle(CreateShift::new(TENANT_A, at(8, 0), at(12, 0)))
            .await;

        assert_eq!(
            result,
            Err(ApplicationError::Store(StoreError::Backend("Store offline".into())))
        );
    }
}

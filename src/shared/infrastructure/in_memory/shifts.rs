use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::shifts::core::ports::{SHIFT_OVERLAP_CONSTRAINT, ShiftRepository};
use crate::modules::shifts::core::shift::{Shift, ShiftAssignment};
use crate::shared::core::ports::StoreError;
use crate::shared::core::time_window::TimeWindow;
use crate::shared::infrastructure::in_memory::store::InMemoryStore;

#[async_trait]
impl ShiftRepository for InMemoryStore {
    async fn list(
        &self,
        tenant_id: &str,
        window: Option<&TimeWindow>,
    ) -> Result<Vec<Shift>, StoreError> {
        self.ensure_online()?;
        let shifts = self.shifts.read().await;
        let mut selected: Vec<Shift> = shifts
            .values()
            .filter(|s| s.tenant_id == tenant_id)
            .filter(|s| window.is_none_or(|w| w.intersects(s.start_time, s.end_time)))
            .cloned()
            .collect();
        selected.sort_by(|a, b| a.start_time.cmp(&b.start_time).then(a.id.cmp(&b.id)));
        Ok(selected)
    }

    async fn find(&self, tenant_id: &str, shift_id: Uuid) -> Result<Option<Shift>, StoreError> {
        self.ensure_online()?;
        let shifts = self.shifts.read().await;
        Ok(shifts
            .get(&shift_id)
            .filter(|s| s.tenant_id == tenant_id)
            .cloned())
    }

    async fn insert_exclusive(&self, shift: &Shift) -> Result<(), StoreError> {
        self.ensure_online()?;
        let mut shifts = self.shifts.write().await;
        if shifts
            .values()
            .any(|s| s.tenant_id == shift.tenant_id && s.overlaps(shift.start_time, shift.end_time))
        {
            return Err(StoreError::Conflict {
                constraint: SHIFT_OVERLAP_CONSTRAINT,
            });
        }
        shifts.insert(shift.id, shift.clone());
        Ok(())
    }

    async fn add_assignments(
        &self,
        tenant_id: &str,
        assignments: &[ShiftAssignment],
    ) -> Result<Vec<Uuid>, StoreError> {
        self.ensure_online()?;
        let Some(first) = assignments.first() else {
            return Ok(Vec::new());
        };
        let mut shifts = self.shifts.write().await;
        let shift = shifts
            .get_mut(&first.shift_id)
            .filter(|s| s.tenant_id == tenant_id)
            .ok_or(StoreError::Stale {
                entity: "shift",
                id: first.shift_id,
            })?;

        let mut added = Vec::new();
        for assignment in assignments {
            if !shift.is_assigned(assignment.user_id) {
                shift.assignees.push(assignment.clone());
                added.push(assignment.user_id);
            }
        }
        Ok(added)
    }

    async fn delete(&self, tenant_id: &str, shift_id: Uuid) -> Result<bool, StoreError> {
        self.ensure_online()?;
        let mut shifts = self.shifts.write().await;
        if shifts.get(&shift_id).is_some_and(|s| s.tenant_id == tenant_id) {
            shifts.remove(&shift_id);
            return Ok(true);
        }
        Ok(false)
    }
}

#[cfg(test)]
mod in_memory_shifts_tests {
    use super::*;
    use crate::test_support::fixtures::time_entries::{TENANT_A, TENANT_B, at};
    use chrono::{DateTime, Utc};
    use rstest::rstest;

    fn shift(tenant_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Shift {
        Shift {
            id: Uuid::now_v7(),
            tenant_id: tenant_id.into(),
            start_time: start,
            end_time: end,
            role: None,
            team: None,
            description: None,
            is_recurring: false,
            assignees: vec![],
        }
    }

    fn assignment(shift_id: Uuid, user_id: Uuid) -> ShiftAssignment {
        ShiftAssignment {
            shift_id,
            user_id,
            accepted: false,
            assigned_by: None,
            assigned_at: at(8, 0),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_overlaps_within_the_tenant_only() {
        let store = InMemoryStore::new();
        store
            .insert_exclusive(&shift(TENANT_A, at(9, 0), at(17, 0)))
            .await
            .unwrap();

        let same_tenant = store
            .insert_exclusive(&shift(TENANT_A, at(16, 0), at(20, 0)))
            .await;
        let back_to_back = store
            .insert_exclusive(&shift(TENANT_A, at(17, 0), at(20, 0)))
            .await;
        let other_tenant = store
            .insert_exclusive(&shift(TENANT_B, at(10, 0), at(12, 0)))
            .await;

        assert_eq!(
            same_tenant,
            Err(StoreError::Conflict {
                constraint: SHIFT_OVERLAP_CONSTRAINT
            })
        );
        assert_eq!(back_to_back, Ok(()));
        assert_eq!(other_tenant, Ok(()));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_skip_existing_assignments() {
        let store = InMemoryStore::new();
        let stored = shift(TENANT_A, at(9, 0), at(17, 0));
        store.insert_exclusive(&stored).await.unwrap();
        let (u1, u2) = (Uuid::now_v7(), Uuid::now_v7());

        let first = store
            .add_assignments(TENANT_A, &[assignment(stored.id, u1)])
            .await;
        let second = store
            .add_assignments(TENANT_A, &[assignment(stored.id, u1), assignment(stored.id, u2)])
            .await;

        assert_eq!(first, Ok(vec![u1]));
        assert_eq!(second, Ok(vec![u2]));
        let found = store.find(TENANT_A, stored.id).await.unwrap().unwrap();
        assert_eq!(found.assignees.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_report_a_missing_shift_as_stale() {
        let store = InMemoryStore::new();
        let missing = Uuid::now_v7();

        let result = store
            .add_assignments(TENANT_A, &[assignment(missing, Uuid::now_v7())])
            .await;

        assert_eq!(
            result,
            Err(StoreError::Stale {
                entity: "shift",
                id: missing
            })
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_delete_only_within_the_tenant() {
        let store = InMemoryStore::new();
        let stored = shift(TENANT_A, at(9, 0), at(17, 0));
        store.insert_exclusive(&stored).await.unwrap();

        assert_eq!(store.delete(TENANT_B, stored.id).await, Ok(false));
        assert_eq!(store.delete(TENANT_A, stored.id).await, Ok(true));
        assert_eq!(store.list(TENANT_A, None).await, Ok(vec![]));
    }
}

use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior, params};
use uuid::Uuid;

use crate::modules::shifts::core::ports::{SHIFT_OVERLAP_CONSTRAINT, ShiftRepository};
use crate::modules::shifts::core::shift::{Shift, ShiftAssignment};
use crate::shared::core::ports::StoreError;
use crate::shared::core::time_window::TimeWindow;
use crate::shared::infrastructure::sqlite::store::{
    SqliteStore, backend, instant, millis, optional_uuid, uuid,
};

const SHIFT_COLUMNS: &str =
    "id, tenant_id, start_time, end_time, role, team, description, is_recurring";

struct ShiftRow {
    id: String,
    tenant_id: String,
    start_time: i64,
    end_time: i64,
    role: Option<String>,
    team: Option<String>,
    description: Option<String>,
    is_recurring: bool,
}

impl ShiftRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            tenant_id: row.get("tenant_id")?,
            start_time: row.get("start_time")?,
            end_time: row.get("end_time")?,
            role: row.get("role")?,
            team: row.get("team")?,
            description: row.get("description")?,
            is_recurring: row.get("is_recurring")?,
        })
    }

    fn into_shift(self, conn: &Connection) -> Result<Shift, StoreError> {
        let id = uuid(&self.id)?;
        Ok(Shift {
            id,
            tenant_id: self.tenant_id,
            start_time: instant(self.start_time)?,
            end_time: instant(self.end_time)?,
            role: self.role,
            team: self.team,
            description: self.description,
            is_recurring: self.is_recurring,
            assignees: load_assignments(conn, id)?,
        })
    }
}

fn load_assignments(conn: &Connection, shift_id: Uuid) -> Result<Vec<ShiftAssignment>, StoreError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT user_id, accepted, assigned_by, assigned_at FROM shift_assignments \
             WHERE shift_id = ?1 ORDER BY assigned_at ASC, user_id ASC",
        )
        .map_err(backend)?;
    let rows = stmt
        .query_map(params![shift_id.to_string()], |row| {
            Ok((
                row.get::<_, String>("user_id")?,
                row.get::<_, bool>("accepted")?,
                row.get::<_, Option<String>>("assigned_by")?,
                row.get::<_, i64>("assigned_at")?,
            ))
        })
        .map_err(backend)?;

    rows.map(|row| {
        let (user_id, accepted, assigned_by, assigned_at) = row.map_err(backend)?;
        Ok(ShiftAssignment {
            shift_id,
            user_id: uuid(&user_id)?,
            accepted,
            assigned_by: optional_uuid(assigned_by)?,
            assigned_at: instant(assigned_at)?,
        })
    })
    .collect()
}

fn insert_assignment(conn: &Connection, assignment: &ShiftAssignment) -> Result<usize, StoreError> {
    conn.execute(
        "INSERT OR IGNORE INTO shift_assignments (shift_id, user_id, accepted, assigned_by, \
         assigned_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            assignment.shift_id.to_string(),
            assignment.user_id.to_string(),
            assignment.accepted,
            assignment.assigned_by.map(|id| id.to_string()),
            millis(assignment.assigned_at),
        ],
    )
    .map_err(backend)
}

#[async_trait]
impl ShiftRepository for SqliteStore {
    async fn list(
        &self,
        tenant_id: &str,
        window: Option<&TimeWindow>,
    ) -> Result<Vec<Shift>, StoreError> {
        let (tenant_id, window) = (tenant_id.to_string(), window.copied());
        self.run(move |conn| {
            let conn = &*conn;
            let sql = format!(
                "SELECT {SHIFT_COLUMNS} FROM shifts WHERE tenant_id = ?1 \
                 AND (?2 IS NULL OR (start_time < ?3 AND ?2 < end_time)) \
                 ORDER BY start_time ASC, id ASC"
            );
            let mut stmt = conn.prepare_cached(&sql).map_err(backend)?;
            let rows = stmt
                .query_map(
                    params![
                        tenant_id,
                        window.map(|w| millis(w.start)),
                        window.map(|w| millis(w.end)),
                    ],
                    ShiftRow::read,
                )
                .map_err(backend)?;
            rows.map(|row| row.map_err(backend).and_then(|r| r.into_shift(conn)))
                .collect()
        })
        .await
    }

    async fn find(&self, tenant_id: &str, shift_id: Uuid) -> Result<Option<Shift>, StoreError> {
        let tenant_id = tenant_id.to_string();
        self.run(move |conn| {
            let conn = &*conn;
            let sql = format!("SELECT {SHIFT_COLUMNS} FROM shifts WHERE id = ?1 AND tenant_id = ?2");
            let row = conn
                .query_row(&sql, params![shift_id.to_string(), tenant_id], ShiftRow::read)
                .optional()
                .map_err(backend)?;
            row.map(|r| r.into_shift(conn)).transpose()
        })
        .await
    }

    async fn insert_exclusive(&self, shift: &Shift) -> Result<(), StoreError> {
        let shift = shift.clone();
        self.run(move |conn| {
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(backend)?;

            let overlapping: bool = tx
                .query_row(
                    "SELECT EXISTS (SELECT 1 FROM shifts \
                     WHERE tenant_id = ?1 AND start_time < ?2 AND ?3 < end_time)",
                    params![shift.tenant_id, millis(shift.end_time), millis(shift.start_time)],
                    |row| row.get(0),
                )
                .map_err(backend)?;
            if overlapping {
                return Err(StoreError::Conflict {
                    constraint: SHIFT_OVERLAP_CONSTRAINT,
                });
            }

            tx.execute(
                "INSERT INTO shifts (id, tenant_id, start_time, end_time, role, team, description, \
                 is_recurring) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    shift.id.to_string(),
                    shift.tenant_id,
                    millis(shift.start_time),
                    millis(shift.end_time),
                    shift.role,
                    shift.team,
                    shift.description,
                    shift.is_recurring,
                ],
            )
            .map_err(backend)?;
            for assignment in &shift.assignees {
                insert_assignment(&tx, assignment)?;
            }
            tx.commit().map_err(backend)
        })
        .await
    }

    async fn add_assignments(
        &self,
        tenant_id: &str,
        assignments: &[ShiftAssignment],
    ) -> Result<Vec<Uuid>, StoreError> {
        let Some(shift_id) = assignments.first().map(|a| a.shift_id) else {
            return Ok(Vec::new());
        };
        let (tenant_id, assignments) = (tenant_id.to_string(), assignments.to_vec());
        self.run(move |conn| {
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(backend)?;

            let exists: bool = tx
                .query_row(
                    "SELECT EXISTS (SELECT 1 FROM shifts WHERE id = ?1 AND tenant_id = ?2)",
                    params![shift_id.to_string(), tenant_id],
                    |row| row.get(0),
                )
                .map_err(backend)?;
            if !exists {
                return Err(StoreError::Stale {
                    entity: "shift",
                    id: shift_id,
                });
            }

            let mut added = Vec::new();
            for assignment in &assignments {
                if insert_assignment(&tx, assignment)? > 0 {
                    added.push(assignment.user_id);
                }
            }
            tx.commit().map_err(backend)?;
            Ok(added)
        })
        .await
    }

    async fn delete(&self, tenant_id: &str, shift_id: Uuid) -> Result<bool, StoreError> {
        let tenant_id = tenant_id.to_string();
        self.run(move |conn| {
            let changed = conn
                .execute(
                    "DELETE FROM shifts WHERE id = ?1 AND tenant_id = ?2",
                    params![shift_id.to_string(), tenant_id],
                )
                .map_err(backend)?;
            Ok(changed > 0)
        })
        .await
    }
}

#[cfg(test)]
mod sqlite_shifts_tests {
    use super::*;
    use crate::test_support::fixtures::time_entries::{TENANT_A, TENANT_B, at};
    use chrono::{DateTime, Utc};
    use rstest::{fixture, rstest};

    #[fixture]
    fn before_each() -> SqliteStore {
        SqliteStore::in_memory().unwrap()
    }

    fn shift(tenant_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Shift {
        Shift {
            id: Uuid::now_v7(),
            tenant_id: tenant_id.into(),
            start_time: start,
            end_time: end,
            role: Some("technician".into()),
            team: None,
            description: Some("Morning".into()),
            is_recurring: false,
            assignees: vec![],
        }
    }

    fn assignment(shift_id: Uuid, user_id: Uuid) -> ShiftAssignment {
        ShiftAssignment {
            shift_id,
            user_id,
            accepted: false,
            assigned_by: Some(Uuid::now_v7()),
            assigned_at: at(8, 0),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_overlapping_shifts(before_each: SqliteStore) {
        let store = before_each;
        store
            .insert_exclusive(&shift(TENANT_A, at(9, 0), at(17, 0)))
            .await
            .unwrap();

        let overlapping = store
            .insert_exclusive(&shift(TENANT_A, at(12, 0), at(13, 0)))
            .await;
        let adjacent = store
            .insert_exclusive(&shift(TENANT_A, at(17, 0), at(21, 0)))
            .await;
        let foreign = store
            .insert_exclusive(&shift(TENANT_B, at(9, 0), at(17, 0)))
            .await;

        assert_eq!(
            overlapping,
            Err(StoreError::Conflict {
                constraint: SHIFT_OVERLAP_CONSTRAINT
            })
        );
        assert_eq!(adjacent, Ok(()));
        assert_eq!(foreign, Ok(()));
        assert_eq!(store.list(TENANT_A, None).await.unwrap().len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_list_shifts_intersecting_the_window(before_each: SqliteStore) {
        let store = before_each;
        let morning = shift(TENANT_A, at(6, 0), at(10, 0));
        let evening = shift(TENANT_A, at(18, 0), at(22, 0));
        store.insert_exclusive(&evening).await.unwrap();
        store.insert_exclusive(&morning).await.unwrap();

        let all = store.list(TENANT_A, None).await.unwrap();
        let windowed = store
            .list(TENANT_A, Some(&TimeWindow::new(at(9, 0), at(18, 0))))
            .await
            .unwrap();

        assert_eq!(all, vec![morning.clone(), evening]);
        assert_eq!(windowed, vec![morning]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_add_assignments_idempotently(before_each: SqliteStore) {
        let store = before_each;
        let stored = shift(TENANT_A, at(9, 0), at(17, 0));
        store.insert_exclusive(&stored).await.unwrap();
        let user = Uuid::now_v7();
        let first = assignment(stored.id, user);

        assert_eq!(store.add_assignments(TENANT_A, &[first.clone()]).await, Ok(vec![user]));
        assert_eq!(store.add_assignments(TENANT_A, &[first.clone()]).await, Ok(vec![]));
        assert_eq!(store.add_assignments(TENANT_A, &[]).await, Ok(vec![]));

        let found = store.find(TENANT_A, stored.id).await.unwrap().unwrap();
        assert_eq!(found.assignees, vec![first]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_refuse_assignments_to_a_foreign_shift(before_each: SqliteStore) {
        let store = before_each;
        let stored = shift(TENANT_B, at(9, 0), at(17, 0));
        store.insert_exclusive(&stored).await.unwrap();

        let result = store
            .add_assignments(TENANT_A, &[assignment(stored.id, Uuid::now_v7())])
            .await;

        assert_eq!(
            result,
            Err(StoreError::Stale {
                entity: "shift",
                id: stored.id
            })
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_cascade_assignments_on_delete(before_each: SqliteStore) {
        let store = before_each;
        let stored = shift(TENANT_A, at(9, 0), at(17, 0));
        store.insert_exclusive(&stored).await.unwrap();
        store
            .add_assignments(TENANT_A, &[assignment(stored.id, Uuid::now_v7())])
            .await
            .unwrap();

        assert_eq!(store.delete(TENANT_B, stored.id).await, Ok(false));
        assert_eq!(store.delete(TENANT_A, stored.id).await, Ok(true));

        let orphans: i64 = store
            .run(|conn| {
                conn.query_row("SELECT COUNT(*) FROM shift_assignments", [], |row| row.get(0))
                    .map_err(backend)
            })
            .await
            .unwrap();
        assert_eq!(orphans, 0);
    }
}

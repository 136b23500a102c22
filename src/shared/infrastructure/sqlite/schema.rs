// SQLite schema, applied on every open.
//
// Notes
// - Timestamps are epoch milliseconds (INTEGER), identifiers are hyphenated UUID text.
// - uq_time_entries_open holds at most one open entry per (tenant, user).
// - Assignment rows go away with their shift (ON DELETE CASCADE, foreign_keys must be ON).

use rusqlite::Connection;

const BOOTSTRAP: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id          TEXT PRIMARY KEY,
    tenant_id   TEXT NOT NULL,
    full_name   TEXT NOT NULL,
    is_active   INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS tasks (
    id          TEXT PRIMARY KEY,
    tenant_id   TEXT NOT NULL,
    title       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS time_entries (
    id          TEXT PRIMARY KEY,
    tenant_id   TEXT NOT NULL,
    user_id     TEXT NOT NULL,
    start_time  INTEGER NOT NULL,
    end_time    INTEGER,
    kind        TEXT NOT NULL,
    duration    REAL,
    is_approved INTEGER NOT NULL DEFAULT 0,
    notes       TEXT,
    task_id     TEXT,
    shift_id    TEXT
);

CREATE UNIQUE INDEX IF NOT EXISTS uq_time_entries_open
    ON time_entries (tenant_id, user_id) WHERE end_time IS NULL;

CREATE INDEX IF NOT EXISTS ix_time_entries_tenant_start
    ON time_entries (tenant_id, start_time);

CREATE TABLE IF NOT EXISTS shifts (
    id           TEXT PRIMARY KEY,
    tenant_id    TEXT NOT NULL,
    start_time   INTEGER NOT NULL,
    end_time     INTEGER NOT NULL,
    role         TEXT,
    team         TEXT,
    description  TEXT,
    is_recurring INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS ix_shifts_tenant_start ON shifts (tenant_id, start_time);

CREATE TABLE IF NOT EXISTS shift_assignments (
    shift_id     TEXT NOT NULL REFERENCES shifts (id) ON DELETE CASCADE,
    user_id      TEXT NOT NULL,
    accepted     INTEGER NOT NULL DEFAULT 0,
    assigned_by  TEXT,
    assigned_at  INTEGER NOT NULL,
    PRIMARY KEY (shift_id, user_id)
);

CREATE TABLE IF NOT EXISTS notifications (
    id          TEXT PRIMARY KEY,
    tenant_id   TEXT NOT NULL,
    user_id     TEXT,
    task_id     TEXT,
    type        TEXT NOT NULL,
    message     TEXT NOT NULL,
    payload     TEXT,
    severity    TEXT NOT NULL,
    is_read     INTEGER NOT NULL DEFAULT 0,
    delivered   INTEGER NOT NULL DEFAULT 0,
    created_at  INTEGER NOT NULL,
    read_at     INTEGER
);

CREATE INDEX IF NOT EXISTS ix_notifications_recipient
    ON notifications (tenant_id, user_id, created_at);
";

pub fn bootstrap(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(BOOTSTRAP)
}

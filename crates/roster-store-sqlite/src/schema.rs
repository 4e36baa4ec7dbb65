//! SQL schema for the roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// The UNIQUE constraints on `departments.name` and `employees.email` are the
/// final arbiter for uniqueness under concurrent writers; service-level
/// pre-checks only exist to produce precise error values.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS departments (
    department_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS employees (
    employee_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,
    department_id INTEGER NOT NULL REFERENCES departments(department_id),
    status        TEXT NOT NULL,   -- 'Active' | 'Inactive' | 'OnLeave'
    hire_date     TEXT NOT NULL    -- ISO 8601 date; lexical order == date order
);

-- log_history is strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
-- employee_id deliberately carries no foreign key: audit entries outlive
-- the employee row they describe.
CREATE TABLE IF NOT EXISTS log_history (
    log_id      INTEGER PRIMARY KEY AUTOINCREMENT,
    employee_id INTEGER NOT NULL,
    action      TEXT NOT NULL,     -- 'Created' | 'Updated' | 'Deleted'
    description TEXT NOT NULL,
    recorded_at TEXT NOT NULL      -- ISO 8601 UTC; server-assigned
);

CREATE INDEX IF NOT EXISTS employees_department_idx ON employees(department_id);
CREATE INDEX IF NOT EXISTS employees_hire_date_idx  ON employees(hire_date);
CREATE INDEX IF NOT EXISTS log_history_employee_idx ON log_history(employee_id);

PRAGMA user_version = 1;
";

//! [`SqliteStore`] — the SQLite implementation of [`PersonnelStore`].
//!
//! Every mutation runs inside one transaction covering its validity checks,
//! the row write, and the audit-log append. The repository helpers below
//! operate on that transaction; `commit` is the atomic boundary.

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, Transaction};

use roster_core::{
  Error as CoreError, Result as CoreResult,
  department::{Department, NewDepartment},
  employee::{Employee, EmployeeUpdate, NewEmployee},
  log::{LogAction, LogEntry},
  query::{EmployeeQuery, Page, SortField, SortOrder},
  store::PersonnelStore,
};

use crate::{
  Error, Result,
  encode::{
    RawEmployee, RawLogEntry, encode_action, encode_date, encode_dt,
    encode_status,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A roster store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Repository helpers ──────────────────────────────────────────────────────
// Per-entity data access against the caller's transaction. The transaction is
// the unit of work; nothing is visible until `tx.commit()`.

fn department_exists(tx: &Transaction<'_>, id: i64) -> rusqlite::Result<bool> {
  tx.query_row(
    "SELECT 1 FROM departments WHERE department_id = ?1",
    rusqlite::params![id],
    |_| Ok(true),
  )
  .optional()
  .map(|r| r.unwrap_or(false))
}

fn department_name_taken(
  tx: &Transaction<'_>,
  name: &str,
) -> rusqlite::Result<bool> {
  tx.query_row(
    "SELECT 1 FROM departments WHERE name = ?1",
    rusqlite::params![name],
    |_| Ok(true),
  )
  .optional()
  .map(|r| r.unwrap_or(false))
}

/// `true` if `email` belongs to an employee other than `exclude`.
fn email_taken(
  tx: &Transaction<'_>,
  email: &str,
  exclude: Option<i64>,
) -> rusqlite::Result<bool> {
  tx.query_row(
    "SELECT 1 FROM employees WHERE email = ?1 AND employee_id != COALESCE(?2, -1)",
    rusqlite::params![email, exclude],
    |_| Ok(true),
  )
  .optional()
  .map(|r| r.unwrap_or(false))
}

fn select_employee(
  tx: &Transaction<'_>,
  id: i64,
) -> rusqlite::Result<Option<RawEmployee>> {
  tx.query_row(
    "SELECT employee_id, name, email, department_id, status, hire_date
     FROM employees WHERE employee_id = ?1",
    rusqlite::params![id],
    |row| {
      Ok(RawEmployee {
        id:            row.get(0)?,
        name:          row.get(1)?,
        email:         row.get(2)?,
        department_id: row.get(3)?,
        status:        row.get(4)?,
        hire_date:     row.get(5)?,
      })
    },
  )
  .optional()
}

fn insert_log(
  tx: &Transaction<'_>,
  employee_id: i64,
  action: LogAction,
  description: &str,
) -> rusqlite::Result<()> {
  tx.execute(
    "INSERT INTO log_history (employee_id, action, description, recorded_at)
     VALUES (?1, ?2, ?3, ?4)",
    rusqlite::params![
      employee_id,
      encode_action(action),
      description,
      encode_dt(Utc::now()),
    ],
  )?;
  Ok(())
}

/// Human-readable summary of the fields an update actually changed.
fn describe_changes(old: &Employee, new: &Employee) -> String {
  let mut parts = Vec::new();
  if old.name != new.name {
    parts.push(format!("name: {:?} -> {:?}", old.name, new.name));
  }
  if old.email != new.email {
    parts.push(format!("email: {:?} -> {:?}", old.email, new.email));
  }
  if old.department_id != new.department_id {
    parts.push(format!(
      "department: {} -> {}",
      old.department_id, new.department_id
    ));
  }
  if old.status != new.status {
    parts.push(format!("status: {:?} -> {:?}", old.status, new.status));
  }
  if old.hire_date != new.hire_date {
    parts.push(format!("hire date: {} -> {}", old.hire_date, new.hire_date));
  }
  if parts.is_empty() {
    "no fields changed".to_owned()
  } else {
    parts.join("; ")
  }
}

// ─── Error folding ───────────────────────────────────────────────────────────

fn db_err(e: tokio_rusqlite::Error) -> CoreError {
  CoreError::store(Error::Database(e))
}

/// Fold a database-level failure into the shared taxonomy.
///
/// The UNIQUE constraints are the final arbiter for uniqueness under
/// concurrent writers, so a constraint violation that slipped past the
/// in-transaction pre-check still maps to the matching conflict variant.
fn classify_constraint(
  err: tokio_rusqlite::Error,
  email: Option<&str>,
  department_name: Option<&str>,
) -> CoreError {
  if let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(
    f,
    Some(msg),
  )) = &err
    && f.code == rusqlite::ErrorCode::ConstraintViolation
  {
    if msg.contains("employees.email")
      && let Some(email) = email
    {
      return CoreError::DuplicateEmail(email.to_owned());
    }
    if msg.contains("departments.name")
      && let Some(name) = department_name
    {
      return CoreError::DuplicateDepartmentName(name.to_owned());
    }
  }
  db_err(err)
}

// ─── PersonnelStore impl ─────────────────────────────────────────────────────

impl PersonnelStore for SqliteStore {
  // ── Departments ───────────────────────────────────────────────────────────

  async fn list_departments(&self) -> CoreResult<Vec<Department>> {
    self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT department_id, name FROM departments ORDER BY department_id ASC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Department { id: row.get(0)?, name: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(db_err)
  }

  async fn get_department(&self, id: i64) -> CoreResult<Option<Department>> {
    self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT department_id, name FROM departments WHERE department_id = ?1",
              rusqlite::params![id],
              |row| Ok(Department { id: row.get(0)?, name: row.get(1)? }),
            )
            .optional()?,
        )
      })
      .await
      .map_err(db_err)
  }

  async fn add_department(&self, input: NewDepartment) -> CoreResult<Department> {
    let name_for_err = input.name.clone();

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        if department_name_taken(&tx, &input.name)? {
          return Ok(Err(CoreError::DuplicateDepartmentName(input.name)));
        }

        tx.execute(
          "INSERT INTO departments (name) VALUES (?1)",
          rusqlite::params![input.name],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Ok(Department { id, name: input.name }))
      })
      .await;

    match outcome {
      Ok(result) => result,
      Err(e) => Err(classify_constraint(e, None, Some(&name_for_err))),
    }
  }

  // ── Employees ─────────────────────────────────────────────────────────────

  async fn list_employees(&self, query: &EmployeeQuery) -> CoreResult<Page<Employee>> {
    let name_pattern  = query.name.as_deref().map(|n| format!("%{n}%"));
    let department_id = query.department_id;
    let status        = query.status.map(encode_status).map(str::to_owned);
    let start         = query.hire_date_start.map(encode_date);
    let end           = query.hire_date_end.map(encode_date);

    // Sort key and direction come from closed enums, never from user text.
    let order_col = match query.sort_by {
      SortField::Id => "employee_id",
      SortField::Name => "name",
      SortField::HireDate => "hire_date",
      SortField::DepartmentId => "department_id",
    };
    let order_dir = match query.sort_order {
      SortOrder::Ascending => "ASC",
      SortOrder::Descending => "DESC",
    };

    let page_number = query.page_number;
    let page_size   = query.page_size;
    let limit       = i64::from(page_size);
    let offset      = i64::from(page_number.saturating_sub(1)) * i64::from(page_size);

    let (raws, total) = self
      .conn
      .call(move |conn| {
        // Build the WHERE clause dynamically, numbering placeholders as the
        // bound values accumulate.
        let mut conds: Vec<String> = Vec::new();
        let mut binds: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(pattern) = name_pattern {
          binds.push(Box::new(pattern));
          conds.push(format!("name LIKE ?{}", binds.len()));
        }
        if let Some(id) = department_id {
          binds.push(Box::new(id));
          conds.push(format!("department_id = ?{}", binds.len()));
        }
        if let Some(status) = status {
          binds.push(Box::new(status));
          conds.push(format!("status = ?{}", binds.len()));
        }
        if let Some(start) = start {
          binds.push(Box::new(start));
          conds.push(format!("hire_date >= ?{}", binds.len()));
        }
        if let Some(end) = end {
          binds.push(Box::new(end));
          conds.push(format!("hire_date <= ?{}", binds.len()));
        }

        let where_clause = if conds.is_empty() {
          String::new()
        } else {
          format!("WHERE {}", conds.join(" AND "))
        };

        let total: i64 = conn.query_row(
          &format!("SELECT COUNT(*) FROM employees {where_clause}"),
          rusqlite::params_from_iter(binds.iter().map(|b| b.as_ref())),
          |row| row.get(0),
        )?;

        binds.push(Box::new(limit));
        let limit_slot = binds.len();
        binds.push(Box::new(offset));
        let offset_slot = binds.len();

        let sql = format!(
          "SELECT employee_id, name, email, department_id, status, hire_date
           FROM employees
           {where_clause}
           ORDER BY {order_col} {order_dir}, employee_id ASC
           LIMIT ?{limit_slot} OFFSET ?{offset_slot}"
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params_from_iter(binds.iter().map(|b| b.as_ref())),
            |row| {
              Ok(RawEmployee {
                id:            row.get(0)?,
                name:          row.get(1)?,
                email:         row.get(2)?,
                department_id: row.get(3)?,
                status:        row.get(4)?,
                hire_date:     row.get(5)?,
              })
            },
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((rows, total))
      })
      .await
      .map_err(db_err)?;

    let items = raws
      .into_iter()
      .map(|r| r.into_employee().map_err(CoreError::store))
      .collect::<CoreResult<Vec<_>>>()?;

    Ok(Page {
      items,
      total_count: total as u64,
      page_number,
      page_size,
    })
  }

  async fn get_employee(&self, id: i64) -> CoreResult<Option<Employee>> {
    let raw: Option<RawEmployee> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT employee_id, name, email, department_id, status, hire_date
               FROM employees WHERE employee_id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(RawEmployee {
                  id:            row.get(0)?,
                  name:          row.get(1)?,
                  email:         row.get(2)?,
                  department_id: row.get(3)?,
                  status:        row.get(4)?,
                  hire_date:     row.get(5)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await
      .map_err(db_err)?;

    raw
      .map(RawEmployee::into_employee)
      .transpose()
      .map_err(CoreError::store)
  }

  async fn add_employee(&self, input: NewEmployee) -> CoreResult<Employee> {
    let email_for_err = input.email.clone();

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        if !department_exists(&tx, input.department_id)? {
          return Ok(Err(CoreError::DepartmentNotFound(input.department_id)));
        }
        if email_taken(&tx, &input.email, None)? {
          return Ok(Err(CoreError::DuplicateEmail(input.email)));
        }

        tx.execute(
          "INSERT INTO employees (name, email, department_id, status, hire_date)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            input.name,
            input.email,
            input.department_id,
            encode_status(input.status),
            encode_date(input.hire_date),
          ],
        )?;
        let id = tx.last_insert_rowid();

        insert_log(
          &tx,
          id,
          LogAction::Created,
          &format!(
            "created: email {:?}, department {}",
            input.email, input.department_id
          ),
        )?;
        tx.commit()?;

        Ok(Ok(Employee {
          id,
          name:          input.name,
          email:         input.email,
          department_id: input.department_id,
          status:        input.status,
          hire_date:     input.hire_date,
        }))
      })
      .await;

    match outcome {
      Ok(result) => result,
      Err(e) => Err(classify_constraint(e, Some(&email_for_err), None)),
    }
  }

  async fn update_employee(
    &self,
    id: i64,
    update: EmployeeUpdate,
  ) -> CoreResult<Employee> {
    let email_for_err = update.email.clone();

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let current = match select_employee(&tx, id)? {
          Some(raw) => match raw.into_employee() {
            Ok(e) => e,
            Err(e) => return Ok(Err(CoreError::store(e))),
          },
          None => return Ok(Err(CoreError::EmployeeNotFound(id))),
        };

        if let Some(department_id) = update.department_id
          && !department_exists(&tx, department_id)?
        {
          return Ok(Err(CoreError::DepartmentNotFound(department_id)));
        }
        if let Some(email) = &update.email
          && email_taken(&tx, email, Some(id))?
        {
          return Ok(Err(CoreError::DuplicateEmail(email.clone())));
        }

        let next = Employee {
          id,
          name:          update.name.unwrap_or_else(|| current.name.clone()),
          email:         update.email.unwrap_or_else(|| current.email.clone()),
          department_id: update.department_id.unwrap_or(current.department_id),
          status:        update.status.unwrap_or(current.status),
          hire_date:     update.hire_date.unwrap_or(current.hire_date),
        };

        tx.execute(
          "UPDATE employees
           SET name = ?1, email = ?2, department_id = ?3, status = ?4, hire_date = ?5
           WHERE employee_id = ?6",
          rusqlite::params![
            next.name,
            next.email,
            next.department_id,
            encode_status(next.status),
            encode_date(next.hire_date),
            id,
          ],
        )?;

        insert_log(&tx, id, LogAction::Updated, &describe_changes(&current, &next))?;
        tx.commit()?;

        Ok(Ok(next))
      })
      .await;

    match outcome {
      Ok(result) => result,
      Err(e) => Err(classify_constraint(e, email_for_err.as_deref(), None)),
    }
  }

  async fn remove_employee(&self, id: i64) -> CoreResult<()> {
    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let raw = match select_employee(&tx, id)? {
          Some(raw) => raw,
          None => return Ok(Err(CoreError::EmployeeNotFound(id))),
        };

        tx.execute(
          "DELETE FROM employees WHERE employee_id = ?1",
          rusqlite::params![id],
        )?;
        insert_log(
          &tx,
          id,
          LogAction::Deleted,
          &format!("deleted: email {:?}", raw.email),
        )?;
        tx.commit()?;

        Ok(Ok(()))
      })
      .await;

    match outcome {
      Ok(result) => result,
      Err(e) => Err(db_err(e)),
    }
  }

  // ── Log history ───────────────────────────────────────────────────────────

  async fn list_log(&self, employee_id: Option<i64>) -> CoreResult<Vec<LogEntry>> {
    let raws: Vec<RawLogEntry> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(employee_id) = employee_id {
          let mut stmt = conn.prepare(
            "SELECT log_id, employee_id, action, description, recorded_at
             FROM log_history
             WHERE employee_id = ?1
             ORDER BY recorded_at DESC, log_id DESC",
          )?;
          stmt
            .query_map(rusqlite::params![employee_id], |row| {
              Ok(RawLogEntry {
                id:          row.get(0)?,
                employee_id: row.get(1)?,
                action:      row.get(2)?,
                description: row.get(3)?,
                recorded_at: row.get(4)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(
            "SELECT log_id, employee_id, action, description, recorded_at
             FROM log_history
             ORDER BY recorded_at DESC, log_id DESC",
          )?;
          stmt
            .query_map([], |row| {
              Ok(RawLogEntry {
                id:          row.get(0)?,
                employee_id: row.get(1)?,
                action:      row.get(2)?,
                description: row.get(3)?,
                recorded_at: row.get(4)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await
      .map_err(db_err)?;

    raws
      .into_iter()
      .map(|r| r.into_entry().map_err(CoreError::store))
      .collect()
  }
}

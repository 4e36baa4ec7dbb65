//! The `PersonnelStore` trait — the seam between the HTTP surface and a
//! storage backend.
//!
//! Every mutation (validity checks, the row write, and the audit-log append)
//! is one atomic unit of work: a failure partway must leave no orphan row
//! and no missing or dangling log entry.
//!
//! Failure kinds are carried in [`crate::Error`] so callers can distinguish a
//! missing resource from a uniqueness or referential conflict directly,
//! without a follow-up existence check.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use crate::{
  Result,
  department::{Department, NewDepartment},
  employee::{Employee, EmployeeUpdate, NewEmployee},
  log::LogEntry,
  query::{EmployeeQuery, Page},
};

/// Abstraction over a roster storage backend.
pub trait PersonnelStore: Send + Sync {
  // ── Departments ───────────────────────────────────────────────────────

  /// List all departments, ordered by id ascending.
  fn list_departments(
    &self,
  ) -> impl Future<Output = Result<Vec<Department>>> + Send + '_;

  /// Retrieve a department by id. Returns `None` if not found.
  fn get_department(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Department>>> + Send + '_;

  /// Create and persist a new department.
  ///
  /// Fails with [`Error::DuplicateDepartmentName`](crate::Error) if the name
  /// is already taken (case-sensitive, exact match).
  fn add_department(
    &self,
    input: NewDepartment,
  ) -> impl Future<Output = Result<Department>> + Send + '_;

  // ── Employees ─────────────────────────────────────────────────────────

  /// Filter, sort, and paginate employees.
  fn list_employees<'a>(
    &'a self,
    query: &'a EmployeeQuery,
  ) -> impl Future<Output = Result<Page<Employee>>> + Send + 'a;

  /// Retrieve an employee by id. Returns `None` if not found.
  fn get_employee(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Employee>>> + Send + '_;

  /// Create an employee and append a `Created` log entry atomically.
  ///
  /// Fails with [`Error::DepartmentNotFound`](crate::Error) if
  /// `department_id` does not reference an existing department, or
  /// [`Error::DuplicateEmail`](crate::Error) if the email is already
  /// registered.
  fn add_employee(
    &self,
    input: NewEmployee,
  ) -> impl Future<Output = Result<Employee>> + Send + '_;

  /// Apply a partial update and append an `Updated` log entry describing the
  /// changed fields, atomically.
  ///
  /// Fails with [`Error::EmployeeNotFound`](crate::Error) if `id` does not
  /// exist, [`Error::DepartmentNotFound`](crate::Error) if the new
  /// department is missing, or [`Error::DuplicateEmail`](crate::Error) if
  /// the new email belongs to a different employee.
  fn update_employee(
    &self,
    id: i64,
    update: EmployeeUpdate,
  ) -> impl Future<Output = Result<Employee>> + Send + '_;

  /// Delete an employee and append a `Deleted` log entry atomically.
  ///
  /// Fails with [`Error::EmployeeNotFound`](crate::Error) if `id` does not
  /// exist (including an employee that was already deleted).
  fn remove_employee(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  // ── Log history ───────────────────────────────────────────────────────

  /// List audit entries, optionally restricted to one employee.
  ///
  /// Entries come back newest-first; same-timestamp entries are ordered by
  /// id descending (reverse insertion order).
  fn list_log(
    &self,
    employee_id: Option<i64>,
  ) -> impl Future<Output = Result<Vec<LogEntry>>> + Send + '_;
}

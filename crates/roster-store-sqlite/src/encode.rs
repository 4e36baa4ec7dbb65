//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings; dates as ISO `YYYY-MM-DD` (so
//! lexical comparison in SQL matches chronological order); enums as fixed
//! tokens matching their JSON names.

use chrono::{DateTime, NaiveDate, Utc};
use roster_core::{
  employee::{Employee, EmployeeStatus},
  log::{LogAction, LogEntry},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── EmployeeStatus ──────────────────────────────────────────────────────────

pub fn encode_status(s: EmployeeStatus) -> &'static str {
  match s {
    EmployeeStatus::Active => "Active",
    EmployeeStatus::Inactive => "Inactive",
    EmployeeStatus::OnLeave => "OnLeave",
  }
}

pub fn decode_status(s: &str) -> Result<EmployeeStatus> {
  match s {
    "Active" => Ok(EmployeeStatus::Active),
    "Inactive" => Ok(EmployeeStatus::Inactive),
    "OnLeave" => Ok(EmployeeStatus::OnLeave),
    other => Err(Error::Decode(format!("unknown employee status: {other:?}"))),
  }
}

// ─── LogAction ───────────────────────────────────────────────────────────────

pub fn encode_action(a: LogAction) -> &'static str {
  match a {
    LogAction::Created => "Created",
    LogAction::Updated => "Updated",
    LogAction::Deleted => "Deleted",
  }
}

pub fn decode_action(s: &str) -> Result<LogAction> {
  match s {
    "Created" => Ok(LogAction::Created),
    "Updated" => Ok(LogAction::Updated),
    "Deleted" => Ok(LogAction::Deleted),
    other => Err(Error::Decode(format!("unknown log action: {other:?}"))),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from an `employees` row.
pub struct RawEmployee {
  pub id:            i64,
  pub name:          String,
  pub email:         String,
  pub department_id: i64,
  pub status:        String,
  pub hire_date:     String,
}

impl RawEmployee {
  pub fn into_employee(self) -> Result<Employee> {
    Ok(Employee {
      id:            self.id,
      name:          self.name,
      email:         self.email,
      department_id: self.department_id,
      status:        decode_status(&self.status)?,
      hire_date:     decode_date(&self.hire_date)?,
    })
  }
}

/// Raw values read directly from a `log_history` row.
pub struct RawLogEntry {
  pub id:          i64,
  pub employee_id: i64,
  pub action:      String,
  pub description: String,
  pub recorded_at: String,
}

impl RawLogEntry {
  pub fn into_entry(self) -> Result<LogEntry> {
    Ok(LogEntry {
      id:          self.id,
      employee_id: self.employee_id,
      action:      decode_action(&self.action)?,
      description: self.description,
      recorded_at: decode_dt(&self.recorded_at)?,
    })
  }
}

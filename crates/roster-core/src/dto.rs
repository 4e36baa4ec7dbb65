//! Transfer objects exposed at the API boundary and the mappings between
//! them and the persisted entity shapes.
//!
//! Pure and stateless: every valid entity maps to a transfer object and back
//! without losing any field present in both shapes. JSON field names are
//! camelCase at the boundary.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  department::Department,
  employee::{Employee, EmployeeStatus},
  log::{LogAction, LogEntry},
};

// ─── Department ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDto {
  pub id:   i64,
  pub name: String,
}

impl From<Department> for DepartmentDto {
  fn from(d: Department) -> Self {
    Self { id: d.id, name: d.name }
  }
}

impl From<DepartmentDto> for Department {
  fn from(d: DepartmentDto) -> Self {
    Self { id: d.id, name: d.name }
  }
}

// ─── Employee ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
  pub id:            i64,
  pub name:          String,
  pub email:         String,
  pub department_id: i64,
  pub status:        EmployeeStatus,
  pub hire_date:     NaiveDate,
}

impl From<Employee> for EmployeeDto {
  fn from(e: Employee) -> Self {
    Self {
      id:            e.id,
      name:          e.name,
      email:         e.email,
      department_id: e.department_id,
      status:        e.status,
      hire_date:     e.hire_date,
    }
  }
}

impl From<EmployeeDto> for Employee {
  fn from(e: EmployeeDto) -> Self {
    Self {
      id:            e.id,
      name:          e.name,
      email:         e.email,
      department_id: e.department_id,
      status:        e.status,
      hire_date:     e.hire_date,
    }
  }
}

// ─── Log entry ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntryDto {
  pub id:          i64,
  pub employee_id: i64,
  pub action:      LogAction,
  pub description: String,
  pub recorded_at: DateTime<Utc>,
}

impl From<LogEntry> for LogEntryDto {
  fn from(e: LogEntry) -> Self {
    Self {
      id:          e.id,
      employee_id: e.employee_id,
      action:      e.action,
      description: e.description,
      recorded_at: e.recorded_at,
    }
  }
}

impl From<LogEntryDto> for LogEntry {
  fn from(e: LogEntryDto) -> Self {
    Self {
      id:          e.id,
      employee_id: e.employee_id,
      action:      e.action,
      description: e.description,
      recorded_at: e.recorded_at,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn employee_mapping_is_lossless() {
    let employee = Employee {
      id:            7,
      name:          "Ada".into(),
      email:         "ada@x.com".into(),
      department_id: 1,
      status:        EmployeeStatus::OnLeave,
      hire_date:     NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
    };
    let back = Employee::from(EmployeeDto::from(employee.clone()));
    assert_eq!(back, employee);
  }

  #[test]
  fn employee_dto_uses_camel_case_and_plain_status_names() {
    let dto = EmployeeDto {
      id:            1,
      name:          "Ada".into(),
      email:         "ada@x.com".into(),
      department_id: 2,
      status:        EmployeeStatus::OnLeave,
      hire_date:     NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
    };
    let json = serde_json::to_value(&dto).unwrap();
    assert_eq!(json["departmentId"], 2);
    assert_eq!(json["hireDate"], "2023-01-01");
    assert_eq!(json["status"], "OnLeave");
  }
}

//! Employee entity and its write shapes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Employment status. Serialised with the variant name as-is (`"Active"`,
/// `"Inactive"`, `"OnLeave"`) both in JSON and in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeStatus {
  Active,
  Inactive,
  OnLeave,
}

/// An employee row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
  pub id:            i64,
  pub name:          String,
  pub email:         String,
  pub department_id: i64,
  pub status:        EmployeeStatus,
  pub hire_date:     NaiveDate,
}

/// Input for creating an employee. The id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewEmployee {
  pub name:          String,
  pub email:         String,
  pub department_id: i64,
  pub status:        EmployeeStatus,
  pub hire_date:     NaiveDate,
}

/// A partial update. `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct EmployeeUpdate {
  pub name:          Option<String>,
  pub email:         Option<String>,
  pub department_id: Option<i64>,
  pub status:        Option<EmployeeStatus>,
  pub hire_date:     Option<NaiveDate>,
}

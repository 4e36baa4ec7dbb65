//! Department — the owning side of the employee → department reference.

use serde::{Deserialize, Serialize};

/// A department row. `name` is unique (case-sensitive, exact match) across
/// all departments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
  pub id:   i64,
  pub name: String,
}

/// Input for creating a department. The id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewDepartment {
  pub name: String,
}

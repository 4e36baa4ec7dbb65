//! Query and pagination types for employee listing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::employee::EmployeeStatus;

// ─── Sorting ─────────────────────────────────────────────────────────────────

/// Sort key for [`EmployeeQuery`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
  #[default]
  Id,
  Name,
  HireDate,
  DepartmentId,
}

/// Sort direction. Accepts the short forms `asc`/`desc` as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
  #[default]
  #[serde(alias = "asc")]
  Ascending,
  #[serde(alias = "desc")]
  Descending,
}

// ─── Query ───────────────────────────────────────────────────────────────────

/// Parameters for [`PersonnelStore::list_employees`](crate::store::PersonnelStore::list_employees).
///
/// Filters combine conjunctively; sorting happens before pagination. The id
/// is always the final sort tiebreak so page boundaries are stable.
#[derive(Debug, Clone)]
pub struct EmployeeQuery {
  /// Case-insensitive substring match on the employee name.
  pub name:            Option<String>,
  pub department_id:   Option<i64>,
  pub status:          Option<EmployeeStatus>,
  /// Inclusive lower bound on hire date.
  pub hire_date_start: Option<NaiveDate>,
  /// Inclusive upper bound on hire date.
  pub hire_date_end:   Option<NaiveDate>,
  pub sort_by:         SortField,
  pub sort_order:      SortOrder,
  /// 1-based page number.
  pub page_number:     u32,
  pub page_size:       u32,
}

impl Default for EmployeeQuery {
  fn default() -> Self {
    Self {
      name:            None,
      department_id:   None,
      status:          None,
      hire_date_start: None,
      hire_date_end:   None,
      sort_by:         SortField::default(),
      sort_order:      SortOrder::default(),
      page_number:     1,
      page_size:       10,
    }
  }
}

// ─── Page ────────────────────────────────────────────────────────────────────

/// One page of results plus the total count of matching records.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
  pub items:       Vec<T>,
  pub total_count: u64,
  pub page_number: u32,
  pub page_size:   u32,
}

impl<T> Page<T> {
  /// Number of pages needed to cover `total_count` at this page size.
  pub fn total_pages(&self) -> u64 {
    self.total_count.div_ceil(u64::from(self.page_size.max(1)))
  }

  /// Map the items, keeping the pagination metadata.
  pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
    Page {
      items:       self.items.into_iter().map(f).collect(),
      total_count: self.total_count,
      page_number: self.page_number,
      page_size:   self.page_size,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_are_first_page_of_ten_by_id() {
    let q = EmployeeQuery::default();
    assert_eq!(q.page_number, 1);
    assert_eq!(q.page_size, 10);
    assert_eq!(q.sort_by, SortField::Id);
    assert_eq!(q.sort_order, SortOrder::Ascending);
  }

  #[test]
  fn total_pages_rounds_up() {
    let page = Page::<()> {
      items:       vec![],
      total_count: 21,
      page_number: 1,
      page_size:   10,
    };
    assert_eq!(page.total_pages(), 3);
  }

  #[test]
  fn sort_order_accepts_short_forms() {
    let o: SortOrder = serde_json::from_str("\"desc\"").unwrap();
    assert_eq!(o, SortOrder::Descending);
    let o: SortOrder = serde_json::from_str("\"ascending\"").unwrap();
    assert_eq!(o, SortOrder::Ascending);
  }
}

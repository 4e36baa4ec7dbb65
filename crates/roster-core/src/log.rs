//! Audit-log types.
//!
//! Entries are strictly append-only: written once as a side effect of an
//! employee mutation, never updated or deleted. An entry may outlive the
//! employee row it refers to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of mutation that produced a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogAction {
  Created,
  Updated,
  Deleted,
}

/// One audit-trail entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
  pub id:          i64,
  pub employee_id: i64,
  pub action:      LogAction,
  /// Free-form summary of what changed, e.g. `name: "Ada" -> "Ada L."`.
  pub description: String,
  pub recorded_at: DateTime<Utc>,
}

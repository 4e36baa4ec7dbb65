//! Handler for `GET /loghistory`.
//!
//! Entries come back newest-first. `employeeId` narrows the list to one
//! employee; the log is read-only at this surface.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use roster_core::{dto::LogEntryDto, store::PersonnelStore};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
  pub employee_id: Option<i64>,
}

/// `GET /loghistory[?employeeId=<id>]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<LogEntryDto>>, ApiError>
where
  S: PersonnelStore,
{
  let entries = store.list_log(params.employee_id).await?;
  Ok(Json(entries.into_iter().map(LogEntryDto::from).collect()))
}

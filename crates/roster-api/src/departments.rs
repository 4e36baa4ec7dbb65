//! Handlers for `/departments` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/departments` | All departments, ordered by id |
//! | `GET`  | `/departments/:id` | 404 if not found |
//! | `POST` | `/departments` | Body: `{"name":"Engineering"}`; 409 on duplicate |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::{StatusCode, header},
  response::IntoResponse,
};
use roster_core::{
  department::NewDepartment, dto::DepartmentDto, store::PersonnelStore,
};
use serde::Deserialize;

use crate::{MAX_NAME_LEN, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /departments`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<DepartmentDto>>, ApiError>
where
  S: PersonnelStore,
{
  let departments = store.list_departments().await?;
  Ok(Json(departments.into_iter().map(DepartmentDto::from).collect()))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /departments/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<DepartmentDto>, ApiError>
where
  S: PersonnelStore,
{
  let department = store
    .get_department(id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("department {id} not found")))?;
  Ok(Json(DepartmentDto::from(department)))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub name: String,
}

/// `POST /departments` — body: `{"name":"Engineering"}`.
///
/// Returns 201 with a `Location` header, 400 on an empty or overlong name,
/// 409 on a duplicate name.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PersonnelStore,
{
  if body.name.is_empty() {
    return Err(ApiError::BadRequest(
      "department name must not be empty".to_owned(),
    ));
  }
  if body.name.chars().count() > MAX_NAME_LEN {
    return Err(ApiError::BadRequest(format!(
      "department name must be at most {MAX_NAME_LEN} characters"
    )));
  }

  let department = store.add_department(NewDepartment { name: body.name }).await?;
  let location = format!("/api/departments/{}", department.id);

  Ok((
    StatusCode::CREATED,
    [(header::LOCATION, location)],
    Json(DepartmentDto::from(department)),
  ))
}

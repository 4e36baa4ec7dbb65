//! Handlers for `/employees` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/employees` | Filter/sort/paginate; see [`ListParams`] |
//! | `GET`    | `/employees/:id` | 404 if not found |
//! | `POST`   | `/employees` | 409 on missing department or duplicate email |
//! | `PUT`    | `/employees/:id` | Partial update; 404 vs 409 distinguished |
//! | `DELETE` | `/employees/:id` | 204 on success |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::{StatusCode, header},
  response::IntoResponse,
};
use chrono::NaiveDate;
use roster_core::{
  dto::EmployeeDto,
  employee::{EmployeeStatus, EmployeeUpdate, NewEmployee},
  query::{EmployeeQuery, Page, SortField, SortOrder},
  store::PersonnelStore,
};
use serde::Deserialize;

use crate::{MAX_NAME_LEN, error::ApiError};

// ─── Boundary validation ──────────────────────────────────────────────────────

fn validate_name(name: &str) -> Result<(), ApiError> {
  if name.is_empty() {
    return Err(ApiError::BadRequest("name must not be empty".to_owned()));
  }
  if name.chars().count() > MAX_NAME_LEN {
    return Err(ApiError::BadRequest(format!(
      "name must be at most {MAX_NAME_LEN} characters"
    )));
  }
  Ok(())
}

/// Shape check only; the store's uniqueness constraint does the real work.
fn validate_email(email: &str) -> Result<(), ApiError> {
  let valid = match email.split_once('@') {
    Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
    None => false,
  };
  if valid {
    Ok(())
  } else {
    Err(ApiError::BadRequest(format!("{email:?} is not a valid email")))
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
  /// Case-insensitive substring match on the employee name.
  pub name:            Option<String>,
  pub department_id:   Option<i64>,
  pub status:          Option<EmployeeStatus>,
  /// Inclusive bounds on hire date.
  pub hire_date_start: Option<NaiveDate>,
  pub hire_date_end:   Option<NaiveDate>,
  pub sort_by:         Option<SortField>,
  pub sort_order:      Option<SortOrder>,
  /// 1-based; defaults to 1.
  pub page_number:     Option<u32>,
  /// Defaults to 10.
  pub page_size:       Option<u32>,
}

/// `GET /employees?name=&departmentId=&status=&hireDateStart=&hireDateEnd=&sortBy=&sortOrder=&pageNumber=&pageSize=`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Page<EmployeeDto>>, ApiError>
where
  S: PersonnelStore,
{
  let page_number = params.page_number.unwrap_or(1);
  let page_size = params.page_size.unwrap_or(10);
  if page_number < 1 || page_size < 1 {
    return Err(ApiError::BadRequest(
      "pageNumber and pageSize must be positive integers".to_owned(),
    ));
  }

  let query = EmployeeQuery {
    name:            params.name,
    department_id:   params.department_id,
    status:          params.status,
    hire_date_start: params.hire_date_start,
    hire_date_end:   params.hire_date_end,
    sort_by:         params.sort_by.unwrap_or_default(),
    sort_order:      params.sort_order.unwrap_or_default(),
    page_number,
    page_size,
  };

  let page = store.list_employees(&query).await?;
  Ok(Json(page.map(EmployeeDto::from)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /employees/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<EmployeeDto>, ApiError>
where
  S: PersonnelStore,
{
  let employee = store
    .get_employee(id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("employee {id} not found")))?;
  Ok(Json(EmployeeDto::from(employee)))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
  pub name:          String,
  pub email:         String,
  pub department_id: i64,
  pub status:        EmployeeStatus,
  pub hire_date:     NaiveDate,
}

/// `POST /employees` — returns 201 with a `Location` header.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PersonnelStore,
{
  validate_name(&body.name)?;
  validate_email(&body.email)?;

  let employee = store
    .add_employee(NewEmployee {
      name:          body.name,
      email:         body.email,
      department_id: body.department_id,
      status:        body.status,
      hire_date:     body.hire_date,
    })
    .await?;
  let location = format!("/api/employees/{}", employee.id);

  Ok((
    StatusCode::CREATED,
    [(header::LOCATION, location)],
    Json(EmployeeDto::from(employee)),
  ))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// Partial update body: absent fields keep their current value.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBody {
  pub name:          Option<String>,
  pub email:         Option<String>,
  pub department_id: Option<i64>,
  pub status:        Option<EmployeeStatus>,
  pub hire_date:     Option<NaiveDate>,
}

/// `PUT /employees/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<UpdateBody>,
) -> Result<Json<EmployeeDto>, ApiError>
where
  S: PersonnelStore,
{
  if let Some(name) = &body.name {
    validate_name(name)?;
  }
  if let Some(email) = &body.email {
    validate_email(email)?;
  }

  let employee = store
    .update_employee(
      id,
      EmployeeUpdate {
        name:          body.name,
        email:         body.email,
        department_id: body.department_id,
        status:        body.status,
        hire_date:     body.hire_date,
      },
    )
    .await?;
  Ok(Json(EmployeeDto::from(employee)))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /employees/:id` — 204 on success, 404 if the id does not exist.
pub async fn remove<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  S: PersonnelStore,
{
  store.remove_employee(id).await?;
  Ok(StatusCode::NO_CONTENT)
}

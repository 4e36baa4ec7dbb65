//! HTTP-level tests for the API router against an in-memory store.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use roster_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

async fn app() -> Router {
  let store = SqliteStore::open_in_memory().await.expect("in-memory store");
  Router::new().nest("/api", api_router(Arc::new(store)))
}

async fn send(
  app: &Router,
  method: &str,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, Value, axum::http::HeaderMap) {
  let builder = Request::builder().method(method).uri(uri);
  let req = match body {
    Some(v) => builder
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(v.to_string()))
      .unwrap(),
    None => builder.body(Body::empty()).unwrap(),
  };

  let resp = app.clone().oneshot(req).await.unwrap();
  let status = resp.status();
  let headers = resp.headers().clone();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let value = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, value, headers)
}

async fn create_department(app: &Router, name: &str) -> i64 {
  let (status, body, _) =
    send(app, "POST", "/api/departments", Some(json!({ "name": name }))).await;
  assert_eq!(status, StatusCode::CREATED, "body: {body}");
  body["id"].as_i64().unwrap()
}

async fn create_employee(app: &Router, name: &str, email: &str, dept: i64) -> i64 {
  let (status, body, _) = send(
    app,
    "POST",
    "/api/employees",
    Some(json!({
      "name": name,
      "email": email,
      "departmentId": dept,
      "status": "Active",
      "hireDate": "2023-01-01",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "body: {body}");
  body["id"].as_i64().unwrap()
}

// ─── Departments ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_department_returns_201_with_location() {
  let app = app().await;
  let (status, body, headers) = send(
    &app,
    "POST",
    "/api/departments",
    Some(json!({ "name": "Engineering" })),
  )
  .await;

  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["name"], "Engineering");
  let id = body["id"].as_i64().unwrap();
  assert_eq!(
    headers.get(header::LOCATION).unwrap().to_str().unwrap(),
    format!("/api/departments/{id}")
  );

  let (status, fetched, _) =
    send(&app, "GET", &format!("/api/departments/{id}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(fetched, body);
}

#[tokio::test]
async fn duplicate_department_name_returns_409() {
  let app = app().await;
  create_department(&app, "Engineering").await;

  let (status, body, _) = send(
    &app,
    "POST",
    "/api/departments",
    Some(json!({ "name": "Engineering" })),
  )
  .await;
  assert_eq!(status, StatusCode::CONFLICT);
  assert!(body["error"].as_str().unwrap().contains("Engineering"));
}

#[tokio::test]
async fn empty_department_name_returns_400() {
  let app = app().await;
  let (status, _, _) =
    send(&app, "POST", "/api/departments", Some(json!({ "name": "" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_missing_department_returns_404() {
  let app = app().await;
  let (status, _, _) = send(&app, "GET", "/api/departments/42", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_departments_ordered_by_id() {
  let app = app().await;
  create_department(&app, "Engineering").await;
  create_department(&app, "Sales").await;

  let (status, body, _) = send(&app, "GET", "/api/departments", None).await;
  assert_eq!(status, StatusCode::OK);
  let names: Vec<&str> = body
    .as_array()
    .unwrap()
    .iter()
    .map(|d| d["name"].as_str().unwrap())
    .collect();
  assert_eq!(names, ["Engineering", "Sales"]);
}

// ─── Employees ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn employee_lifecycle_end_to_end() {
  let app = app().await;
  let dept = create_department(&app, "Engineering").await;

  // Create.
  let (status, created, headers) = send(
    &app,
    "POST",
    "/api/employees",
    Some(json!({
      "name": "Ada",
      "email": "ada@x.com",
      "departmentId": dept,
      "status": "Active",
      "hireDate": "2023-01-01",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  let id = created["id"].as_i64().unwrap();
  assert_eq!(
    headers.get(header::LOCATION).unwrap().to_str().unwrap(),
    format!("/api/employees/{id}")
  );
  assert_eq!(created["status"], "Active");
  assert_eq!(created["hireDate"], "2023-01-01");

  // One Created log entry so far.
  let (_, log, _) = send(&app, "GET", "/api/loghistory", None).await;
  let log = log.as_array().unwrap();
  assert_eq!(log.len(), 1);
  assert_eq!(log[0]["action"], "Created");
  assert_eq!(log[0]["employeeId"].as_i64().unwrap(), id);

  // Duplicate email is a conflict.
  let (status, _, _) = send(
    &app,
    "POST",
    "/api/employees",
    Some(json!({
      "name": "Imposter",
      "email": "ada@x.com",
      "departmentId": dept,
      "status": "Active",
      "hireDate": "2024-01-01",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CONFLICT);

  // Update to a nonexistent department is a conflict, not a 404.
  let (status, _, _) = send(
    &app,
    "PUT",
    &format!("/api/employees/{id}"),
    Some(json!({ "departmentId": 99 })),
  )
  .await;
  assert_eq!(status, StatusCode::CONFLICT);

  // Update of a missing employee is a 404.
  let (status, _, _) = send(
    &app,
    "PUT",
    "/api/employees/999",
    Some(json!({ "name": "Nobody" })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  // Delete, then the employee is gone.
  let (status, _, _) =
    send(&app, "DELETE", &format!("/api/employees/{id}"), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  let (status, _, _) =
    send(&app, "GET", &format!("/api/employees/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  let (status, _, _) =
    send(&app, "DELETE", &format!("/api/employees/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  // Two entries now, newest-first: Deleted then Created.
  let (_, log, _) = send(
    &app,
    "GET",
    &format!("/api/loghistory?employeeId={id}"),
    None,
  )
  .await;
  let log = log.as_array().unwrap();
  assert_eq!(log.len(), 2);
  assert_eq!(log[0]["action"], "Deleted");
  assert_eq!(log[1]["action"], "Created");
}

#[tokio::test]
async fn successful_update_returns_new_values() {
  let app = app().await;
  let dept = create_department(&app, "Engineering").await;
  let id = create_employee(&app, "Ada", "ada@x.com", dept).await;

  let (status, body, _) = send(
    &app,
    "PUT",
    &format!("/api/employees/{id}"),
    Some(json!({ "name": "Ada L.", "status": "OnLeave" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["name"], "Ada L.");
  assert_eq!(body["status"], "OnLeave");
  // Untouched fields survive a partial update.
  assert_eq!(body["email"], "ada@x.com");
}

#[tokio::test]
async fn update_email_colliding_with_other_employee_returns_409() {
  let app = app().await;
  let dept = create_department(&app, "Engineering").await;
  create_employee(&app, "Ada", "ada@x.com", dept).await;
  let bob = create_employee(&app, "Bob", "bob@x.com", dept).await;

  let (status, _, _) = send(
    &app,
    "PUT",
    &format!("/api/employees/{bob}"),
    Some(json!({ "email": "ada@x.com" })),
  )
  .await;
  assert_eq!(status, StatusCode::CONFLICT);

  // Re-submitting an employee's own email is not a collision.
  let (status, _, _) = send(
    &app,
    "PUT",
    &format!("/api/employees/{bob}"),
    Some(json!({ "email": "bob@x.com" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn create_employee_in_missing_department_returns_409() {
  let app = app().await;
  let (status, _, _) = send(
    &app,
    "POST",
    "/api/employees",
    Some(json!({
      "name": "Ada",
      "email": "ada@x.com",
      "departmentId": 7,
      "status": "Active",
      "hireDate": "2023-01-01",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn malformed_email_returns_400() {
  let app = app().await;
  let dept = create_department(&app, "Engineering").await;
  let (status, _, _) = send(
    &app,
    "POST",
    "/api/employees",
    Some(json!({
      "name": "Ada",
      "email": "not-an-email",
      "departmentId": dept,
      "status": "Active",
      "hireDate": "2023-01-01",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_pagination_returns_400() {
  let app = app().await;
  let (status, _, _) =
    send(&app, "GET", "/api/employees?pageNumber=0", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, _, _) =
    send(&app, "GET", "/api/employees?pageSize=0", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_employees_applies_query_params() {
  let app = app().await;
  let eng = create_department(&app, "Engineering").await;
  let sales = create_department(&app, "Sales").await;
  create_employee(&app, "Ada Lovelace", "ada@x.com", eng).await;
  create_employee(&app, "Alan Turing", "alan@x.com", eng).await;
  create_employee(&app, "Grace Hopper", "grace@x.com", sales).await;

  let (status, body, _) = send(
    &app,
    "GET",
    &format!("/api/employees?departmentId={eng}&name=ada&sortBy=name&sortOrder=descending"),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["totalCount"], 1);
  assert_eq!(body["items"][0]["name"], "Ada Lovelace");

  let (status, body, _) =
    send(&app, "GET", "/api/employees?pageSize=2&pageNumber=2", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["totalCount"], 3);
  assert_eq!(body["pageNumber"], 2);
  assert_eq!(body["items"].as_array().unwrap().len(), 1);
}

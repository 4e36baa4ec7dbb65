//! JSON REST API for the roster service.
//!
//! Exposes an axum [`Router`] backed by any
//! [`roster_core::store::PersonnelStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", roster_api::api_router(store.clone()))
//! ```

pub mod departments;
pub mod employees;
pub mod error;
pub mod loghistory;

use std::sync::Arc;

use axum::{Router, routing::get};
use roster_core::store::PersonnelStore;

pub use error::ApiError;

/// Upper bound on department and employee name length, enforced at the
/// boundary.
pub(crate) const MAX_NAME_LEN: usize = 100;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: PersonnelStore + 'static,
{
  Router::new()
    // Departments
    .route(
      "/departments",
      get(departments::list::<S>).post(departments::create::<S>),
    )
    .route("/departments/{id}", get(departments::get_one::<S>))
    // Employees
    .route(
      "/employees",
      get(employees::list::<S>).post(employees::create::<S>),
    )
    .route(
      "/employees/{id}",
      get(employees::get_one::<S>)
        .put(employees::update::<S>)
        .delete(employees::remove::<S>),
    )
    // Audit log
    .route("/loghistory", get(loghistory::list::<S>))
    .with_state(store)
}

#[cfg(test)]
mod tests;

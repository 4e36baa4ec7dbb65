//! Core types and trait definitions for the roster employee service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod department;
pub mod dto;
pub mod employee;
pub mod error;
pub mod log;
pub mod query;
pub mod store;

pub use error::{Error, Result};

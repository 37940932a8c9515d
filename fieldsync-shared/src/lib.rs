//! # FieldSync Shared Library
//!
//! This crate contains the types and business logic shared by the FieldSync
//! API server and its tests.
//!
//! ## Module Organization
//!
//! - `models`: Database models (users, form submissions, PDF uploads)
//! - `auth`: Password hashing, token service, auth middleware, role gates
//! - `db`: Connection pool and migration runner
//! - `dashboard`: Aggregate reporting over stored form submissions

pub mod auth;
pub mod dashboard;
pub mod db;
pub mod models;

/// Current version of the FieldSync shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! # FieldSync API Server Library
//!
//! This library provides the core functionality for the FieldSync API
//! server: authentication, batch form sync, PDF uploads, dashboard
//! aggregation, report download, and the chatbot proxy.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers
//! - `services`: Outbound collaborators (AI proxy, PDF extractor)

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;

//! # todoquote API Server Library
//!
//! HTTP layer of the todoquote backend: registration, API-key login and
//! per-user tasks and quotes.
//!
//! ## Modules
//!
//! - `app`: Application state, route table and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `params`: Request field extraction and validation
//! - `response`: Success response encoding
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod params;
pub mod response;
pub mod routes;

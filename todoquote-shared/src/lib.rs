//! # todoquote Shared Library
//!
//! Types, persistence and authentication primitives used by the todoquote
//! API server.
//!
//! ## Module Organization
//!
//! - `auth`: Password hashing, API key generation and identity resolution
//! - `db`: Connection pool and schema bootstrap
//! - `models`: Users, tasks and quotes with their SQL operations
//! - `push`: Push-notification gateway client

pub mod auth;
pub mod db;
pub mod models;
pub mod push;

/// Current version of the todoquote shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

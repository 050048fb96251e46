/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration and login
/// - `tasks`: Per-user task CRUD
/// - `quotes`: Quote CRUD through the user/quote join
/// - `push`: Random quote broadcast

pub mod auth;
pub mod health;
pub mod push;
pub mod quotes;
pub mod tasks;

/// Database models
///
/// Each model owns the SQL for its use cases. Every statement is
/// parameterized, and every read or write of user-owned data filters by the
/// caller's user id, so "absent" and "owned by someone else" are the same
/// result.
///
/// - `user`: Accounts, credentials, API keys and push registrations
/// - `task`: Per-user to-do items
/// - `quote`: Quotes and the user/quote join table

pub mod quote;
pub mod task;
pub mod user;

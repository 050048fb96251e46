/// Request authentication by API key
///
/// Resolves the raw `Authorization` header of a request to the id of the user
/// owning that key. The result is an [`AuthContext`] that the HTTP layer
/// stores in the request's extensions, so every request carries its own
/// identity and nothing is shared between concurrent requests.
///
/// # States
///
/// ```text
/// Unauthenticated ──header absent──────────▶ MissingCredential (rejected)
///                 ──malformed/unknown key──▶ InvalidCredential (rejected)
///                 ──known key──────────────▶ Authenticated(user_id)
/// ```

use sqlx::PgPool;

use super::api_key::validate_api_key_format;
use crate::models::user::User;

/// Identity bound to a single authenticated request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// Id of the user owning the presented API key
    pub user_id: i64,
}

impl AuthContext {
    /// Creates the context for an authenticated user
    pub fn new(user_id: i64) -> Self {
        Self { user_id }
    }
}

/// Reasons a request fails authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No `Authorization` header, or an empty one
    #[error("Api key is missing")]
    MissingCredential,

    /// The key is malformed or belongs to nobody
    #[error("Access denied. Invalid api key")]
    InvalidCredential,

    /// The lookup itself failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Resolves an `Authorization` header value to an [`AuthContext`].
///
/// The header carries the raw key, surrounding whitespace is ignored.
/// Malformed keys are rejected without a database round trip.
///
/// # Errors
///
/// - `MissingCredential` if `header` is `None` or blank
/// - `InvalidCredential` if the key is malformed or unknown
/// - `Database` if the lookup fails
pub async fn authenticate_api_key(
    pool: &PgPool,
    header: Option<&str>,
) -> Result<AuthContext, AuthError> {
    let key = header
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or(AuthError::MissingCredential)?;

    if !validate_api_key_format(key) {
        tracing::debug!("Rejected malformed api key");
        return Err(AuthError::InvalidCredential);
    }

    let user_id = User::find_id_by_api_key(pool, key)
        .await?
        .ok_or(AuthError::InvalidCredential)?;

    Ok(AuthContext::new(user_id))
}

/// Error handling for the API server
///
/// Every handler returns `ApiResult<T>`. Failures become a JSON body of the
/// form `{"error": true, "message": "..."}` with the status code of the
/// variant. Some handled failures (duplicate email, wrong credentials) are
/// deliberately reported with 200 so clients only have to look at `error`.
///
/// # Example
///
/// ```no_run
/// use todoquote_api::error::{ApiError, ApiResult};
///
/// fn lookup(found: bool) -> ApiResult<&'static str> {
///     if !found {
///         return Err(ApiError::not_found());
///     }
///     Ok("found")
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use todoquote_shared::{
    auth::{middleware::AuthError, password::PasswordError},
    push::PushError,
};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Message for anything absent or owned by another user
pub const NOT_FOUND_MESSAGE: &str = "The requested resource doesn't exists";

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Required fields absent or blank (400), names in request order
    MissingFields(Vec<String>),

    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401)
    Unauthorized(String),

    /// Not found (404), also used for resources of other users
    NotFound(String),

    /// Duplicate registration (200)
    Conflict(String),

    /// Handled failure the client can act on (200)
    Rejected(String),

    /// Internal server error (500), the detail is only logged
    InternalError(String),

    /// Database timeout or exhausted pool (503)
    ServiceUnavailable(String),
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always true
    pub error: bool,

    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    /// The shared 404 for absent or foreign resources
    pub fn not_found() -> Self {
        ApiError::NotFound(NOT_FOUND_MESSAGE.to_string())
    }

    /// Status code of this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFields(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) | ApiError::Rejected(_) => StatusCode::OK,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MissingFields(fields) => write!(
                f,
                "Required field(s) {} is missing or empty",
                fields.join(", ")
            ),
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::Rejected(msg) => write!(f, "{}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            ApiError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match self {
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                "Service temporarily unavailable. Please try again".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            error: true,
            message,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => {
                ApiError::ServiceUnavailable("Timed out waiting for a database connection".to_string())
            }
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    if db_err.constraint().is_some_and(|c| c.contains("email")) {
                        return ApiError::Conflict("Sorry, this email already existed".to_string());
                    }
                    return ApiError::InternalError(format!("Constraint violation: {}", db_err));
                }

                // query_canceled, raised when statement_timeout fires
                if db_err.code().as_deref() == Some("57014") {
                    return ApiError::ServiceUnavailable(format!("Statement timed out: {}", db_err));
                }

                ApiError::InternalError(format!("Database error: {}", db_err))
            }
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Convert auth errors to API errors
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredential => {
                ApiError::BadRequest(AuthError::MissingCredential.to_string())
            }
            AuthError::InvalidCredential => {
                ApiError::Unauthorized(AuthError::InvalidCredential.to_string())
            }
            AuthError::Database(db_err) => ApiError::from(db_err),
        }
    }
}

/// Convert password errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

/// Push client construction failures
impl From<PushError> for ApiError {
    fn from(err: PushError) -> Self {
        ApiError::InternalError(format!("Push gateway error: {}", err))
    }
}

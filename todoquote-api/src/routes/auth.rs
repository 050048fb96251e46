/// Authentication endpoints
///
/// - `POST /register` - Create an account, the API key is issued here
/// - `POST /login` - Check credentials and hand back the API key
///
/// Both are public. Duplicate emails and wrong credentials are handled
/// failures: they answer 200 with `"error": true`.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    params::{require_valid_email, RequestParams},
    response::{ApiResponse, MessageBody},
};
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;
use todoquote_shared::{
    auth::{api_key::generate_api_key, password},
    models::user::{CreateUser, User, UserCreation},
};

/// Login response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub name: String,
    pub email: String,
    pub api_key: String,
    pub created_at: DateTime<Utc>,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /register
///
/// name=A&email=a@x.com&password=p
/// ```
///
/// Optional fields: `gcm_registration_id`, `notify_app_status` (default
/// on), `send_email_status` (default off).
///
/// # Response
///
/// - `201` `{"error": false, "message": "You are successfully registered"}`
/// - `200` `{"error": true, "message": "Sorry, this email already existed"}`
/// - `400` missing fields or invalid email
pub async fn register(
    State(state): State<AppState>,
    params: RequestParams,
) -> ApiResult<ApiResponse<MessageBody>> {
    let [name, email, password] = params.require(["name", "email", "password"])?;
    require_valid_email(&email)?;

    let app_notify_status = params.flag("notify_app_status", true)?;
    let send_email_status = params.flag("send_email_status", false)?;
    let gcm_registration_id = params
        .get("gcm_registration_id")
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    let password_hash = password::hash_password(&password)?;

    let creation = User::create(
        &state.db,
        CreateUser {
            name,
            email,
            password_hash,
            api_key: generate_api_key(),
            gcm_registration_id,
            app_notify_status,
            send_email_status,
        },
    )
    .await
    .map_err(|e| match ApiError::from(e) {
        ApiError::InternalError(detail) => {
            tracing::error!("Registration failed: {}", detail);
            ApiError::Rejected("Oops! An error occurred while registering".to_string())
        }
        other => other,
    })?;

    match creation {
        UserCreation::Created(user) => {
            tracing::info!(user_id = user.id, "User registered");
            Ok(ApiResponse::created(MessageBody::new(
                "You are successfully registered",
            )))
        }
        UserCreation::AlreadyExists => {
            tracing::info!("Registration rejected, email already exists");
            Err(ApiError::Conflict(
                "Sorry, this email already existed".to_string(),
            ))
        }
    }
}

/// Login with email and password
///
/// # Endpoint
///
/// ```text
/// POST /login
///
/// email=a@x.com&password=p
/// ```
///
/// # Response
///
/// ```json
/// {
///   "error": false,
///   "name": "A",
///   "email": "a@x.com",
///   "apiKey": "0f1e2d3c4b5a69788796a5b4c3d2e1f0",
///   "createdAt": "2024-03-01T12:00:00Z"
/// }
/// ```
///
/// An unknown or malformed email and a wrong password produce the same
/// `{"error": true, "message": "Login failed. Incorrect credentials"}`.
pub async fn login(
    State(state): State<AppState>,
    params: RequestParams,
) -> ApiResult<ApiResponse<LoginResponse>> {
    let [email, password] = params.require(["email", "password"])?;

    if !User::verify_login(&state.db, &email, &password).await? {
        tracing::info!("Login failed");
        return Err(ApiError::Rejected(
            "Login failed. Incorrect credentials".to_string(),
        ));
    }

    // Deleted between the two reads
    let Some(user) = User::find_by_email(&state.db, &email).await? else {
        return Err(ApiError::Rejected(
            "An error occurred. Please try again".to_string(),
        ));
    };

    tracing::info!(user_id = user.id, "User logged in");

    Ok(ApiResponse::ok(LoginResponse {
        name: user.name,
        email: user.email,
        api_key: user.api_key,
        created_at: user.created_at,
    }))
}

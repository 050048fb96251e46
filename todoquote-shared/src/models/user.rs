/// User model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(250) NOT NULL,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     password_hash TEXT NOT NULL,
///     api_key VARCHAR(64) NOT NULL UNIQUE,
///     gcm_registration_id TEXT,
///     app_notify_status BOOLEAN NOT NULL DEFAULT TRUE,
///     send_email_status BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     edited_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use todoquote_shared::auth::{api_key::generate_api_key, password::hash_password};
/// use todoquote_shared::models::user::{CreateUser, User, UserCreation};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let creation = User::create(&pool, CreateUser {
///     name: "A".to_string(),
///     email: "a@x.com".to_string(),
///     password_hash: hash_password("p")?,
///     api_key: generate_api_key(),
///     gcm_registration_id: None,
///     app_notify_status: true,
///     send_email_status: false,
/// }).await?;
///
/// if let UserCreation::AlreadyExists = creation {
///     println!("email taken");
/// }
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::auth::password;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,

    pub name: String,

    /// Unique across all users
    pub email: String,

    /// Argon2id PHC string, never the plaintext
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Issued once at registration, never rotated
    pub api_key: String,

    /// Push registration id of the user's device, if any
    pub gcm_registration_id: Option<String>,

    /// Whether the user wants push notifications
    pub app_notify_status: bool,

    /// Whether the user wants email notifications
    pub send_email_status: bool,

    pub created_at: DateTime<Utc>,

    pub edited_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    /// Already hashed, see [`password::hash_password`]
    pub password_hash: String,
    pub api_key: String,
    pub gcm_registration_id: Option<String>,
    pub app_notify_status: bool,
    pub send_email_status: bool,
}

/// Outcome of a registration attempt
#[derive(Debug, Clone)]
pub enum UserCreation {
    /// The row was inserted
    Created(User),

    /// A user with this email already exists, nothing was written
    AlreadyExists,
}

const USER_COLUMNS: &str = "id, name, email, password_hash, api_key, gcm_registration_id, \
     app_notify_status, send_email_status, created_at, edited_at";

impl User {
    /// Inserts a new user unless the email is taken.
    ///
    /// The existence check and the insert are one statement
    /// (`ON CONFLICT (email) DO NOTHING`), so two concurrent registrations
    /// for the same email cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database fails, including the (practically
    /// impossible) case of an API key collision.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<UserCreation, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO users (name, email, password_hash, api_key, gcm_registration_id,
                               app_notify_status, send_email_status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (email) DO NOTHING
            RETURNING {USER_COLUMNS}
            "#
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(data.name)
            .bind(data.email)
            .bind(data.password_hash)
            .bind(data.api_key)
            .bind(data.gcm_registration_id)
            .bind(data.app_notify_status)
            .bind(data.send_email_status)
            .fetch_optional(pool)
            .await?;

        Ok(match user {
            Some(user) => UserCreation::Created(user),
            None => UserCreation::AlreadyExists,
        })
    }

    /// Checks an email/password pair.
    ///
    /// Returns `false` for an unknown email, a wrong password and an
    /// unreadable stored hash alike, so callers cannot tell which one it was.
    pub async fn verify_login(
        pool: &PgPool,
        email: &str,
        password: &str,
    ) -> Result<bool, sqlx::Error> {
        let hash: Option<String> =
            sqlx::query_scalar("SELECT password_hash FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(pool)
                .await?;

        let Some(hash) = hash else {
            return Ok(false);
        };

        match password::verify_password(password, &hash) {
            Ok(valid) => Ok(valid),
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash could not be verified");
                Ok(false)
            }
        }
    }

    /// Finds a user by email address
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Resolves an API key to the id of the user owning it
    pub async fn find_id_by_api_key(pool: &PgPool, api_key: &str) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM users WHERE api_key = $1")
            .bind(api_key)
            .fetch_optional(pool)
            .await
    }

    /// Whether any user owns this API key.
    ///
    /// Existence check only. Request authentication uses
    /// [`User::find_id_by_api_key`], which also yields the owner.
    pub async fn is_valid_api_key(pool: &PgPool, api_key: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE api_key = $1)")
            .bind(api_key)
            .fetch_one(pool)
            .await
    }

    /// Push registration ids of every user who opted into notifications
    pub async fn list_push_registration_ids(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT gcm_registration_id
            FROM users
            WHERE app_notify_status
              AND gcm_registration_id IS NOT NULL
              AND gcm_registration_id <> ''
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await
    }
}

/// Quote model and database operations
///
/// Quotes are not owned directly. A user reaches a quote through a row in
/// `user_quotes`, and edits and deletes only go through when that row exists
/// for the caller. The check and the mutation are a single statement.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE quotes (
///     id BIGSERIAL PRIMARY KEY,
///     quote TEXT NOT NULL,
///     quote_type VARCHAR(100) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     edited_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
///
/// CREATE TABLE user_quotes (
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     quote_id BIGINT NOT NULL REFERENCES quotes(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (user_id, quote_id)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// A quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Quote {
    pub id: i64,

    /// Quote text
    pub quote: String,

    /// Category, e.g. "motivation"
    pub quote_type: String,

    pub created_at: DateTime<Utc>,

    pub edited_at: DateTime<Utc>,
}

/// Input for creating or editing a quote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateQuote {
    pub quote: String,
    pub quote_type: String,
}

impl Quote {
    /// Inserts a quote and links it to `user_id`.
    ///
    /// Both inserts share one transaction: if linking fails the quote row is
    /// rolled back instead of being left orphaned.
    pub async fn create(pool: &PgPool, user_id: i64, data: CreateQuote) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let quote = sqlx::query_as::<_, Quote>(
            r#"
            INSERT INTO quotes (quote, quote_type)
            VALUES ($1, $2)
            RETURNING id, quote, quote_type, created_at, edited_at
            "#,
        )
        .bind(data.quote)
        .bind(data.quote_type)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO user_quotes (user_id, quote_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(quote.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(quote)
    }

    /// Lists the quotes linked to a user, newest first
    pub async fn list_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Quote>(
            r#"
            SELECT q.id, q.quote, q.quote_type, q.created_at, q.edited_at
            FROM quotes q
            JOIN user_quotes uq ON uq.quote_id = q.id
            WHERE uq.user_id = $1
            ORDER BY q.created_at DESC, q.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Edits a quote linked to `user_id`
    ///
    /// True iff the quote exists and is linked to the caller.
    pub async fn update(
        pool: &PgPool,
        user_id: i64,
        id: i64,
        data: CreateQuote,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE quotes q
            SET quote = $1, quote_type = $2, edited_at = NOW()
            FROM user_quotes uq
            WHERE q.id = $3 AND uq.quote_id = q.id AND uq.user_id = $4
            "#,
        )
        .bind(data.quote)
        .bind(data.quote_type)
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a quote linked to `user_id`
    ///
    /// Join rows go with it through `ON DELETE CASCADE`.
    pub async fn delete(pool: &PgPool, user_id: i64, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM quotes q
            USING user_quotes uq
            WHERE q.id = $1 AND uq.quote_id = q.id AND uq.user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Picks a random quote to broadcast
    pub async fn random(pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Quote>(
            r#"
            SELECT id, quote, quote_type, created_at, edited_at
            FROM quotes
            ORDER BY random()
            LIMIT 1
            "#,
        )
        .fetch_optional(pool)
        .await
    }
}

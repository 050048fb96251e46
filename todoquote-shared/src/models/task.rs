/// Task model and database operations
///
/// Tasks are owned by exactly one user. Every query filters by both the
/// task id and the owner id, so a task belonging to someone else behaves
/// exactly like a task that does not exist.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     task TEXT NOT NULL,
///     status INTEGER NOT NULL DEFAULT 0,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use todoquote_shared::models::task::Task;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, user_id: i64) -> Result<(), sqlx::Error> {
/// let task = Task::create(&pool, user_id, "Buy milk").await?;
/// assert!(Task::update(&pool, user_id, task.id, "Buy oat milk", 1).await?);
/// assert!(Task::delete(&pool, user_id, task.id).await?);
/// assert!(!Task::delete(&pool, user_id, task.id).await?);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Status of a freshly created task
pub const DEFAULT_STATUS: i32 = 0;

/// A user's to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: i64,

    /// Owner
    pub user_id: i64,

    /// Free text of the task
    pub task: String,

    /// Client-defined status code, 0 when created
    pub status: i32,

    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task for `user_id` with the default status
    pub async fn create(pool: &PgPool, user_id: i64, task: &str) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, task, status)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, task, status, created_at
            "#,
        )
        .bind(user_id)
        .bind(task)
        .bind(DEFAULT_STATUS)
        .fetch_one(pool)
        .await
    }

    /// Lists all tasks of a user, newest first
    pub async fn list_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, task, status, created_at
            FROM tasks
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Finds a task by id with ownership check
    ///
    /// Returns None when the task is absent or owned by another user.
    pub async fn find_by_id_and_user(
        pool: &PgPool,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, task, status, created_at
            FROM tasks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Replaces text and status of a task owned by `user_id`
    ///
    /// True iff a row matching both id and owner was updated.
    pub async fn update(
        pool: &PgPool,
        user_id: i64,
        id: i64,
        task: &str,
        status: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET task = $1, status = $2
            WHERE id = $3 AND user_id = $4
            "#,
        )
        .bind(task)
        .bind(status)
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a task owned by `user_id`
    ///
    /// True iff a row matching both id and owner was deleted.
    pub async fn delete(pool: &PgPool, user_id: i64, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

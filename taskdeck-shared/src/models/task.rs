/// Task model and database operations
///
/// Tasks are the core entity of Taskdeck: a title, an optional description,
/// and an importance rank from 1 (default) to 4. Every task is owned by
/// exactly one user; ownership is set at creation and never changes.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title VARCHAR(100) NOT NULL,
///     description VARCHAR(500),
///     importance INTEGER NOT NULL DEFAULT 1 CHECK (importance BETWEEN 1 AND 4),
///     date_created TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Importance domain
///
/// Raw form input is normalized through [`parse_importance`]: anything that
/// is not an integer in `[1, 4]` yields `None`. On create the caller
/// substitutes [`IMPORTANCE_DEFAULT`]; on update a `None` means "keep the
/// stored value" (the update fails open rather than rejecting the request).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::StoreError;

/// Importance assigned when the supplied value is missing or invalid
pub const IMPORTANCE_DEFAULT: i32 = 1;

/// Lowest and highest allowed importance ranks
pub const IMPORTANCE_RANGE: std::ops::RangeInclusive<i32> = 1..=4;

/// Parses raw importance input into the 1..=4 domain
///
/// Returns `None` if the input is not an integer or falls outside the
/// range. Callers decide what `None` means: the default on create, "no
/// change" on update.
pub fn parse_importance(raw: &str) -> Option<i32> {
    let value: i32 = raw.trim().parse().ok()?;
    IMPORTANCE_RANGE.contains(&value).then_some(value)
}

/// Task model representing one tracked item
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID (UUID v4)
    pub id: Uuid,

    /// Owning user. Immutable after creation.
    pub user_id: Uuid,

    /// Task title (non-empty, at most 100 characters)
    pub title: String,

    /// Optional free-form description (at most 500 characters)
    pub description: Option<String>,

    /// Importance rank, always within 1..=4
    pub importance: i32,

    /// When the task was created (UTC, set once)
    pub date_created: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Owning user
    pub user_id: Uuid,

    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Importance, already normalized into 1..=4 by the caller
    pub importance: i32,
}

/// Input for updating an existing task
///
/// Title and description are applied unconditionally; importance is applied
/// only when present, otherwise the stored value is retained.
#[derive(Debug, Clone)]
pub struct UpdateTask {
    /// New title
    pub title: String,

    /// New description
    pub description: Option<String>,

    /// New importance, or `None` to keep the current value
    pub importance: Option<i32>,
}

impl Task {
    /// Creates a new task
    ///
    /// The insert is a single statement, so a rejected write leaves no
    /// partial row behind.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, title, description, importance)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, title, description, importance, date_created
            "#,
        )
        .bind(data.user_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.importance)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, importance, date_created
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks owned by a user, oldest first
    pub async fn list_by_owner(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, StoreError> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, importance, date_created
            FROM tasks
            WHERE user_id = $1
            ORDER BY date_created ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Updates a task's title, description, and (optionally) importance
    ///
    /// One atomic UPDATE: either all supplied fields are applied or none
    /// are. `COALESCE` keeps the stored importance when the caller passes
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no task with this ID exists.
    pub async fn update(pool: &PgPool, id: Uuid, data: UpdateTask) -> Result<Self, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $2,
                description = $3,
                importance = COALESCE($4, importance)
            WHERE id = $1
            RETURNING id, user_id, title, description, importance, date_created
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.importance)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(task)
    }

    /// Deletes a task
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no task with this ID exists.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

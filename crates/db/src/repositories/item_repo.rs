//! Repository for the content item tables (`texts`, `videos`, `images`, `files`).
//!
//! The table and body column are chosen from [`ContentKind`]; both come from
//! a closed set of identifiers and are never taken from user input.

use educa_core::content::ContentKind;
use educa_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::item::{Item, ItemInput};

/// Column list for a kind, with the body column aliased to `body`.
fn columns(kind: ContentKind) -> String {
    format!(
        "id, owner_id, title, {} AS body, created_at, updated_at",
        kind.body_column()
    )
}

/// Provides CRUD operations for content items of every kind.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item owned by `owner_id` on an open connection.
    pub async fn create_in(
        conn: &mut PgConnection,
        kind: ContentKind,
        owner_id: DbId,
        input: &ItemInput,
    ) -> Result<Item, sqlx::Error> {
        let query = format!(
            "INSERT INTO {table} (owner_id, title, {body}) VALUES ($1, $2, $3) RETURNING {cols}",
            table = kind.table(),
            body = kind.body_column(),
            cols = columns(kind),
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(owner_id)
            .bind(&input.title)
            .bind(&input.body)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find an item by kind and ID.
    pub async fn find_by_id(
        pool: &PgPool,
        kind: ContentKind,
        id: DbId,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} WHERE id = $1",
            columns(kind),
            kind.table()
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an item by kind and ID, only if owned by `owner_id`.
    pub async fn find_owned(
        pool: &PgPool,
        kind: ContentKind,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} WHERE id = $1 AND owner_id = $2",
            columns(kind),
            kind.table()
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace title and body of an item owned by `owner_id`.
    ///
    /// Returns `None` if no such item exists for that owner.
    pub async fn update_owned(
        pool: &PgPool,
        kind: ContentKind,
        id: DbId,
        owner_id: DbId,
        input: &ItemInput,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!(
            "UPDATE {table} SET title = $3, {body} = $4
             WHERE id = $1 AND owner_id = $2
             RETURNING {cols}",
            table = kind.table(),
            body = kind.body_column(),
            cols = columns(kind),
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.title)
            .bind(&input.body)
            .fetch_optional(pool)
            .await
    }

    /// Delete an item on an open connection. Returns `true` if a row was removed.
    pub async fn delete_in(
        conn: &mut PgConnection,
        kind: ContentKind,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE id = $1", kind.table());
        let result = sqlx::query(&query).bind(id).execute(&mut *conn).await?;
        Ok(result.rows_affected() > 0)
    }
}

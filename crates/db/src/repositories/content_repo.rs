//! Repository for the `contents` table.
//!
//! A content row places one item in a module. Items are created and removed
//! together with their content row, inside one transaction.

use educa_core::content::{ContentKind, ALL_KINDS};
use educa_core::ordering::{assign_order, OrderError, OrderScope};
use educa_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::content::{Content, ContentWithItem, CreateContent};
use crate::models::item::ItemInput;
use crate::ordering::{lock_parent, PgOrderLookup};
use crate::repositories::ItemRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, module_id, kind, object_id, sort_order, created_at, updated_at";

/// Provides CRUD operations for module contents.
pub struct ContentRepo;

impl ContentRepo {
    /// Insert a content row on an open transaction, appending it to its
    /// module unless `order` is set.
    pub async fn create_in(
        conn: &mut PgConnection,
        mut input: CreateContent,
    ) -> Result<Content, OrderError<sqlx::Error>> {
        lock_parent(conn, "modules", input.module_id).await?;

        let scope = OrderScope::unscoped().with("module_id", input.module_id);
        let order = {
            let mut lookup = PgOrderLookup::new(&mut *conn);
            assign_order(&mut input, &scope, &mut lookup).await?
        };

        let query = format!(
            "INSERT INTO contents (module_id, kind, object_id, sort_order)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let content = sqlx::query_as::<_, Content>(&query)
            .bind(input.module_id)
            .bind(input.kind.as_str())
            .bind(input.object_id)
            .bind(order)
            .fetch_one(&mut *conn)
            .await?;
        Ok(content)
    }

    /// Create an item of `kind` and place it at the end of a module.
    pub async fn create_with_item(
        pool: &PgPool,
        module_id: DbId,
        kind: ContentKind,
        owner_id: DbId,
        input: &ItemInput,
    ) -> Result<ContentWithItem, OrderError<sqlx::Error>> {
        let mut tx = pool.begin().await?;

        let item = ItemRepo::create_in(&mut tx, kind, owner_id, input).await?;
        let content = Self::create_in(
            &mut tx,
            CreateContent {
                module_id,
                kind,
                object_id: item.id,
                order: None,
            },
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            content_id = content.id,
            module_id,
            %kind,
            order = content.order,
            "Content created"
        );
        Ok(ContentWithItem {
            content,
            item: Some(item),
        })
    }

    /// Find a content row by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Content>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contents WHERE id = $1");
        sqlx::query_as::<_, Content>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a content row whose course is owned by `owner_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Content>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contents
             WHERE id = $1
               AND module_id IN (
                   SELECT m.id FROM modules m
                   JOIN courses c ON c.id = m.course_id
                   WHERE c.owner_id = $2
               )"
        );
        sqlx::query_as::<_, Content>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List a module's contents by position.
    pub async fn list_by_module(
        pool: &PgPool,
        module_id: DbId,
    ) -> Result<Vec<Content>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contents WHERE module_id = $1 ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Content>(&query)
            .bind(module_id)
            .fetch_all(pool)
            .await
    }

    /// List a module's contents by position, each with its item.
    pub async fn list_with_items(
        pool: &PgPool,
        module_id: DbId,
    ) -> Result<Vec<ContentWithItem>, sqlx::Error> {
        let contents = Self::list_by_module(pool, module_id).await?;
        let mut out = Vec::with_capacity(contents.len());
        for content in contents {
            let item = ItemRepo::find_by_id(pool, content.kind, content.object_id).await?;
            if item.is_none() {
                tracing::warn!(
                    content_id = content.id,
                    kind = %content.kind,
                    object_id = content.object_id,
                    "Content points at a missing item"
                );
            }
            out.push(ContentWithItem { content, item });
        }
        Ok(out)
    }

    /// Delete a content row and the item it points at.
    ///
    /// Returns `true` if the content row was removed.
    pub async fn delete_with_item(pool: &PgPool, content: &Content) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        ItemRepo::delete_in(&mut tx, content.kind, content.object_id).await?;
        let result = sqlx::query("DELETE FROM contents WHERE id = $1")
            .bind(content.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete the items behind every content row of the given modules.
    ///
    /// The content rows themselves go with their modules via `ON DELETE CASCADE`.
    pub async fn delete_items_for_modules(
        conn: &mut PgConnection,
        module_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        let mut removed = 0;
        for kind in ALL_KINDS {
            let query = format!(
                "DELETE FROM {} WHERE id IN (
                     SELECT object_id FROM contents
                     WHERE kind = $1 AND module_id = ANY($2)
                 )",
                kind.table()
            );
            let result = sqlx::query(&query)
                .bind(kind.as_str())
                .bind(module_ids)
                .execute(&mut *conn)
                .await?;
            removed += result.rows_affected();
        }
        Ok(removed)
    }
}

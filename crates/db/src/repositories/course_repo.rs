//! Repository for the `courses` table.

use educa_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::{Course, CreateCourse, UpdateCourse};
use crate::repositories::ContentRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, subject_id, title, slug, overview, created_at, updated_at";

/// Provides CRUD operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new course owned by `owner_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateCourse,
    ) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses (owner_id, subject_id, title, slug, overview)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(owner_id)
            .bind(input.subject_id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.overview)
            .fetch_one(pool)
            .await
    }

    /// Find a course by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a course by ID, only if owned by `owner_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List courses owned by `owner_id`, newest first.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses WHERE owner_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Update a course owned by `owner_id`. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no such course exists for that owner.
    pub async fn update_owned(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        input: &UpdateCourse,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET
                subject_id = COALESCE($3, subject_id),
                title = COALESCE($4, title),
                slug = COALESCE($5, slug),
                overview = COALESCE($6, overview)
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(input.subject_id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.overview)
            .fetch_optional(pool)
            .await
    }

    /// Delete a course owned by `owner_id` together with its content items.
    ///
    /// Modules and content rows cascade. Returns `true` if the course was removed.
    pub async fn delete_owned(pool: &PgPool, id: DbId, owner_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let module_ids: Vec<DbId> = sqlx::query_scalar(
            "SELECT m.id FROM modules m
             JOIN courses c ON c.id = m.course_id
             WHERE c.id = $1 AND c.owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_all(&mut *tx)
        .await?;

        if !module_ids.is_empty() {
            ContentRepo::delete_items_for_modules(&mut tx, &module_ids).await?;
        }

        let result = sqlx::query("DELETE FROM courses WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Repository for the `modules` table.
//!
//! New modules are appended to their course: [`ModuleRepo::create`] locks the
//! course row, asks the order assigner for the next position and inserts in
//! the same transaction.

use educa_core::formset::ModulePlan;
use educa_core::ordering::{assign_order, OrderError, OrderScope};
use educa_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::module::{CreateModule, Module};
use crate::ordering::{lock_parent, PgOrderLookup};
use crate::repositories::ContentRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, course_id, title, description, sort_order, created_at, updated_at";

/// Provides CRUD operations for course modules.
pub struct ModuleRepo;

impl ModuleRepo {
    /// Insert a new module, appending it to its course unless `order` is set.
    pub async fn create(
        pool: &PgPool,
        input: &CreateModule,
    ) -> Result<Module, OrderError<sqlx::Error>> {
        let mut tx = pool.begin().await?;
        let module = Self::create_in(&mut tx, input.clone()).await?;
        tx.commit().await?;
        Ok(module)
    }

    /// Insert a module on an open transaction.
    ///
    /// Takes a row lock on the parent course; callers should not hold other
    /// locks that a concurrent append could be waiting on.
    pub async fn create_in(
        conn: &mut PgConnection,
        mut input: CreateModule,
    ) -> Result<Module, OrderError<sqlx::Error>> {
        lock_parent(conn, "courses", input.course_id).await?;

        let scope = OrderScope::unscoped().with("course_id", input.course_id);
        let order = {
            let mut lookup = PgOrderLookup::new(&mut *conn);
            assign_order(&mut input, &scope, &mut lookup).await?
        };

        let query = format!(
            "INSERT INTO modules (course_id, title, description, sort_order)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let module = sqlx::query_as::<_, Module>(&query)
            .bind(input.course_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(order)
            .fetch_one(&mut *conn)
            .await?;

        tracing::debug!(
            module_id = module.id,
            course_id = module.course_id,
            order,
            "Module created"
        );
        Ok(module)
    }

    /// Find a module by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Module>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM modules WHERE id = $1");
        sqlx::query_as::<_, Module>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a module whose course is owned by `owner_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Module>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM modules
             WHERE id = $1
               AND course_id IN (SELECT id FROM courses WHERE owner_id = $2)"
        );
        sqlx::query_as::<_, Module>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List a course's modules by position.
    pub async fn list_by_course(pool: &PgPool, course_id: DbId) -> Result<Vec<Module>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM modules WHERE course_id = $1 ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Module>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// IDs of a course's modules.
    pub async fn list_ids(pool: &PgPool, course_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM modules WHERE course_id = $1")
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a module editor plan to a course in one transaction and return the
    /// course's modules afterwards.
    ///
    /// Deleted modules take their content items with them. Created modules
    /// are appended after the surviving ones in plan order.
    ///
    /// The course row is locked for the whole transaction. If a module the
    /// plan deletes or updates is no longer in the course, nothing is applied
    /// and [`sqlx::Error::RowNotFound`] is returned.
    pub async fn apply_plan(
        pool: &PgPool,
        course_id: DbId,
        plan: &ModulePlan,
    ) -> Result<Vec<Module>, OrderError<sqlx::Error>> {
        let mut tx = pool.begin().await?;
        lock_parent(&mut tx, "courses", course_id).await?;

        if !plan.deletes.is_empty() {
            ContentRepo::delete_items_for_modules(&mut tx, &plan.deletes).await?;
            let deleted = sqlx::query("DELETE FROM modules WHERE course_id = $1 AND id = ANY($2)")
                .bind(course_id)
                .bind(&plan.deletes)
                .execute(&mut *tx)
                .await?
                .rows_affected();
            if deleted != plan.deletes.len() as u64 {
                tracing::warn!(course_id, "Module plan references a removed module");
                return Err(sqlx::Error::RowNotFound.into());
            }
        }

        for (id, fields) in &plan.updates {
            let updated = sqlx::query(
                "UPDATE modules SET title = $3, description = $4 WHERE id = $1 AND course_id = $2",
            )
            .bind(id)
            .bind(course_id)
            .bind(&fields.title)
            .bind(&fields.description)
            .execute(&mut *tx)
            .await?
            .rows_affected();
            if updated == 0 {
                tracing::warn!(course_id, module_id = id, "Module plan references a removed module");
                return Err(sqlx::Error::RowNotFound.into());
            }
        }

        for fields in &plan.creates {
            let input = CreateModule {
                course_id,
                title: fields.title.clone(),
                description: fields.description.clone(),
                order: None,
            };
            Self::create_in(&mut tx, input).await?;
        }

        tx.commit().await?;

        tracing::info!(
            course_id,
            deleted = plan.deletes.len(),
            updated = plan.updates.len(),
            created = plan.creates.len(),
            "Module plan applied"
        );

        Ok(Self::list_by_course(pool, course_id).await?)
    }
}

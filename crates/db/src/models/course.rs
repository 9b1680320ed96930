//! Course entity model and DTOs.

use educa_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A course row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub owner_id: DbId,
    pub subject_id: DbId,
    pub title: String,
    pub slug: String,
    pub overview: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new course. The owner comes from the authenticated user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourse {
    pub subject_id: DbId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub overview: String,
}

/// DTO for updating an existing course. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCourse {
    pub subject_id: Option<DbId>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub overview: Option<String>,
}

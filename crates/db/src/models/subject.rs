//! Subject entity model and DTOs.

use educa_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A subject row from the `subjects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subject {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new subject.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubject {
    pub title: String,
    pub slug: String,
}

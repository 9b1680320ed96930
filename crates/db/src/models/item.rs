//! Content item model and DTOs.
//!
//! Texts, videos, images and files share one row shape. The kind-specific
//! column (`content`, `url` or `file`) is selected as `body`.

use educa_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An item row from one of the `texts`, `videos`, `images` or `files` tables.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing an item.
///
/// The body may be sent under the kind's own field name.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemInput {
    pub title: String,
    #[serde(alias = "content", alias = "url", alias = "file")]
    pub body: String,
}

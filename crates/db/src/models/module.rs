//! Module entity model and DTOs.

use educa_core::ordering::{Order, Orderable};
use educa_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A module row from the `modules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Module {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub description: String,
    /// Position within the course, assigned on insert when not supplied.
    #[sqlx(rename = "sort_order")]
    pub order: Order,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Module {
    /// Display label, e.g. `"0. Introduction"`.
    pub fn label(&self) -> String {
        format!("{}. {}", self.order, self.title)
    }
}

/// DTO for creating a new module.
///
/// `course_id` is overwritten from the URL path by the handler.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateModule {
    #[serde(default)]
    pub course_id: DbId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Explicit position. Left `None`, the next free position is used.
    pub order: Option<Order>,
}

impl Orderable for CreateModule {
    const RECORD_TYPE: &'static str = "modules";

    fn order(&self) -> Option<Order> {
        self.order
    }

    fn set_order(&mut self, order: Order) {
        self.order = Some(order);
    }
}

//! Module content model and DTOs.

use educa_core::content::ContentKind;
use educa_core::ordering::{Order, Orderable};
use educa_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::item::Item;

/// A content row from the `contents` table: one item placed in a module.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Content {
    pub id: DbId,
    pub module_id: DbId,
    #[sqlx(try_from = "String")]
    pub kind: ContentKind,
    pub object_id: DbId,
    /// Position within the module, assigned on insert when not supplied.
    #[sqlx(rename = "sort_order")]
    pub order: Order,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A content entry together with the item it points at.
///
/// `item` is `None` when the item row has gone missing.
#[derive(Debug, Clone, Serialize)]
pub struct ContentWithItem {
    #[serde(flatten)]
    pub content: Content,
    pub item: Option<Item>,
}

/// DTO for placing an item in a module.
#[derive(Debug, Clone)]
pub struct CreateContent {
    pub module_id: DbId,
    pub kind: ContentKind,
    pub object_id: DbId,
    pub order: Option<Order>,
}

impl Orderable for CreateContent {
    const RECORD_TYPE: &'static str = "contents";

    fn order(&self) -> Option<Order> {
        self.order
    }

    fn set_order(&mut self, order: Order) {
        self.order = Some(order);
    }
}

//! Handlers for module contents and the items behind them.
//!
//! `{kind}` path segments name the item type (`text`, `video`, `image`,
//! `file`); anything else is rejected with 400 before touching the database.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use educa_core::content::{prepare_item, ContentKind};
use educa_core::error::CoreError;
use educa_core::types::DbId;
use educa_db::models::content::ContentWithItem;
use educa_db::models::item::{Item, ItemInput};
use educa_db::repositories::{ContentRepo, ItemRepo};

use super::module::find_owned as find_owned_module;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireContentEdit;
use crate::state::AppState;

fn item_not_found(kind: ContentKind, id: DbId) -> AppError {
    let entity = match kind {
        ContentKind::Text => "Text",
        ContentKind::Video => "Video",
        ContentKind::Image => "Image",
        ContentKind::File => "File",
    };
    AppError::Core(CoreError::NotFound { entity, id })
}

/// Validate the submitted item and normalize its body for storage.
fn clean_input(kind: ContentKind, input: ItemInput) -> Result<ItemInput, CoreError> {
    let body = prepare_item(kind, &input.title, &input.body)?;
    Ok(ItemInput {
        title: input.title.trim().to_string(),
        body,
    })
}

/// POST /api/v1/modules/{module_id}/content/{kind}
///
/// Creates the item and appends it to the module.
pub async fn create(
    RequireContentEdit(user): RequireContentEdit,
    State(state): State<AppState>,
    Path((module_id, kind)): Path<(DbId, String)>,
    Json(input): Json<ItemInput>,
) -> AppResult<(StatusCode, Json<ContentWithItem>)> {
    let kind = ContentKind::parse(&kind)?;
    let module = find_owned_module(&state, module_id, user.user_id).await?;
    let input = clean_input(kind, input)?;

    let created =
        ContentRepo::create_with_item(&state.pool, module.id, kind, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/modules/{module_id}/content/{kind}/{id}
pub async fn get_item(
    RequireContentEdit(user): RequireContentEdit,
    State(state): State<AppState>,
    Path((module_id, kind, id)): Path<(DbId, String, DbId)>,
) -> AppResult<Json<Item>> {
    let kind = ContentKind::parse(&kind)?;
    find_owned_module(&state, module_id, user.user_id).await?;

    let item = ItemRepo::find_owned(&state.pool, kind, id, user.user_id)
        .await?
        .ok_or_else(|| item_not_found(kind, id))?;
    Ok(Json(item))
}

/// PUT /api/v1/modules/{module_id}/content/{kind}/{id}
///
/// Replaces the item's title and body. Its position is unchanged.
pub async fn update_item(
    RequireContentEdit(user): RequireContentEdit,
    State(state): State<AppState>,
    Path((module_id, kind, id)): Path<(DbId, String, DbId)>,
    Json(input): Json<ItemInput>,
) -> AppResult<Json<Item>> {
    let kind = ContentKind::parse(&kind)?;
    find_owned_module(&state, module_id, user.user_id).await?;
    let input = clean_input(kind, input)?;

    let item = ItemRepo::update_owned(&state.pool, kind, id, user.user_id, &input)
        .await?
        .ok_or_else(|| item_not_found(kind, id))?;
    Ok(Json(item))
}

/// DELETE /api/v1/contents/{id}
///
/// Removes the content entry and its item. Positions of the remaining
/// contents are left as they are.
pub async fn delete(
    RequireContentEdit(user): RequireContentEdit,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let content = ContentRepo::find_owned(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Content",
            id,
        }))?;

    ContentRepo::delete_with_item(&state.pool, &content).await?;
    tracing::info!(
        content_id = id,
        module_id = content.module_id,
        kind = %content.kind,
        "Content deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}

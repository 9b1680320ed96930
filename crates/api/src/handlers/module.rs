//! Handlers for course modules.
//!
//! Modules are listed, appended and bulk-edited under `/courses/{id}/modules`;
//! a single module with its contents is read from `/modules/{module_id}`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use educa_core::error::CoreError;
use educa_core::formset::{plan_modules, ModuleForm};
use educa_core::types::DbId;
use educa_core::validation::{validate_order, validate_title, MAX_TITLE_LEN};
use educa_db::models::content::ContentWithItem;
use educa_db::models::module::{CreateModule, Module};
use educa_db::repositories::{ContentRepo, ModuleRepo};
use serde::Serialize;

use super::course::find_owned as find_owned_course;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireChange, RequireView};
use crate::response::DataResponse;
use crate::state::AppState;

/// A module with its contents in display order.
#[derive(Debug, Serialize)]
pub struct ModuleDetail {
    #[serde(flatten)]
    pub module: Module,
    /// Display label, e.g. `"0. Introduction"`.
    pub label: String,
    pub contents: Vec<ContentWithItem>,
}

/// Load a module whose course is owned by `owner_id`, or 404.
pub(crate) async fn find_owned(state: &AppState, id: DbId, owner_id: DbId) -> AppResult<Module> {
    ModuleRepo::find_owned(&state.pool, id, owner_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Module",
            id,
        }))
}

/// GET /api/v1/courses/{id}/modules
pub async fn list_by_course(
    RequireView(user): RequireView,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Module>>>> {
    find_owned_course(&state, course_id, user.user_id).await?;
    let modules = ModuleRepo::list_by_course(&state.pool, course_id).await?;
    Ok(Json(DataResponse { data: modules }))
}

/// POST /api/v1/courses/{id}/modules
///
/// Appends the module unless the body carries an explicit `order`.
pub async fn create(
    RequireChange(user): RequireChange,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Json(mut input): Json<CreateModule>,
) -> AppResult<(StatusCode, Json<Module>)> {
    find_owned_course(&state, course_id, user.user_id).await?;
    validate_title("title", &input.title, MAX_TITLE_LEN)?;
    if let Some(order) = input.order {
        validate_order(order)?;
    }

    input.title = input.title.trim().to_string();
    input.course_id = course_id;
    let module = ModuleRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(module)))
}

/// PUT /api/v1/courses/{id}/modules
///
/// Applies a module editor submission: rows with an `id` are updated (or
/// deleted when `delete` is set), rows without one are appended. Returns the
/// course's modules afterwards.
pub async fn update_all(
    RequireChange(user): RequireChange,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Json(rows): Json<Vec<ModuleForm>>,
) -> AppResult<Json<DataResponse<Vec<Module>>>> {
    find_owned_course(&state, course_id, user.user_id).await?;

    let existing = ModuleRepo::list_ids(&state.pool, course_id).await?;
    let plan = plan_modules(&existing, rows)?;
    if plan.is_empty() {
        let modules = ModuleRepo::list_by_course(&state.pool, course_id).await?;
        return Ok(Json(DataResponse { data: modules }));
    }

    let modules = ModuleRepo::apply_plan(&state.pool, course_id, &plan).await?;
    Ok(Json(DataResponse { data: modules }))
}

/// GET /api/v1/modules/{module_id}
pub async fn get_detail(
    user: AuthUser,
    State(state): State<AppState>,
    Path(module_id): Path<DbId>,
) -> AppResult<Json<ModuleDetail>> {
    let module = find_owned(&state, module_id, user.user_id).await?;
    let contents = ContentRepo::list_with_items(&state.pool, module.id).await?;
    Ok(Json(ModuleDetail {
        label: module.label(),
        module,
        contents,
    }))
}

//! Handlers for the `/courses` resource.
//!
//! Courses are only visible to their owner; another user's course answers 404.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use educa_core::error::CoreError;
use educa_core::types::DbId;
use educa_core::validation::{validate_slug, validate_title, MAX_TITLE_LEN};
use educa_db::models::course::{Course, CreateCourse, UpdateCourse};
use educa_db::repositories::CourseRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdd, RequireChange, RequireDelete, RequireView};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Course",
        id,
    })
}

/// Load a course owned by `owner_id`, or 404.
pub(crate) async fn find_owned(state: &AppState, id: DbId, owner_id: DbId) -> AppResult<Course> {
    CourseRepo::find_owned(&state.pool, id, owner_id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// GET /api/v1/courses/mine
pub async fn list_mine(
    RequireView(user): RequireView,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Course>>>> {
    let courses = CourseRepo::list_by_owner(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: courses }))
}

/// POST /api/v1/courses
pub async fn create(
    RequireAdd(user): RequireAdd,
    State(state): State<AppState>,
    Json(input): Json<CreateCourse>,
) -> AppResult<(StatusCode, Json<Course>)> {
    validate_title("title", &input.title, MAX_TITLE_LEN)?;
    validate_slug(&input.slug)?;

    let course = CourseRepo::create(&state.pool, user.user_id, &input).await?;
    tracing::info!(course_id = course.id, owner_id = user.user_id, "Course created");
    Ok((StatusCode::CREATED, Json(course)))
}

/// GET /api/v1/courses/{id}
pub async fn get_by_id(
    RequireView(user): RequireView,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Course>> {
    let course = find_owned(&state, id, user.user_id).await?;
    Ok(Json(course))
}

/// PUT /api/v1/courses/{id}
pub async fn update(
    RequireChange(user): RequireChange,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCourse>,
) -> AppResult<Json<Course>> {
    if let Some(title) = &input.title {
        validate_title("title", title, MAX_TITLE_LEN)?;
    }
    if let Some(slug) = &input.slug {
        validate_slug(slug)?;
    }

    let course = CourseRepo::update_owned(&state.pool, id, user.user_id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(course))
}

/// DELETE /api/v1/courses/{id}
pub async fn delete(
    RequireDelete(user): RequireDelete,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CourseRepo::delete_owned(&state.pool, id, user.user_id).await? {
        tracing::info!(course_id = id, owner_id = user.user_id, "Course deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

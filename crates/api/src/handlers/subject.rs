//! Handlers for the `/subjects` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use educa_core::validation::{validate_slug, validate_title, MAX_TITLE_LEN};
use educa_db::models::subject::{CreateSubject, Subject};
use educa_db::repositories::SubjectRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/subjects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Subject>>>> {
    let subjects = SubjectRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: subjects }))
}

/// POST /api/v1/subjects
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateSubject>,
) -> AppResult<(StatusCode, Json<Subject>)> {
    validate_title("title", &input.title, MAX_TITLE_LEN)?;
    validate_slug(&input.slug)?;

    let subject = SubjectRepo::create(&state.pool, &input).await?;
    tracing::info!(subject_id = subject.id, created_by = admin.user_id, "Subject created");
    Ok((StatusCode::CREATED, Json(subject)))
}

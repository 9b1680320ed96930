//! Role and permission extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects with 403 when the user's role
//! lacks what the route needs. A missing or invalid token is still a 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use educa_core::error::CoreError;
use educa_core::permissions::{
    self, ADD_COURSE, CHANGE_COURSE, CONTENT_EDIT, DELETE_COURSE, VIEW_COURSE,
};
use educa_core::roles::ROLE_ADMIN;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Authenticate, then check that the role holds every permission in `required`.
async fn authorize(
    parts: &mut Parts,
    state: &AppState,
    required: &[&str],
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if !permissions::has_all(&user.role, required) {
        tracing::debug!(user_id = user.user_id, role = %user.role, ?required, "Permission denied");
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Missing permission: {}",
            required.join(", ")
        ))));
    }
    Ok(user)
}

/// Requires `courses.view_course`.
pub struct RequireView(pub AuthUser);

impl FromRequestParts<AppState> for RequireView {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, &[VIEW_COURSE]).await.map(RequireView)
    }
}

/// Requires `courses.add_course`.
pub struct RequireAdd(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdd {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, &[ADD_COURSE]).await.map(RequireAdd)
    }
}

/// Requires `courses.change_course`.
pub struct RequireChange(pub AuthUser);

impl FromRequestParts<AppState> for RequireChange {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, &[CHANGE_COURSE]).await.map(RequireChange)
    }
}

/// Requires `courses.delete_course`.
pub struct RequireDelete(pub AuthUser);

impl FromRequestParts<AppState> for RequireDelete {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, &[DELETE_COURSE]).await.map(RequireDelete)
    }
}

/// Requires add, change and delete course permissions together.
pub struct RequireContentEdit(pub AuthUser);

impl FromRequestParts<AppState> for RequireContentEdit {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, CONTENT_EDIT)
            .await
            .map(RequireContentEdit)
    }
}

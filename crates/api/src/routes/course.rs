//! Route definitions for the `/courses` resource, including the course's
//! modules under `/courses/{id}/modules`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{course, module};
use crate::state::AppState;

/// Routes mounted at `/courses`.
///
/// ```text
/// POST   /                -> create
/// GET    /mine            -> list_mine
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// GET    /{id}/modules    -> module::list_by_course
/// POST   /{id}/modules    -> module::create
/// PUT    /{id}/modules    -> module::update_all
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(course::create))
        .route("/mine", get(course::list_mine))
        .route(
            "/{id}",
            get(course::get_by_id)
                .put(course::update)
                .delete(course::delete),
        )
        .route(
            "/{id}/modules",
            get(module::list_by_course)
                .post(module::create)
                .put(module::update_all),
        )
}

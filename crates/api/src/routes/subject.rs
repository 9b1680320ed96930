//! Route definitions for the `/subjects` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::subject;
use crate::state::AppState;

/// Routes mounted at `/subjects`.
///
/// ```text
/// GET    /   -> list
/// POST   /   -> create (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(subject::list).post(subject::create))
}

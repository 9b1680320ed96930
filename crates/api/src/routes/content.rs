//! Route definitions for the `/contents` resource.

use axum::routing::delete;
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;

/// Routes mounted at `/contents`.
///
/// ```text
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", delete(content::delete))
}

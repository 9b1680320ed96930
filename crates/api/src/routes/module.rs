//! Route definitions for the `/modules` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{content, module};
use crate::state::AppState;

/// Routes mounted at `/modules`.
///
/// ```text
/// GET    /{module_id}                        -> module::get_detail
/// POST   /{module_id}/content/{kind}         -> content::create
/// GET    /{module_id}/content/{kind}/{id}    -> content::get_item
/// PUT    /{module_id}/content/{kind}/{id}    -> content::update_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{module_id}", get(module::get_detail))
        .route("/{module_id}/content/{kind}", post(content::create))
        .route(
            "/{module_id}/content/{kind}/{id}",
            get(content::get_item).put(content::update_item),
        )
}

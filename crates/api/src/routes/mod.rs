pub mod auth;
pub mod content;
pub mod course;
pub mod health;
pub mod module;
pub mod subject;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                                  login (public)
/// /auth/refresh                                refresh (public)
/// /auth/logout                                 logout (requires auth)
///
/// /subjects                                    list (public), create (admin)
///
/// /courses                                     create
/// /courses/mine                                owner's courses
/// /courses/{id}                                get, update, delete
/// /courses/{id}/modules                        list, append, bulk edit
///
/// /modules/{module_id}                         module with contents
/// /modules/{module_id}/content/{kind}          create item + content
/// /modules/{module_id}/content/{kind}/{id}     get, update item
///
/// /contents/{id}                               delete content + item
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/subjects", subject::router())
        .nest("/courses", course::router())
        .nest("/modules", module::router())
        .nest("/contents", content::router())
}

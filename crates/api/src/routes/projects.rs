//! Route definitions for the `/projects` resource and its sub-resources.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{bookmarks, comments, projects, reports};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                 -> list_projects
/// POST   /                 -> create_project
/// GET    /{id}             -> get_project
/// PUT    /{id}             -> update_project
/// DELETE /{id}             -> delete_project
/// POST   /{id}/bookmark    -> toggle_bookmark
/// GET    /{id}/comments    -> list_comments
/// POST   /{id}/comments    -> create_comment
/// POST   /{id}/reports     -> create_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/{id}",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route("/{id}/bookmark", post(bookmarks::toggle_bookmark))
        .route(
            "/{id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route("/{id}/reports", post(reports::create_report))
}

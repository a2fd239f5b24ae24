//! Route definitions for the `/users` resource.

use axum::routing::{get, patch, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /nickname-check   -> nickname_check
/// PATCH  /me               -> update_me
/// DELETE /me               -> delete_me
/// PUT    /me/password      -> change_password
/// GET    /me/bookmarks     -> my_bookmarks
/// GET    /me/projects      -> my_projects
/// GET    /{id}             -> get_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/nickname-check", get(users::nickname_check))
        .route("/me", patch(users::update_me).delete(users::delete_me))
        .route("/me/password", put(users::change_password))
        .route("/me/bookmarks", get(users::my_bookmarks))
        .route("/me/projects", get(users::my_projects))
        .route("/{id}", get(users::get_user))
}

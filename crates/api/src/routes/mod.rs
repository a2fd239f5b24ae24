pub mod auth;
pub mod comments;
pub mod contacts;
pub mod health;
pub mod notifications;
pub mod projects;
pub mod uploads;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/signup                       sign up (public)
/// /auth/login                        login (public)
/// /auth/oauth/{provider}             OAuth login (public)
/// /auth/refresh                      refresh (public)
/// /auth/logout                       logout (requires auth)
/// /auth/me                           current user (requires auth)
///
/// /users/nickname-check              nickname availability
/// /users/me                          update, delete (requires auth)
/// /users/me/password                 change password (requires auth)
/// /users/me/bookmarks                bookmarked projects (requires auth)
/// /users/me/projects                 own projects (requires auth)
/// /users/{id}                        public user page
///
/// /projects                          list, create
/// /projects/{id}                     detail, update, delete
/// /projects/{id}/bookmark            toggle bookmark (requires auth)
/// /projects/{id}/comments            list, create
/// /projects/{id}/reports             report (requires auth)
///
/// /comments/{id}                     edit, delete (author only)
///
/// /notifications                     list own (requires auth)
/// /notifications/read-all            mark all read
/// /notifications/{id}                delete
/// /notifications/{id}/read           mark read
///
/// /contacts                          contact form (public)
/// /uploads/{kind}                    image upload (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/projects", projects::router())
        .nest("/comments", comments::router())
        .nest("/notifications", notifications::router())
        .nest("/contacts", contacts::router())
        .nest("/uploads", uploads::router())
}

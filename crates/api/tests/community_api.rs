//! HTTP-level integration tests for comments, reports, notifications,
//! contacts, uploads and account deletion.

mod common;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use common::{
    body_json, create_project, delete_auth, delete_json_auth, get, get_auth, patch_auth,
    post_json, post_json_auth, put_json_auth, signup, TEST_PASSWORD,
};
use sqlx::PgPool;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Comments and notifications
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn comment_by_other_user_notifies_the_author(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, author_token) = signup(app.clone(), "author").await;
    let (reader_id, reader_token) = signup(app.clone(), "reader").await;
    let id = create_project(app.clone(), &author_token, "Talk to me").await;
    let comments_uri = format!("/api/v1/projects/{id}/comments");

    let response = post_json_auth(
        app.clone(),
        &comments_uri,
        serde_json::json!({ "content": "Count me in" }),
        &reader_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // The author's own comment does not notify them.
    let response = post_json_auth(
        app.clone(),
        &comments_uri,
        serde_json::json!({ "content": "Welcome" }),
        &author_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(get(app.clone(), &comments_uri).await).await;
    let contents: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["Count me in", "Welcome"]);

    let json = body_json(get_auth(app.clone(), "/api/v1/notifications", &author_token).await).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["kind"], "comment");
    assert_eq!(items[0]["actor_id"], reader_id);
    assert_eq!(items[0]["is_read"], false);

    let json = body_json(get_auth(app, "/api/v1/notifications", &reader_token).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_the_commenter_can_edit_a_comment(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, author_token) = signup(app.clone(), "author").await;
    let (_, reader_token) = signup(app.clone(), "reader").await;
    let id = create_project(app.clone(), &author_token, "Edits").await;

    let json = body_json(
        post_json_auth(
            app.clone(),
            &format!("/api/v1/projects/{id}/comments"),
            serde_json::json!({ "content": "First draft" }),
            &reader_token,
        )
        .await,
    )
    .await;
    let comment_id = json["data"]["id"].as_i64().unwrap();
    let comment_uri = format!("/api/v1/comments/{comment_id}");

    let response = put_json_auth(
        app.clone(),
        &comment_uri,
        serde_json::json!({ "content": "Hijacked" }),
        &author_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(
        app.clone(),
        &comment_uri,
        serde_json::json!({ "content": "Final" }),
        &reader_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["content"], "Final");
    assert!(json["data"]["updated_at"].is_string());

    let response = delete_auth(app, &comment_uri, &reader_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn notifications_can_be_marked_read_and_deleted(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, author_token) = signup(app.clone(), "author").await;
    let (_, reader_token) = signup(app.clone(), "reader").await;
    let id = create_project(app.clone(), &author_token, "Busy").await;

    for content in ["one", "two"] {
        post_json_auth(
            app.clone(),
            &format!("/api/v1/projects/{id}/comments"),
            serde_json::json!({ "content": content }),
            &reader_token,
        )
        .await;
    }

    let json = body_json(get_auth(app.clone(), "/api/v1/notifications", &author_token).await).await;
    let first_id = json["data"][0]["id"].as_i64().unwrap();

    let response = patch_auth(
        app.clone(),
        &format!("/api/v1/notifications/{first_id}/read"),
        &author_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(
        get_auth(app.clone(), "/api/v1/notifications?unread_only=true", &author_token).await,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let json =
        body_json(patch_auth(app.clone(), "/api/v1/notifications/read-all", &author_token).await)
            .await;
    assert_eq!(json["data"]["updated"], 1);

    // Someone else's notification looks missing.
    let response = delete_auth(
        app.clone(),
        &format!("/api/v1/notifications/{first_id}"),
        &reader_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(
        app,
        &format!("/api/v1/notifications/{first_id}"),
        &author_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_report_by_same_user_is_conflict(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, author_token) = signup(app.clone(), "author").await;
    let (_, reader_token) = signup(app.clone(), "reader").await;
    let id = create_project(app.clone(), &author_token, "Suspicious").await;
    let uri = format!("/api/v1/projects/{id}/reports");
    let body = serde_json::json!({ "reason": "spam" });

    let response = post_json_auth(app.clone(), &uri, body.clone(), &reader_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(app.clone(), &uri, body, &reader_token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(get_auth(app, "/api/v1/notifications", &author_token).await).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["kind"], "report");
}

// ---------------------------------------------------------------------------
// Contacts and uploads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn contact_message_is_stored(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "email": "visitor@example.com",
        "title": "Partnership",
        "content": "Let's talk.",
    });

    let response = post_json(app.clone(), "/api/v1/contacts", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "visitor@example.com");

    let body = serde_json::json!({ "email": "not-an-email", "title": "x", "content": "y" });
    let response = post_json(app, "/api/v1/contacts", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

fn multipart_upload(uri: &str, token: &str) -> Request<Body> {
    let boundary = "sidemate-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"image\"; filename=\"me.png\"\r\n\
         Content-Type: image/png\r\n\r\n\
         not-really-a-png\r\n\
         --{boundary}--\r\n"
    );
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))
        .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_without_storage_is_unavailable(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = signup(app.clone(), "uploader").await;

    let response = app
        .clone()
        .oneshot(multipart_upload("/api/v1/uploads/profileImage", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let response = app
        .oneshot(multipart_upload("/api/v1/uploads/avatar", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Account deletion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_the_account_removes_login_and_projects(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (user_id, token) = signup(app.clone(), "leaver").await;
    let id = create_project(app.clone(), &token, "Abandoned").await;

    let response = delete_json_auth(
        app.clone(),
        "/api/v1/users/me",
        serde_json::json!({ "reason": "moving on" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = serde_json::json!({ "email": "leaver@example.com", "password": TEST_PASSWORD });
    let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get(app.clone(), &format!("/api/v1/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app, &format!("/api/v1/users/{user_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let recorded: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM delete_account_requests WHERE email = 'leaver@example.com'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(recorded, 1);
}

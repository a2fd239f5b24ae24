//! Integration tests for the project update path.
//!
//! Each test seeds one project, reconciles it against a desired state and
//! checks both the per-aspect report and the rows left behind.

use assert_matches::assert_matches;
use sidemate_core::reconcile::AspectOutcome;
use sidemate_core::storage::DEFAULT_REPRESENTATIVE_IMAGE;
use sidemate_db::models::project::ProjectInput;
use sidemate_db::models::user::{CreateUser, PROVIDER_LOCAL};
use sidemate_db::repositories::{
    HashtagRepo, MemberTypeRepo, ProjectImageRepo, ProjectRepo, UserRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            email: "author@example.com".to_string(),
            nickname: "author".to_string(),
            password_hash: None,
            provider: PROVIDER_LOCAL.to_string(),
            provider_id: None,
            profile_image: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn input() -> ProjectInput {
    ProjectInput {
        title: "Side project".to_string(),
        content_html: "<p>hello</p>".to_string(),
        content_markdown: "hello".to_string(),
        hashtags: vec!["rust".to_string(), "web".to_string(), "db".to_string()],
        member_types: vec!["developer".to_string(), "designer".to_string()],
        recruit_count: 3,
        images: vec!["u1".to_string(), "u2".to_string()],
        representative_image: Some("cover.png".to_string()),
    }
}

async fn seed_project(pool: &PgPool) -> i64 {
    let author = seed_user(pool).await;
    ProjectRepo::create(pool, author, &input()).await.unwrap().id
}

async fn ids_of(pool: &PgPool, table: &str, project_id: i64) -> Vec<i64> {
    sqlx::query_scalar(&format!(
        "SELECT id FROM {table} WHERE project_id = $1 ORDER BY id"
    ))
    .bind(project_id)
    .fetch_all(pool)
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn identical_state_writes_nothing(pool: PgPool) {
    let id = seed_project(&pool).await;
    let image_ids = ids_of(&pool, "project_images", id).await;
    let hashtag_ids = ids_of(&pool, "hashtags", id).await;

    let report = ProjectRepo::reconcile(&pool, id, &input()).await.unwrap();

    assert!(!report.any_changed());
    assert!(report.changed_aspects().is_empty());
    let project = ProjectRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert!(project.updated_at.is_none());
    assert_eq!(ids_of(&pool, "project_images", id).await, image_ids);
    assert_eq!(ids_of(&pool, "hashtags", id).await, hashtag_ids);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn images_are_updated_by_delta(pool: PgPool) {
    let id = seed_project(&pool).await;
    let kept_id: i64 =
        sqlx::query_scalar("SELECT id FROM project_images WHERE project_id = $1 AND url = 'u2'")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();

    let mut desired = input();
    desired.images = vec!["u2".to_string(), "u3".to_string()];
    let report = ProjectRepo::reconcile(&pool, id, &desired).await.unwrap();

    assert_eq!(report.images, AspectOutcome::Updated);
    assert_eq!(report.hashtags, AspectOutcome::Unchanged);
    assert_eq!(report.text, AspectOutcome::Unchanged);

    let mut urls = ProjectImageRepo::list_for_project(&pool, id).await.unwrap();
    urls.sort();
    assert_eq!(urls, vec!["u2", "u3"]);

    let still_there: i64 =
        sqlx::query_scalar("SELECT id FROM project_images WHERE project_id = $1 AND url = 'u2'")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(still_there, kept_id);

    let project = ProjectRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert!(project.updated_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn one_changed_hashtag_replaces_all(pool: PgPool) {
    let id = seed_project(&pool).await;
    let before = ids_of(&pool, "hashtags", id).await;

    let mut desired = input();
    desired.hashtags = vec!["rust".to_string(), "api".to_string(), "db".to_string()];
    let report = ProjectRepo::reconcile(&pool, id, &desired).await.unwrap();

    assert_eq!(report.hashtags, AspectOutcome::Updated);
    assert_eq!(
        HashtagRepo::list_for_project(&pool, id).await.unwrap(),
        vec!["rust", "api", "db"]
    );
    let after = ids_of(&pool, "hashtags", id).await;
    assert_eq!(after.len(), 3);
    assert!(after.iter().all(|row_id| !before.contains(row_id)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reordered_hashtags_count_as_a_change(pool: PgPool) {
    let id = seed_project(&pool).await;

    let mut desired = input();
    desired.hashtags = vec!["web".to_string(), "rust".to_string(), "db".to_string()];
    let report = ProjectRepo::reconcile(&pool, id, &desired).await.unwrap();

    assert_eq!(report.hashtags, AspectOutcome::Updated);
    assert_eq!(
        HashtagRepo::list_for_project(&pool, id).await.unwrap(),
        vec!["web", "rust", "db"]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn member_types_keep_surviving_rows(pool: PgPool) {
    let id = seed_project(&pool).await;
    let developer_id: i64 = sqlx::query_scalar(
        "SELECT id FROM member_types WHERE project_id = $1 AND type = 'developer'",
    )
    .bind(id)
    .fetch_one(&pool)
    .await
    .unwrap();

    let mut desired = input();
    desired.member_types = vec!["pm".to_string(), "developer".to_string()];
    let report = ProjectRepo::reconcile(&pool, id, &desired).await.unwrap();

    assert_eq!(report.member_types, AspectOutcome::Updated);
    assert_eq!(
        MemberTypeRepo::list_for_project(&pool, id).await.unwrap(),
        vec!["developer", "pm"]
    );
    let still_there: i64 = sqlx::query_scalar(
        "SELECT id FROM member_types WHERE project_id = $1 AND type = 'developer'",
    )
    .bind(id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(still_there, developer_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn scalar_change_stamps_updated_at(pool: PgPool) {
    let id = seed_project(&pool).await;

    let mut desired = input();
    desired.recruit_count = 5;
    let report = ProjectRepo::reconcile(&pool, id, &desired).await.unwrap();

    assert_eq!(report.changed_aspects(), vec!["recruit_count"]);
    let project = ProjectRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(project.recruit_count, 5);
    assert!(project.updated_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_representative_image_falls_back_to_marker(pool: PgPool) {
    let id = seed_project(&pool).await;

    let mut desired = input();
    desired.representative_image = None;
    let report = ProjectRepo::reconcile(&pool, id, &desired).await.unwrap();
    assert_eq!(report.representative_image, AspectOutcome::Updated);

    let project = ProjectRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(project.representative_image, DEFAULT_REPRESENTATIVE_IMAGE);

    // Sending the marker explicitly is the same state.
    desired.representative_image = Some(DEFAULT_REPRESENTATIVE_IMAGE.to_string());
    let report = ProjectRepo::reconcile(&pool, id, &desired).await.unwrap();
    assert_eq!(report.representative_image, AspectOutcome::Unchanged);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn text_fields_are_written_individually(pool: PgPool) {
    let id = seed_project(&pool).await;

    let mut desired = input();
    desired.content_markdown = "hello again".to_string();
    let report = ProjectRepo::reconcile(&pool, id, &desired).await.unwrap();

    assert_eq!(report.text, AspectOutcome::Updated);
    let project = ProjectRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(project.title, "Side project");
    assert_eq!(project.content_markdown, "hello again");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reconcile_of_missing_project_is_row_not_found(pool: PgPool) {
    let result = ProjectRepo::reconcile(&pool, 999_999, &input()).await;
    assert_matches!(result, Err(sqlx::Error::RowNotFound));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failing_aspect_rolls_back_earlier_aspects(pool: PgPool) {
    let id = seed_project(&pool).await;
    let image_ids = ids_of(&pool, "project_images", id).await;

    // Text and images are written before member types, whose insert
    // violates ck_member_types_type.
    let mut desired = input();
    desired.title = "Renamed".to_string();
    desired.images = vec!["u9".to_string()];
    desired.member_types = vec!["cto".to_string()];
    let result = ProjectRepo::reconcile(&pool, id, &desired).await;

    assert_matches!(result, Err(sqlx::Error::Database(_)));
    let project = ProjectRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(project.title, "Side project");
    assert!(project.updated_at.is_none());
    assert_eq!(
        ProjectImageRepo::list_for_project(&pool, id).await.unwrap(),
        vec!["u1", "u2"]
    );
    assert_eq!(ids_of(&pool, "project_images", id).await, image_ids);
    let mut member_types = MemberTypeRepo::list_for_project(&pool, id).await.unwrap();
    member_types.sort();
    assert_eq!(member_types, vec!["designer", "developer"]);
}

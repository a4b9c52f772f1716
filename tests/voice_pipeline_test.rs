//! Integration Tests: Voice Comment Pipeline
//!
//! Exercises the ingestion pipeline against a real database.
//!
//! Coverage:
//! - Confirmed upload records the final URL and transitions the placeholder
//! - Missing question fails fast without creating a row
//! - Upload/transform failures fail the placeholder and surface the error
//! - Transient upload failures succeed within the retry budget
//! - Temp files are gone after every outcome
//! - Listing is chronological and only exposes uploaded comments
//! - Resubmission creates distinct comments
//! - Stale placeholders are swept to failed
//!
//! Architecture:
//! - Uses testcontainers for PostgreSQL
//! - Substitutes in-memory storage and passthrough/failing transforms

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{
    create_test_question, create_test_user, sample_wav, setup_test_db, test_upload_config,
    FailingTransform, MemoryStorage, PassthroughTransform,
};
use uuid::Uuid;

use voice_comment_service::db::comment_repo;
use voice_comment_service::error::AppError;
use voice_comment_service::jobs::placeholder_sweeper::sweep_once;
use voice_comment_service::models::CommentStatus;
use voice_comment_service::services::VoiceCommentPipeline;

fn temp_dir_is_empty(dir: &std::path::Path) -> bool {
    match std::fs::read_dir(dir) {
        Ok(mut entries) => entries.next().is_none(),
        Err(_) => true,
    }
}

#[tokio::test]
async fn confirmed_upload_records_final_url() {
    let pool = setup_test_db().await.expect("db");
    let user_id = create_test_user(&pool, "alice").await;
    let question_id = create_test_question(&pool, user_id).await;

    let scratch = tempfile::tempdir().expect("tempdir");
    let storage = Arc::new(MemoryStorage::new());
    let pipeline = VoiceCommentPipeline::new(
        pool.clone(),
        storage.clone(),
        Arc::new(PassthroughTransform),
        &test_upload_config(scratch.path()),
    );

    let comment = pipeline
        .submit(question_id, sample_wav())
        .await
        .expect("submit");

    assert_eq!(comment.get_status(), CommentStatus::Uploaded);
    assert_eq!(
        comment.content.as_deref(),
        Some(format!("https://media.test/{}", comment.id).as_str())
    );

    // One object, keyed by the comment id, tagged as WAV
    let objects = storage.objects.lock().unwrap();
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].key, comment.id.to_string());
    assert_eq!(objects[0].content_type, "audio/wav");

    assert!(temp_dir_is_empty(scratch.path()));
}

#[tokio::test]
async fn missing_question_fails_fast_without_a_row() {
    let pool = setup_test_db().await.expect("db");

    let scratch = tempfile::tempdir().expect("tempdir");
    let pipeline = VoiceCommentPipeline::new(
        pool.clone(),
        Arc::new(MemoryStorage::new()),
        Arc::new(PassthroughTransform),
        &test_upload_config(scratch.path()),
    );

    let err = pipeline
        .submit(Uuid::new_v4(), sample_wav())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
        .fetch_one(&pool)
        .await
        .expect("count");
    assert_eq!(count, 0);
}

#[tokio::test]
async fn upload_failure_fails_placeholder_and_surfaces_error() {
    let pool = setup_test_db().await.expect("db");
    let user_id = create_test_user(&pool, "bob").await;
    let question_id = create_test_question(&pool, user_id).await;

    let scratch = tempfile::tempdir().expect("tempdir");
    // More injected failures than the retry budget allows
    let storage = Arc::new(MemoryStorage::failing(u32::MAX));
    let pipeline = VoiceCommentPipeline::new(
        pool.clone(),
        storage,
        Arc::new(PassthroughTransform),
        &test_upload_config(scratch.path()),
    );

    let err = pipeline
        .submit(question_id, sample_wav())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Storage(_)));

    let (status, content): (String, Option<String>) =
        sqlx::query_as("SELECT status, content FROM comments")
            .fetch_one(&pool)
            .await
            .expect("row");
    assert_eq!(status, "failed");
    assert_eq!(content, None);

    // Cleanup is unconditional
    assert!(temp_dir_is_empty(scratch.path()));

    // Failed placeholders never reach clients
    let listed = comment_repo::get_comments_by_question(&pool, question_id)
        .await
        .expect("list");
    assert!(listed.is_empty());
}

#[tokio::test]
async fn transient_upload_failure_succeeds_within_retry_budget() {
    let pool = setup_test_db().await.expect("db");
    let user_id = create_test_user(&pool, "carol").await;
    let question_id = create_test_question(&pool, user_id).await;

    let scratch = tempfile::tempdir().expect("tempdir");
    // Two failures, three retries allowed
    let storage = Arc::new(MemoryStorage::failing(2));
    let pipeline = VoiceCommentPipeline::new(
        pool.clone(),
        storage.clone(),
        Arc::new(PassthroughTransform),
        &test_upload_config(scratch.path()),
    );

    let comment = pipeline
        .submit(question_id, sample_wav())
        .await
        .expect("submit");

    assert_eq!(comment.get_status(), CommentStatus::Uploaded);
    assert_eq!(storage.stored_keys(), vec![comment.id.to_string()]);
}

#[tokio::test]
async fn transform_failure_fails_placeholder_and_cleans_temp() {
    let pool = setup_test_db().await.expect("db");
    let user_id = create_test_user(&pool, "dave").await;
    let question_id = create_test_question(&pool, user_id).await;

    let scratch = tempfile::tempdir().expect("tempdir");
    let storage = Arc::new(MemoryStorage::new());
    let pipeline = VoiceCommentPipeline::new(
        pool.clone(),
        storage.clone(),
        Arc::new(FailingTransform),
        &test_upload_config(scratch.path()),
    );

    let err = pipeline
        .submit(question_id, sample_wav())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Transform(_)));

    let status: String = sqlx::query_scalar("SELECT status FROM comments")
        .fetch_one(&pool)
        .await
        .expect("status");
    assert_eq!(status, "failed");

    assert!(storage.stored_keys().is_empty());
    assert!(temp_dir_is_empty(scratch.path()));
}

#[tokio::test]
async fn listing_is_chronological_and_uploaded_only() {
    let pool = setup_test_db().await.expect("db");
    let user_id = create_test_user(&pool, "erin").await;
    let question_id = create_test_question(&pool, user_id).await;

    let scratch = tempfile::tempdir().expect("tempdir");
    let pipeline = VoiceCommentPipeline::new(
        pool.clone(),
        Arc::new(MemoryStorage::new()),
        Arc::new(PassthroughTransform),
        &test_upload_config(scratch.path()),
    );

    let first = pipeline
        .submit(question_id, sample_wav())
        .await
        .expect("first");
    let second = pipeline
        .submit(question_id, sample_wav())
        .await
        .expect("second");

    // A placeholder that never finished must not appear
    comment_repo::create_placeholder(&pool, question_id)
        .await
        .expect("placeholder");

    let listed = comment_repo::get_comments_by_question(&pool, question_id)
        .await
        .expect("list");

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, first.id);
    assert_eq!(listed[1].id, second.id);
    assert!(listed
        .windows(2)
        .all(|pair| pair[0].created_at <= pair[1].created_at));
}

#[tokio::test]
async fn resubmission_creates_distinct_comments() {
    let pool = setup_test_db().await.expect("db");
    let user_id = create_test_user(&pool, "frank").await;
    let question_id = create_test_question(&pool, user_id).await;

    let scratch = tempfile::tempdir().expect("tempdir");
    let storage = Arc::new(MemoryStorage::new());
    let pipeline = VoiceCommentPipeline::new(
        pool.clone(),
        storage.clone(),
        Arc::new(PassthroughTransform),
        &test_upload_config(scratch.path()),
    );

    // Same audio twice: no deduplication, two comments, two objects
    let audio = sample_wav();
    let first = pipeline
        .submit(question_id, audio.clone())
        .await
        .expect("first");
    let second = pipeline.submit(question_id, audio).await.expect("second");

    assert_ne!(first.id, second.id);
    assert_eq!(storage.stored_keys().len(), 2);
}

#[tokio::test]
async fn stale_placeholders_are_swept_to_failed() {
    let pool = setup_test_db().await.expect("db");
    let user_id = create_test_user(&pool, "grace").await;
    let question_id = create_test_question(&pool, user_id).await;

    // One placeholder an hour old, one fresh
    let stale_id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO comments (id, question_id, status, created_at)
         VALUES ($1, $2, 'pending', NOW() - INTERVAL '1 hour')",
    )
    .bind(stale_id)
    .bind(question_id)
    .execute(&pool)
    .await
    .expect("stale placeholder");

    let fresh = comment_repo::create_placeholder(&pool, question_id)
        .await
        .expect("fresh placeholder");

    let swept = sweep_once(&pool, Duration::from_secs(900))
        .await
        .expect("sweep");
    assert_eq!(swept, 1);

    let stale_status: String = sqlx::query_scalar("SELECT status FROM comments WHERE id = $1")
        .bind(stale_id)
        .fetch_one(&pool)
        .await
        .expect("stale status");
    assert_eq!(stale_status, "failed");

    let fresh_status: String = sqlx::query_scalar("SELECT status FROM comments WHERE id = $1")
        .bind(fresh.id)
        .fetch_one(&pool)
        .await
        .expect("fresh status");
    assert_eq!(fresh_status, "pending");
}

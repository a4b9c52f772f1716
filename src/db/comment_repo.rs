/// Comment repository - database operations for voice comments
///
/// Comments move through a placeholder lifecycle: rows are inserted as
/// `pending` with no content, then transitioned exactly once to `uploaded`
/// (content = final object URL) or `failed`. Both transitions are guarded on
/// the current status so replays are no-ops.
use crate::models::{Comment, CommentStatus};
use sqlx::PgPool;
use uuid::Uuid;

/// Insert a placeholder comment for a question
pub async fn create_placeholder(pool: &PgPool, question_id: Uuid) -> Result<Comment, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (id, question_id, status)
        VALUES ($1, $2, $3)
        RETURNING id, question_id, content, status, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(question_id)
    .bind(CommentStatus::Pending.as_str())
    .fetch_one(pool)
    .await
}

/// Transition a pending comment to `uploaded`, recording the final URL.
///
/// Returns `None` if the comment does not exist or already left the
/// `pending` state.
pub async fn mark_uploaded(
    pool: &PgPool,
    comment_id: Uuid,
    content: &str,
) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        UPDATE comments
        SET content = $1, status = $2, updated_at = NOW()
        WHERE id = $3 AND status = $4
        RETURNING id, question_id, content, status, created_at, updated_at
        "#,
    )
    .bind(content)
    .bind(CommentStatus::Uploaded.as_str())
    .bind(comment_id)
    .bind(CommentStatus::Pending.as_str())
    .fetch_optional(pool)
    .await
}

/// Transition a pending comment to `failed`.
pub async fn mark_failed(pool: &PgPool, comment_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE comments
        SET status = $1, updated_at = NOW()
        WHERE id = $2 AND status = $3
        "#,
    )
    .bind(CommentStatus::Failed.as_str())
    .bind(comment_id)
    .bind(CommentStatus::Pending.as_str())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Find a comment by ID
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, question_id, content, status, created_at, updated_at
        FROM comments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Get uploaded comments for a question in chronological order.
///
/// Pending and failed placeholders never reach clients.
pub async fn get_comments_by_question(
    pool: &PgPool,
    question_id: Uuid,
) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, question_id, content, status, created_at, updated_at
        FROM comments
        WHERE question_id = $1 AND status = $2
        ORDER BY created_at ASC
        "#,
    )
    .bind(question_id)
    .bind(CommentStatus::Uploaded.as_str())
    .fetch_all(pool)
    .await
}

/// Fail placeholders that have been pending longer than `max_age_secs`.
///
/// Returns the number of rows transitioned.
pub async fn fail_stale_placeholders(
    pool: &PgPool,
    max_age_secs: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE comments
        SET status = $1, updated_at = NOW()
        WHERE status = $2 AND created_at < NOW() - make_interval(secs => $3)
        "#,
    )
    .bind(CommentStatus::Failed.as_str())
    .bind(CommentStatus::Pending.as_str())
    .bind(max_age_secs as f64)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

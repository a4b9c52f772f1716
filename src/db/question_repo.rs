/// Question repository - database operations for questions
use crate::models::Question;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new question owned by a user
pub async fn create_question(
    pool: &PgPool,
    user_id: Uuid,
    content: &str,
) -> Result<Question, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query_as::<_, Question>(
        r#"
        INSERT INTO questions (id, user_id, content)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, content, created_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(content)
    .fetch_one(pool)
    .await
}

/// Find a question by ID
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, user_id, content, created_at
        FROM questions
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Get all questions created by a user, newest first
pub async fn get_questions_by_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, user_id, content, created_at
        FROM questions
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

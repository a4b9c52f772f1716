/// User repository - database operations for users
use crate::models::User;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new user
pub async fn create_user(pool: &PgPool, insta_id: &str) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, insta_id)
        VALUES ($1, $2)
        RETURNING id, insta_id, created_at
        "#,
    )
    .bind(id)
    .bind(insta_id)
    .fetch_one(pool)
    .await
}

/// Find a user by ID
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, insta_id, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// User handlers - HTTP endpoints for user operations
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::models::CreateUserRequest;

/// Get a user by ID
pub async fn get_user(pool: web::Data<PgPool>, user_id: web::Path<Uuid>) -> Result<HttpResponse> {
    let user = user_repo::find_by_id(pool.get_ref(), *user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("user is not found".to_string()))?;

    Ok(HttpResponse::Ok().json(user))
}

/// Create a new user
pub async fn create_user(
    pool: web::Data<PgPool>,
    req: web::Json<CreateUserRequest>,
) -> Result<HttpResponse> {
    if req.insta_id.is_empty() {
        return Err(AppError::BadRequest("insta_id required".to_string()));
    }

    let user = user_repo::create_user(pool.get_ref(), &req.insta_id).await?;

    Ok(HttpResponse::Created().json(user))
}

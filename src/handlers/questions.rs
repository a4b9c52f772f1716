/// Question handlers - HTTP endpoints for question operations
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::db::{question_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::CreateQuestionRequest;
use crate::services::share_url::share_url;

/// Get all questions created by a user
pub async fn get_user_questions(
    pool: web::Data<PgPool>,
    user_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    user_repo::find_by_id(pool.get_ref(), *user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("user is not found".to_string()))?;

    let questions = question_repo::get_questions_by_user(pool.get_ref(), *user_id).await?;

    Ok(HttpResponse::Ok().json(questions))
}

/// Create a new question
pub async fn create_question(
    pool: web::Data<PgPool>,
    req: web::Json<CreateQuestionRequest>,
) -> Result<HttpResponse> {
    user_repo::find_by_id(pool.get_ref(), req.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("user is not found".to_string()))?;

    let question = question_repo::create_question(pool.get_ref(), req.user_id, &req.content).await?;

    Ok(HttpResponse::Created().json(question))
}

#[derive(Deserialize)]
pub struct ShareUrlParams {
    pub user_id: Uuid,
    pub question_id: Uuid,
}

/// Build the shareable URL for a question
pub async fn get_question_url(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    query: web::Query<ShareUrlParams>,
) -> Result<HttpResponse> {
    let user = user_repo::find_by_id(pool.get_ref(), query.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("user is not found".to_string()))?;

    question_repo::find_by_id(pool.get_ref(), query.question_id)
        .await?
        .ok_or_else(|| AppError::NotFound("question is not found".to_string()))?;

    let url = share_url(&config.share.base_url, &user.insta_id, query.question_id);

    Ok(HttpResponse::Ok().json(url))
}

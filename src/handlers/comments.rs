/// Comment handlers - listing plus the multipart voice upload endpoint
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::StreamExt;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{comment_repo, question_repo};
use crate::error::{AppError, Result};
use crate::models::CommentResponse;
use crate::services::VoiceCommentPipeline;

#[derive(Deserialize)]
pub struct CommentListParams {
    pub question_id: Uuid,
}

/// Get uploaded comments for a question, oldest first
pub async fn get_question_comments(
    pool: web::Data<PgPool>,
    query: web::Query<CommentListParams>,
) -> Result<HttpResponse> {
    question_repo::find_by_id(pool.get_ref(), query.question_id)
        .await?
        .ok_or_else(|| AppError::NotFound("question is not found".to_string()))?;

    let comments = comment_repo::get_comments_by_question(pool.get_ref(), query.question_id).await?;
    let responses: Vec<CommentResponse> = comments.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(responses))
}

/// Submit a voice comment
/// POST /api/v1/comments/voice (multipart: `file` + `question_id`)
pub async fn create_voice_comment(
    pipeline: web::Data<VoiceCommentPipeline>,
    mut payload: Multipart,
) -> Result<HttpResponse> {
    let mut question_id: Option<Uuid> = None;
    let mut audio: Option<Vec<u8>> = None;

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::BadRequest(format!("Multipart error: {e}")))?;

        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name())
            .unwrap_or("")
            .to_string();
        match name.as_str() {
            "file" => {
                audio = Some(read_field_bytes(&mut field).await?);
            }
            "question_id" => {
                let raw = String::from_utf8(read_field_bytes(&mut field).await?)
                    .map_err(|_| AppError::BadRequest("question_id is not UTF-8".to_string()))?;
                question_id = Some(
                    Uuid::parse_str(raw.trim())
                        .map_err(|_| AppError::BadRequest("Invalid question_id".to_string()))?,
                );
            }
            _ => {}
        }
    }

    let question_id =
        question_id.ok_or_else(|| AppError::BadRequest("question_id required".to_string()))?;
    let audio = audio.ok_or_else(|| AppError::BadRequest("file required".to_string()))?;

    if audio.is_empty() {
        return Err(AppError::BadRequest("file is empty".to_string()));
    }

    let comment = pipeline.submit(question_id, audio).await?;

    Ok(HttpResponse::Created().json(CommentResponse::from(comment)))
}

async fn read_field_bytes(field: &mut actix_multipart::Field) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let data = chunk.map_err(|e| AppError::BadRequest(format!("Field read error: {e}")))?;
        bytes.extend_from_slice(&data);
    }
    Ok(bytes)
}

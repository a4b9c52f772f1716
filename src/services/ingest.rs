/// Voice comment ingestion pipeline
///
/// Turns an uploaded audio byte stream into a durable, linked comment:
/// placeholder row, temp file, voice transform, object-store upload, URL
/// transition. The placeholder only reaches `uploaded` after the store has
/// confirmed the object; any failure transitions it to `failed` and the
/// error is surfaced to the caller. Temp files are removed on every path.
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use uuid::Uuid;

use crate::config::UploadConfig;
use crate::db::{comment_repo, question_repo};
use crate::error::{AppError, Result};
use crate::models::Comment;
use crate::retry::{with_retry, RetryConfig};
use crate::services::storage::ObjectStorage;
use crate::services::transform::{voiced_path, VoiceTransform};

const AUDIO_CONTENT_TYPE: &str = "audio/wav";

#[derive(Clone)]
pub struct VoiceCommentPipeline {
    pool: PgPool,
    storage: Arc<dyn ObjectStorage>,
    transform: Arc<dyn VoiceTransform>,
    temp_dir: PathBuf,
    retry: RetryConfig,
}

impl VoiceCommentPipeline {
    pub fn new(
        pool: PgPool,
        storage: Arc<dyn ObjectStorage>,
        transform: Arc<dyn VoiceTransform>,
        config: &UploadConfig,
    ) -> Self {
        Self {
            pool,
            storage,
            transform,
            temp_dir: PathBuf::from(&config.temp_dir),
            retry: RetryConfig {
                max_retries: config.max_upload_retries,
                initial_backoff: Duration::from_millis(config.retry_initial_backoff_ms),
                ..Default::default()
            },
        }
    }

    /// Ingest one voice comment for `question_id`.
    pub async fn submit(&self, question_id: Uuid, audio: Vec<u8>) -> Result<Comment> {
        question_repo::find_by_id(&self.pool, question_id)
            .await?
            .ok_or_else(|| AppError::NotFound("question is not found".to_string()))?;

        let placeholder = comment_repo::create_placeholder(&self.pool, question_id).await?;
        let comment_id = placeholder.id;

        tracing::info!(comment_id = %comment_id, %question_id, bytes = audio.len(), "voice comment accepted");

        // Comment id keys the temp file, so concurrent uploads never collide.
        let raw_path = self.temp_dir.join(format!("{comment_id}.wav"));
        let result = self.stage_and_upload(comment_id, &raw_path, audio).await;

        // Scoped-resource release: both temp files go away no matter what.
        remove_quietly(&raw_path).await;
        remove_quietly(&voiced_path(&raw_path)).await;

        if let Err(err) = result {
            tracing::error!(comment_id = %comment_id, error = %err, "ingestion failed, failing placeholder");
            if !comment_repo::mark_failed(&self.pool, comment_id).await? {
                tracing::warn!(comment_id = %comment_id, "placeholder already left pending state");
            }
            return Err(err);
        }

        let url = self.storage.public_url(&comment_id.to_string());
        let comment = comment_repo::mark_uploaded(&self.pool, comment_id, &url)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!("comment {comment_id} already left pending state"))
            })?;

        tracing::info!(comment_id = %comment_id, url = %url, "voice comment uploaded");
        Ok(comment)
    }

    /// Temp-file lifecycle, transform, and confirmed upload. Cleanup is the
    /// caller's job so it runs on every exit path.
    async fn stage_and_upload(
        &self,
        comment_id: Uuid,
        raw_path: &Path,
        audio: Vec<u8>,
    ) -> Result<()> {
        tokio::fs::create_dir_all(&self.temp_dir).await?;
        tokio::fs::write(raw_path, &audio).await?;

        let voiced = self.transform.apply(raw_path).await?;
        if !voiced.exists() {
            return Err(AppError::Transform(format!(
                "transform reported success but produced no file at {}",
                voiced.display()
            )));
        }

        let body = tokio::fs::read(&voiced).await?;
        let key = comment_id.to_string();

        with_retry(&self.retry, || {
            self.storage.put_object(&key, body.clone(), AUDIO_CONTENT_TYPE)
        })
        .await?;

        Ok(())
    }
}

async fn remove_quietly(path: &Path) {
    if let Err(err) = tokio::fs::remove_file(path).await {
        if err.kind() != std::io::ErrorKind::NotFound {
            tracing::debug!(path = %path.display(), error = %err, "temp file removal failed");
        }
    }
}

/// Data models for voice-comment-service
///
/// This module defines structures for:
/// - User: account identified by an Instagram-style handle
/// - Question: a prompt created by a user that accepts voice comments
/// - Comment: a voice-altered audio reply to a question
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ========================================
// User
// ========================================

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub insta_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub insta_id: String,
}

// ========================================
// Question
// ========================================

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuestionRequest {
    pub user_id: Uuid,
    pub content: String,
}

// ========================================
// Comment
// ========================================

/// Comment status in the placeholder lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    Pending,
    Uploaded,
    Failed,
}

impl CommentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Uploaded => "uploaded",
            Self::Failed => "failed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "uploaded" => Some(Self::Uploaded),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

/// Comment database entity
///
/// `content` is NULL until the transformed audio is confirmed durable, at
/// which point it holds the public object URL.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub question_id: Uuid,
    pub content: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn get_status(&self) -> CommentStatus {
        CommentStatus::from_str(&self.status).unwrap_or(CommentStatus::Pending)
    }
}

/// Comment response DTO — only built from uploaded comments, so `content`
/// is always the final URL here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub question_id: String,
    pub content: String,
    pub created_at: i64,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            question_id: comment.question_id.to_string(),
            content: comment.content.unwrap_or_default(),
            created_at: comment.created_at.timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_status_round_trips() {
        for status in [
            CommentStatus::Pending,
            CommentStatus::Uploaded,
            CommentStatus::Failed,
        ] {
            assert_eq!(CommentStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(CommentStatus::from_str("bogus"), None);
    }
}

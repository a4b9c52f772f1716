//! Voice Comment Service
//!
//! Backend for a Q&A social app: users post questions, other users answer
//! with voice-altered audio comments. Audio is transformed locally and
//! stored in S3; comment rows track the placeholder lifecycle in Postgres.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod jobs;
pub mod models;
pub mod retry;
pub mod services;

// Public re-exports
pub use config::Config;
pub use error::{AppError, Result};
